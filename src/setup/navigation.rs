use crate::api::ConfigApi;
use crate::setup::step_validation::{validate_step, MSG_REQUIRED_FIELDS};
use crate::setup::submission::SubmitOutcome;
use crate::setup::wizard::ConfigWizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Credentials,
    Project,
}

pub const ALL_WIZARD_STEPS: [WizardStep; 2] = [WizardStep::Credentials, WizardStep::Project];

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Credentials => "credentials",
            WizardStep::Project => "project",
        }
    }

    pub fn index(self) -> usize {
        match self {
            WizardStep::Credentials => 0,
            WizardStep::Project => 1,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            WizardStep::Credentials => Some(WizardStep::Project),
            WizardStep::Project => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            WizardStep::Credentials => None,
            WizardStep::Project => Some(WizardStep::Credentials),
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { from: WizardStep, to: WizardStep },
    Unchanged { step: WizardStep },
    Blocked { step: WizardStep, message: String },
    Submitted(SubmitOutcome),
}

impl<A: ConfigApi> ConfigWizard<A> {
    /// Backward navigation never validates and never clears data.
    pub fn go_to_previous_step(&mut self) -> StepOutcome {
        let from = self.step;
        match from.previous() {
            Some(to) => {
                self.set_step(to);
                StepOutcome::Moved { from, to }
            }
            None => StepOutcome::Unchanged { step: from },
        }
    }

    /// Forward navigation. Leaving the credentials step requires them to be
    /// valid, validating first when they are not; the step only advances once
    /// that validation has succeeded. From the last step this submits.
    pub fn go_to_next_step(&mut self) -> StepOutcome {
        let from = self.step;
        let validation = validate_step(
            from,
            self.form.data(),
            &self.mode,
            self.name_checker.availability(),
        );
        if !validation.is_valid {
            let message = validation
                .error_message
                .unwrap_or_else(|| MSG_REQUIRED_FIELDS.to_string());
            self.set_step_error(from, Some(message.clone()));
            return StepOutcome::Blocked {
                step: from,
                message,
            };
        }
        self.set_step_error(from, None);

        let Some(to) = from.next() else {
            return StepOutcome::Submitted(self.submit());
        };
        if from == WizardStep::Credentials && !self.credentials.is_valid() {
            if let Err(err) = self.validate_credentials(|_| {}) {
                let message = self
                    .step_errors
                    .get(from)
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                return StepOutcome::Blocked {
                    step: from,
                    message,
                };
            }
        }
        self.set_step(to);
        StepOutcome::Moved { from, to }
    }
}
