use crate::api::{ApiError, ConfigApi, JiraConfiguration};
use crate::setup::form_data::FormField;
use crate::setup::name_check::NameCheckOutcome;
use crate::setup::navigation::{StepOutcome, WizardStep};
use crate::setup::step_validation::MSG_NAME_EXISTS;
use crate::setup::wizard::{ConfigWizard, WizardEvent, WizardMode};
use crate::workflow::apply_boundary_fields;

pub const MSG_NAME_CHECK_UNAVAILABLE: &str =
    "Could not verify that the configuration name is available. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(JiraConfiguration),
    Updated(JiraConfiguration),
    NameTaken,
    Failed(String),
}

impl<A: ConfigApi> ConfigWizard<A> {
    /// Form submit action. Before the last step this behaves like "next";
    /// on the last step it persists and reports the saved configuration to
    /// `on_success`. Failures leave the user on the form.
    pub fn handle_submit<F>(&mut self, on_success: F) -> StepOutcome
    where
        F: FnOnce(&JiraConfiguration),
    {
        let outcome = self.go_to_next_step();
        if let StepOutcome::Submitted(
            SubmitOutcome::Created(config) | SubmitOutcome::Updated(config),
        ) = &outcome
        {
            on_success(config);
        }
        outcome
    }

    pub(crate) fn submit(&mut self) -> SubmitOutcome {
        self.submitting = true;
        self.set_error(None);
        let outcome = self.persist();
        self.submitting = false;
        outcome
    }

    fn persist(&mut self) -> SubmitOutcome {
        let workflow_names = match self.workflow_states.clone() {
            Some(states) => {
                let updates = apply_boundary_fields(&states, &mut self.form);
                self.emit_field_updates(&updates);
                states.into_iter().map(|state| state.name).collect()
            }
            None => Vec::new(),
        };
        let mut config = self.form.data().to_configuration(workflow_names);

        match self.mode.clone() {
            WizardMode::Edit { original_name } => {
                config.name = original_name.clone();
                match self.api.update_configuration(&original_name, &config) {
                    Ok(saved) => self.on_saved(saved, SubmitOutcome::Updated),
                    Err(err) => self.on_save_failed(&original_name, &err),
                }
            }
            WizardMode::Create => {
                let name = self.form.get(FormField::Name).to_string();
                let previous = self.name_checker.availability();
                let check = self.name_checker.check_now(&self.api, &name);
                let current = self.name_checker.availability();
                if current != previous {
                    self.emit(WizardEvent::NameAvailabilityChanged(current));
                }
                match check {
                    NameCheckOutcome::Resolved { available: true } => {
                        match self.api.create_configuration(&config) {
                            Ok(saved) => self.on_saved(saved, SubmitOutcome::Created),
                            Err(err) => self.on_save_failed(&name, &err),
                        }
                    }
                    NameCheckOutcome::Resolved { available: false } => {
                        self.log.warn(
                            "submit_name_taken",
                            &format!("name `{name}` already exists"),
                        );
                        self.set_step_error(
                            WizardStep::Credentials,
                            Some(MSG_NAME_EXISTS.to_string()),
                        );
                        self.set_error(Some(MSG_NAME_EXISTS.to_string()));
                        self.set_step(WizardStep::Credentials);
                        SubmitOutcome::NameTaken
                    }
                    NameCheckOutcome::Failed(reason) => {
                        self.log.error("submit_name_check_failed", &reason);
                        self.set_error(Some(MSG_NAME_CHECK_UNAVAILABLE.to_string()));
                        SubmitOutcome::Failed(MSG_NAME_CHECK_UNAVAILABLE.to_string())
                    }
                    NameCheckOutcome::Stale => {
                        self.set_error(Some(MSG_NAME_CHECK_UNAVAILABLE.to_string()));
                        SubmitOutcome::Failed(MSG_NAME_CHECK_UNAVAILABLE.to_string())
                    }
                }
            }
        }
    }

    fn on_saved(
        &mut self,
        saved: JiraConfiguration,
        wrap: fn(JiraConfiguration) -> SubmitOutcome,
    ) -> SubmitOutcome {
        self.log
            .info("configuration_saved", &format!("saved `{}`", saved.name));
        self.emit(WizardEvent::Submitted {
            name: saved.name.clone(),
        });
        wrap(saved)
    }

    fn on_save_failed(&mut self, name: &str, err: &ApiError) -> SubmitOutcome {
        let message = format!("Failed to save configuration: {err}");
        self.log
            .error("configuration_save_failed", &format!("`{name}`: {err}"));
        self.set_error(Some(message.clone()));
        SubmitOutcome::Failed(message)
    }
}
