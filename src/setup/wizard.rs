use crate::api::{ConfigApi, JiraConfiguration, JiraProject};
use crate::setup::credentials::{CredentialsValidator, CredentialsValidity};
use crate::setup::form_data::{FieldUpdate, FormData, FormDataStore, FormField};
use crate::setup::name_check::{
    NameAvailabilityChecker, NameCheckOutcome, DEFAULT_NAME_CHECK_DEBOUNCE,
};
use crate::setup::navigation::WizardStep;
use crate::setup::projects::{ProjectFetchOutcome, ProjectsManager};
use crate::shared::{WizardError, WizardLog};
use crate::workflow::{
    apply_boundary_fields, seed_workflow_states, states_from_configuration, WorkflowState,
    WorkflowStateList,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    /// Editing a stored configuration. Names are immutable once created, so
    /// updates are keyed by `original_name`.
    Edit { original_name: String },
}

impl WizardMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, WizardMode::Edit { .. })
    }

    pub fn original_name(&self) -> Option<&str> {
        match self {
            WizardMode::Create => None,
            WizardMode::Edit { original_name } => Some(original_name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepErrors {
    pub credentials: Option<String>,
    pub project: Option<String>,
}

impl StepErrors {
    pub fn get(&self, step: WizardStep) -> Option<&str> {
        match step {
            WizardStep::Credentials => self.credentials.as_deref(),
            WizardStep::Project => self.project.as_deref(),
        }
    }

    fn slot_mut(&mut self, step: WizardStep) -> &mut Option<String> {
        match step {
            WizardStep::Credentials => &mut self.credentials,
            WizardStep::Project => &mut self.project,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    FieldChanged(FormField),
    StepChanged(WizardStep),
    CredentialsValidityChanged(CredentialsValidity),
    NameAvailabilityChanged(Option<bool>),
    ProjectsChanged,
    ErrorChanged,
    Submitted { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&WizardEvent)>;

/// State container for the configuration wizard. Owns the form and every
/// derived signal; UI code reads through accessors and observes changes by
/// subscribing.
pub struct ConfigWizard<A: ConfigApi> {
    pub(crate) api: A,
    pub(crate) mode: WizardMode,
    pub(crate) form: FormDataStore,
    pub(crate) name_checker: NameAvailabilityChecker,
    pub(crate) credentials: CredentialsValidator,
    pub(crate) projects: ProjectsManager,
    pub(crate) step: WizardStep,
    pub(crate) step_errors: StepErrors,
    pub(crate) error: Option<String>,
    pub(crate) submitting: bool,
    pub(crate) workflow_states: Option<Vec<WorkflowState>>,
    pub(crate) log: WizardLog,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<A: ConfigApi> ConfigWizard<A> {
    pub fn new(api: A) -> Self {
        Self::with_parts(
            api,
            WizardMode::Create,
            FormDataStore::new(),
            NameAvailabilityChecker::new(DEFAULT_NAME_CHECK_DEBOUNCE),
            None,
        )
    }

    /// Opens an existing configuration for editing. Every field is copied;
    /// credentials still have to be re-checked before leaving the first step.
    pub fn edit(api: A, config: &JiraConfiguration) -> Self {
        let workflow_states = if config.workflow_states.is_empty() {
            None
        } else {
            Some(states_from_configuration(config).states().to_vec())
        };
        Self::with_parts(
            api,
            WizardMode::Edit {
                original_name: config.name.clone(),
            },
            FormDataStore::from_data(FormData::from_configuration(config)),
            NameAvailabilityChecker::for_edit(DEFAULT_NAME_CHECK_DEBOUNCE, &config.name),
            workflow_states,
        )
    }

    fn with_parts(
        api: A,
        mode: WizardMode,
        form: FormDataStore,
        name_checker: NameAvailabilityChecker,
        workflow_states: Option<Vec<WorkflowState>>,
    ) -> Self {
        Self {
            api,
            mode,
            form,
            name_checker,
            credentials: CredentialsValidator::new(),
            projects: ProjectsManager::new(),
            step: WizardStep::Credentials,
            step_errors: StepErrors::default(),
            error: None,
            submitting: false,
            workflow_states,
            log: WizardLog::disabled(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_name_check_delay(mut self, delay: Duration) -> Self {
        self.name_checker.set_delay(delay);
        self
    }

    pub fn with_log(mut self, log: WizardLog) -> Self {
        self.log = log;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn form(&self) -> &FormData {
        self.form.data()
    }

    pub fn field(&self, field: FormField) -> &str {
        self.form.get(field)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn step_errors(&self) -> &StepErrors {
        &self.step_errors
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn credentials_validity(&self) -> CredentialsValidity {
        self.credentials.validity()
    }

    pub fn credentials_valid(&self) -> bool {
        self.credentials.is_valid()
    }

    pub fn name_availability(&self) -> Option<bool> {
        self.name_checker.availability()
    }

    pub fn is_checking_name(&self) -> bool {
        self.name_checker.is_checking()
    }

    /// When the scheduled name check becomes due, for driving a timer.
    pub fn next_name_check_due(&self) -> Option<Instant> {
        self.name_checker.next_due()
    }

    pub fn projects(&self) -> &[JiraProject] {
        self.projects.projects()
    }

    pub fn selected_project(&self) -> Option<&JiraProject> {
        self.projects.selected_project(&self.form)
    }

    pub fn is_loading_projects(&self) -> bool {
        self.projects.is_loading()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn workflow_states(&self) -> Option<&[WorkflowState]> {
        self.workflow_states.as_deref()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&WizardEvent) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    pub(crate) fn emit(&mut self, event: WizardEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub(crate) fn emit_field_updates(&mut self, updates: &[FieldUpdate]) {
        for update in updates.iter().filter(|update| update.changed) {
            self.emit(WizardEvent::FieldChanged(update.field));
        }
    }

    pub(crate) fn set_step(&mut self, step: WizardStep) {
        if self.step != step {
            self.step = step;
            self.emit(WizardEvent::StepChanged(step));
        }
    }

    pub(crate) fn set_step_error(&mut self, step: WizardStep, message: Option<String>) {
        let slot = self.step_errors.slot_mut(step);
        if *slot != message {
            *slot = message;
            self.emit(WizardEvent::ErrorChanged);
        }
    }

    pub(crate) fn set_error(&mut self, message: Option<String>) {
        if self.error != message {
            self.error = message;
            self.emit(WizardEvent::ErrorChanged);
        }
    }

    /// Single write path for UI edits. Credential edits drop validity
    /// immediately and send a later step back to the credentials step; name
    /// edits in create mode forget the last availability.
    pub fn update_field(&mut self, field: FormField, value: &str) {
        let update = self.form.update_field(field, value);
        if !update.changed {
            return;
        }
        self.emit(WizardEvent::FieldChanged(field));

        if field.is_credential() {
            self.projects.invalidate();
            if self.credentials.invalidate() {
                self.emit(WizardEvent::CredentialsValidityChanged(
                    self.credentials.validity(),
                ));
            }
            if self.step != WizardStep::Credentials {
                self.log.info(
                    "credentials_changed",
                    &format!("{} edited on the {} step", field.as_str(), self.step),
                );
                self.set_step(WizardStep::Credentials);
            }
        }

        if field == FormField::Name && !self.mode.is_edit() {
            let previous = self.name_checker.availability();
            self.name_checker.reset();
            if previous.is_some() {
                self.emit(WizardEvent::NameAvailabilityChanged(None));
            }
        }
    }

    /// Schedules a debounced uniqueness check for `name`.
    pub fn check_name_availability(&mut self, name: &str, now: Instant) {
        let previous = self.name_checker.availability();
        let immediate = self.name_checker.check_name_availability(name, now);
        if immediate != previous {
            self.emit(WizardEvent::NameAvailabilityChanged(immediate));
        }
    }

    /// Runs the scheduled name check once its debounce window has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<NameCheckOutcome> {
        let previous = self.name_checker.availability();
        let (request, outcome) = self.name_checker.run_due(&self.api, now)?;
        match &outcome {
            NameCheckOutcome::Resolved { .. } => {}
            NameCheckOutcome::Failed(reason) => {
                self.log.error(
                    "name_check_failed",
                    &format!("name `{}`: {reason}", request.name()),
                );
            }
            NameCheckOutcome::Stale => {
                self.log
                    .info("name_check_stale", &format!("discarded `{}`", request.name()));
            }
        }
        let current = self.name_checker.availability();
        if current != previous {
            self.emit(WizardEvent::NameAvailabilityChanged(current));
        }
        Some(outcome)
    }

    /// Validates credentials and loads their projects. On failure the error
    /// is recorded on the credentials step and returned so a step transition
    /// can stay put.
    pub fn validate_credentials<F>(&mut self, on_success: F) -> Result<(), WizardError>
    where
        F: FnOnce(&[JiraProject]),
    {
        let previous = self.credentials.validity();
        let credentials = self.form.data().credentials();
        let result = self.credentials.validate_credentials(
            &self.api,
            &credentials,
            &mut self.projects,
            &mut self.form,
        );
        match result {
            Ok(updates) => {
                self.on_credentials_accepted(previous, true, &updates);
                on_success(self.projects.projects());
                Ok(())
            }
            Err(failure) => {
                let cause = failure.cause.to_string();
                self.on_credentials_rejected(previous, &failure.message, &cause);
                Err(WizardError::CredentialsRejected(failure.message))
            }
        }
    }

    /// Treats a successful project fetch as proof the credentials work.
    pub fn check_credentials<F>(&mut self, on_success: F) -> Result<(), WizardError>
    where
        F: FnOnce(&[JiraProject]),
    {
        let previous = self.credentials.validity();
        let credentials = self.form.data().credentials();
        let result = self.credentials.check_credentials(
            &self.api,
            &credentials,
            &mut self.projects,
            &mut self.form,
        );
        match result {
            Ok(ProjectFetchOutcome::InFlight) => Ok(()),
            Ok(outcome) => {
                let updates = self.selection_updates(&outcome);
                let reloaded = matches!(outcome, ProjectFetchOutcome::Loaded { .. });
                self.on_credentials_accepted(previous, reloaded, &updates);
                on_success(self.projects.projects());
                Ok(())
            }
            Err(failure) => {
                let cause = failure.cause.to_string();
                self.on_credentials_rejected(previous, &failure.message, &cause);
                Err(WizardError::CredentialsRejected(failure.message))
            }
        }
    }

    fn selection_updates(&self, outcome: &ProjectFetchOutcome) -> Vec<FieldUpdate> {
        match outcome {
            ProjectFetchOutcome::Loaded {
                auto_selected: true,
                ..
            } => vec![
                FieldUpdate {
                    field: FormField::ProjectKey,
                    changed: true,
                },
                FieldUpdate {
                    field: FormField::JqlQuery,
                    changed: true,
                },
            ],
            _ => Vec::new(),
        }
    }

    fn on_credentials_accepted(
        &mut self,
        previous: CredentialsValidity,
        reloaded: bool,
        updates: &[FieldUpdate],
    ) {
        if reloaded {
            self.emit(WizardEvent::ProjectsChanged);
        }
        self.emit_field_updates(updates);
        if previous != CredentialsValidity::Valid {
            self.emit(WizardEvent::CredentialsValidityChanged(
                CredentialsValidity::Valid,
            ));
        }
        self.set_step_error(WizardStep::Credentials, None);
        self.set_error(None);
        self.log.info(
            "credentials_validated",
            &format!("{} project(s) available", self.projects.projects().len()),
        );
    }

    fn on_credentials_rejected(
        &mut self,
        previous: CredentialsValidity,
        message: &str,
        cause: &str,
    ) {
        if previous != CredentialsValidity::Invalid {
            self.emit(WizardEvent::CredentialsValidityChanged(
                CredentialsValidity::Invalid,
            ));
        }
        self.set_step_error(WizardStep::Credentials, Some(message.to_string()));
        self.set_error(Some(message.to_string()));
        self.log.error("credentials_rejected", cause);
    }

    /// Loads projects for the current credentials unless a fetch is running
    /// or the list is already current. Failures surface as the top-level
    /// error; the previous list is kept.
    pub fn fetch_projects(&mut self) -> ProjectFetchOutcome {
        let credentials = self.form.data().credentials();
        let outcome = self
            .projects
            .fetch_projects(&self.api, &credentials, &mut self.form);
        match &outcome {
            ProjectFetchOutcome::Loaded { .. } => {
                let updates = self.selection_updates(&outcome);
                self.emit(WizardEvent::ProjectsChanged);
                self.emit_field_updates(&updates);
                self.set_error(None);
            }
            ProjectFetchOutcome::Failed(message) => {
                self.log.error("project_fetch_failed", message);
                self.set_error(Some(message.clone()));
            }
            ProjectFetchOutcome::InFlight
            | ProjectFetchOutcome::AlreadyLoaded
            | ProjectFetchOutcome::Stale => {}
        }
        outcome
    }

    /// Selects a project and rewrites the JQL query for it.
    pub fn select_project(&mut self, key: &str) {
        let updates = self.projects.select_project(key, &mut self.form);
        self.emit_field_updates(&updates);
    }

    /// Seeds a state list from the selected project's Jira statuses.
    pub fn load_workflow_states(&self) -> Result<WorkflowStateList, WizardError> {
        let project_key = self.form.get(FormField::ProjectKey).trim().to_string();
        if project_key.is_empty() {
            return Err(WizardError::NoProjectSelected);
        }
        let statuses = match &self.mode {
            WizardMode::Edit { original_name } => {
                self.api.get_workflows(&project_key, original_name)
            }
            WizardMode::Create => self
                .api
                .get_workflows_with_credentials(&self.form.data().credentials(), &project_key),
        };
        match statuses {
            Ok(statuses) => Ok(seed_workflow_states(&statuses)),
            Err(source) => {
                self.log.error(
                    "workflow_fetch_failed",
                    &format!("project {project_key}: {source}"),
                );
                Err(WizardError::WorkflowFetch {
                    project_key,
                    source,
                })
            }
        }
    }

    /// Takes the edited state list and folds its boundaries into the form.
    pub fn apply_workflow_states(&mut self, states: &[WorkflowState]) {
        self.workflow_states = Some(states.to_vec());
        let updates = apply_boundary_fields(states, &mut self.form);
        self.emit_field_updates(&updates);
    }
}
