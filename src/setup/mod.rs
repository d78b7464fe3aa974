pub mod credentials;
pub mod form_data;
pub mod name_check;
pub mod navigation;
pub mod projects;
pub mod step_validation;
pub mod submission;
pub mod wizard;

pub use credentials::{credential_error_message, CredentialsValidator, CredentialsValidity};
pub use form_data::{FieldUpdate, FormData, FormDataStore, FormField, ALL_FORM_FIELDS};
pub use name_check::{NameAvailabilityChecker, NameCheckOutcome, DEFAULT_NAME_CHECK_DEBOUNCE};
pub use navigation::{StepOutcome, WizardStep, ALL_WIZARD_STEPS};
pub use projects::{default_jql, ProjectFetchOutcome, ProjectsManager};
pub use step_validation::{validate_step, StepValidation};
pub use submission::SubmitOutcome;
pub use wizard::{ConfigWizard, StepErrors, SubscriptionId, WizardEvent, WizardMode};
