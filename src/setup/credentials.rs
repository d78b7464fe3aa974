use crate::api::{ApiError, ConfigApi, JiraCredentials, ValidationStatus};
use crate::setup::form_data::{FieldUpdate, FormDataStore};
use crate::setup::projects::{credentials_fingerprint, ProjectFetchOutcome, ProjectsManager};

pub const MSG_INVALID_CREDENTIALS: &str =
    "Invalid credentials. Please check your email and API token.";
pub const MSG_INSUFFICIENT_PERMISSION: &str =
    "Insufficient permissions. Your Jira account cannot access this resource.";
pub const MSG_SERVER_NOT_FOUND: &str = "Jira server not found. Please check the server URL.";
pub const MSG_VALIDATION_FAILED: &str = "Failed to validate credentials. Please try again.";

/// Maps a backend failure to the message shown next to the credentials form.
pub fn credential_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 401, .. } => MSG_INVALID_CREDENTIALS.to_string(),
        ApiError::Status { status: 403, .. } => MSG_INSUFFICIENT_PERMISSION.to_string(),
        ApiError::Status { status: 404, .. } => MSG_SERVER_NOT_FOUND.to_string(),
        ApiError::Rejected(message) if !message.trim().is_empty() => message.clone(),
        _ => MSG_VALIDATION_FAILED.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsValidity {
    #[default]
    Unchecked,
    Valid,
    Invalid,
}

impl CredentialsValidity {
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialsValidity::Unchecked => "unchecked",
            CredentialsValidity::Valid => "valid",
            CredentialsValidity::Invalid => "invalid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsFailure {
    pub message: String,
    pub cause: ApiError,
}

impl CredentialsFailure {
    fn from_api(cause: ApiError) -> Self {
        Self {
            message: credential_error_message(&cause),
            cause,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CredentialsValidator {
    validity: CredentialsValidity,
}

impl CredentialsValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validity(&self) -> CredentialsValidity {
        self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity == CredentialsValidity::Valid
    }

    /// Drops a previous verdict after a credential field edit. Returns true
    /// when the validity actually changed.
    pub fn invalidate(&mut self) -> bool {
        let previous = self.validity;
        self.validity = CredentialsValidity::Unchecked;
        previous != self.validity
    }

    /// Full round trip: explicit validation, then a project list fetch. Both
    /// must succeed before the credentials count as valid. Returns the form
    /// fields touched by project auto-selection.
    pub fn validate_credentials<A: ConfigApi>(
        &mut self,
        api: &A,
        credentials: &JiraCredentials,
        projects: &mut ProjectsManager,
        form: &mut FormDataStore,
    ) -> Result<Vec<FieldUpdate>, CredentialsFailure> {
        let verdict = api
            .validate_credentials(credentials)
            .and_then(|response| match response.status {
                ValidationStatus::Success => Ok(()),
                ValidationStatus::Error => {
                    Err(ApiError::Rejected(response.message.unwrap_or_default()))
                }
            });
        if let Err(cause) = verdict {
            self.validity = CredentialsValidity::Invalid;
            return Err(CredentialsFailure::from_api(cause));
        }

        match api.get_projects_with_credentials(credentials) {
            Ok(list) => {
                projects.invalidate();
                let updates =
                    projects.replace_projects(list, credentials_fingerprint(credentials), form);
                self.validity = CredentialsValidity::Valid;
                Ok(updates)
            }
            Err(cause) => {
                self.validity = CredentialsValidity::Invalid;
                Err(CredentialsFailure::from_api(cause))
            }
        }
    }

    /// Lighter check: a successful project fetch stands in for validation.
    pub fn check_credentials<A: ConfigApi>(
        &mut self,
        api: &A,
        credentials: &JiraCredentials,
        projects: &mut ProjectsManager,
        form: &mut FormDataStore,
    ) -> Result<ProjectFetchOutcome, CredentialsFailure> {
        let ticket = match projects.begin_fetch(credentials) {
            Ok(ticket) => ticket,
            Err(ProjectFetchOutcome::AlreadyLoaded) => {
                self.validity = CredentialsValidity::Valid;
                return Ok(ProjectFetchOutcome::AlreadyLoaded);
            }
            Err(outcome) => return Ok(outcome),
        };
        match api.get_projects_with_credentials(credentials) {
            Ok(list) => {
                let outcome = projects.finish_fetch(&ticket, Ok(list), form);
                self.validity = CredentialsValidity::Valid;
                Ok(outcome)
            }
            Err(cause) => {
                projects.finish_fetch(&ticket, Err(cause.clone()), form);
                self.validity = CredentialsValidity::Invalid;
                Err(CredentialsFailure::from_api(cause))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            message: String::new(),
        }
    }

    #[test]
    fn status_codes_map_to_user_messages() {
        assert_eq!(credential_error_message(&status(401)), MSG_INVALID_CREDENTIALS);
        assert_eq!(
            credential_error_message(&status(403)),
            MSG_INSUFFICIENT_PERMISSION
        );
        assert_eq!(credential_error_message(&status(404)), MSG_SERVER_NOT_FOUND);
        assert_eq!(credential_error_message(&status(500)), MSG_VALIDATION_FAILED);
        assert_eq!(
            credential_error_message(&ApiError::Transport("timeout".to_string())),
            MSG_VALIDATION_FAILED
        );
    }

    #[test]
    fn explicit_rejection_keeps_backend_message() {
        assert_eq!(
            credential_error_message(&ApiError::Rejected("Token expired".to_string())),
            "Token expired"
        );
        assert_eq!(
            credential_error_message(&ApiError::Rejected(" ".to_string())),
            MSG_VALIDATION_FAILED
        );
    }

    #[test]
    fn invalidate_reports_change_only_from_checked_states() {
        let mut validator = CredentialsValidator::new();
        assert!(!validator.invalidate());
        validator.validity = CredentialsValidity::Valid;
        assert!(validator.invalidate());
        assert_eq!(validator.validity(), CredentialsValidity::Unchecked);
    }
}
