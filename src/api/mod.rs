pub mod client;
pub mod models;

pub use client::{HttpConfigApi, DEFAULT_API_BASE};
pub use models::{
    JiraConfiguration, JiraCredentials, JiraProject, ValidationResponse, ValidationStatus,
    WorkflowStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("api responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("api request failed: {0}")]
    Transport(String),
    #[error("failed to decode api response: {0}")]
    Decode(String),
    #[error("api rejected the request: {0}")]
    Rejected(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Backend operations the configuration wizard depends on. The wizard never
/// talks to Jira directly; every call goes through the dashboard backend.
pub trait ConfigApi {
    fn validate_credentials(
        &self,
        credentials: &JiraCredentials,
    ) -> Result<ValidationResponse, ApiError>;

    fn get_projects_with_credentials(
        &self,
        credentials: &JiraCredentials,
    ) -> Result<Vec<JiraProject>, ApiError>;

    fn list_configurations(&self) -> Result<Vec<JiraConfiguration>, ApiError>;

    fn create_configuration(
        &self,
        config: &JiraConfiguration,
    ) -> Result<JiraConfiguration, ApiError>;

    fn update_configuration(
        &self,
        name: &str,
        config: &JiraConfiguration,
    ) -> Result<JiraConfiguration, ApiError>;

    fn get_workflows(
        &self,
        project_key: &str,
        config_name: &str,
    ) -> Result<Vec<WorkflowStatus>, ApiError>;

    fn get_workflows_with_credentials(
        &self,
        credentials: &JiraCredentials,
        project_key: &str,
    ) -> Result<Vec<WorkflowStatus>, ApiError>;
}
