use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("credential validation failed: {0}")]
    CredentialsRejected(String),
    #[error("no project is selected")]
    NoProjectSelected,
    #[error("failed to load workflow statuses for project {project_key}: {source}")]
    WorkflowFetch {
        project_key: String,
        #[source]
        source: ApiError,
    },
}
