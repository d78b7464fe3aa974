use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraCredentials {
    pub name: String,
    pub jira_server: String,
    pub jira_email: String,
    pub jira_api_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub status: ValidationStatus,
    #[serde(default)]
    pub message: Option<String>,
}

impl ValidationResponse {
    pub fn success() -> Self {
        Self {
            status: ValidationStatus::Success,
            message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: ValidationStatus::Error,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraProject {
    pub key: String,
    pub name: String,
}

/// A persisted metrics configuration as the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraConfiguration {
    pub name: String,
    pub jira_server: String,
    pub jira_email: String,
    #[serde(default)]
    pub jira_api_token: String,
    #[serde(default)]
    pub jql_query: String,
    #[serde(default)]
    pub project_key: String,
    #[serde(default)]
    pub lead_time_start_state: String,
    #[serde(default)]
    pub lead_time_end_state: String,
    #[serde(default)]
    pub cycle_time_start_state: String,
    #[serde(default)]
    pub cycle_time_end_state: String,
    #[serde(default)]
    pub workflow_states: Vec<String>,
}

/// A Jira status as reported for a project's workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStatus {
    pub name: String,
    #[serde(default)]
    pub category: String,
}
