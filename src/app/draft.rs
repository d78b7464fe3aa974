use crate::setup::FormField;
use crate::workflow::WorkflowStateList;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DraftState {
    pub name: String,
    #[serde(default)]
    pub start: bool,
    #[serde(default)]
    pub end: bool,
}

/// Wizard input read from YAML. Every field is optional so the same file
/// shape works for creating and for partially overriding on edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WizardDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub jira_server: Option<String>,
    #[serde(default)]
    pub jira_email: Option<String>,
    #[serde(default)]
    pub jira_api_token: Option<String>,
    /// Environment variable holding the API token, used when
    /// `jira_api_token` is absent.
    #[serde(default)]
    pub jira_api_token_env: Option<String>,
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub jql_query: Option<String>,
    #[serde(default)]
    pub workflow_states: Vec<DraftState>,
}

impl WizardDraft {
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("failed to read draft {}: {e}", path.display()))?;
        Self::parse(&raw).map_err(|e| format!("invalid draft {}: {e}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_yaml::from_str(raw).map_err(|e| e.to_string())
    }

    fn api_token(&self) -> Result<Option<String>, String> {
        if let Some(token) = &self.jira_api_token {
            return Ok(Some(token.clone()));
        }
        match &self.jira_api_token_env {
            Some(var) => std::env::var(var)
                .map(Some)
                .map_err(|_| format!("environment variable `{var}` is not set")),
            None => Ok(None),
        }
    }

    /// Values for the first wizard step, in form order.
    pub fn credential_fields(&self) -> Result<Vec<(FormField, String)>, String> {
        let mut fields = Vec::new();
        let pairs = [
            (FormField::Name, self.name.clone()),
            (FormField::JiraServer, self.jira_server.clone()),
            (FormField::JiraEmail, self.jira_email.clone()),
            (FormField::JiraApiToken, self.api_token()?),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                fields.push((field, value));
            }
        }
        Ok(fields)
    }

    pub fn state_list(&self) -> Option<WorkflowStateList> {
        if self.workflow_states.is_empty() {
            return None;
        }
        let mut list = WorkflowStateList::new();
        for state in &self.workflow_states {
            let name = state.name.trim();
            if !name.is_empty() {
                list.push_marked(name, state.start, state.end);
            }
        }
        Some(list)
    }
}
