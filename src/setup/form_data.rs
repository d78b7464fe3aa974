use crate::api::{JiraConfiguration, JiraCredentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    JiraServer,
    JiraEmail,
    JiraApiToken,
    JqlQuery,
    ProjectKey,
    LeadTimeStartState,
    LeadTimeEndState,
    CycleTimeStartState,
    CycleTimeEndState,
}

pub const ALL_FORM_FIELDS: [FormField; 10] = [
    FormField::Name,
    FormField::JiraServer,
    FormField::JiraEmail,
    FormField::JiraApiToken,
    FormField::JqlQuery,
    FormField::ProjectKey,
    FormField::LeadTimeStartState,
    FormField::LeadTimeEndState,
    FormField::CycleTimeStartState,
    FormField::CycleTimeEndState,
];

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::JiraServer => "jira_server",
            FormField::JiraEmail => "jira_email",
            FormField::JiraApiToken => "jira_api_token",
            FormField::JqlQuery => "jql_query",
            FormField::ProjectKey => "project_key",
            FormField::LeadTimeStartState => "lead_time_start_state",
            FormField::LeadTimeEndState => "lead_time_end_state",
            FormField::CycleTimeStartState => "cycle_time_start_state",
            FormField::CycleTimeEndState => "cycle_time_end_state",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        ALL_FORM_FIELDS
            .iter()
            .copied()
            .find(|field| field.as_str() == raw.trim())
            .ok_or_else(|| format!("unknown form field `{raw}`"))
    }

    /// Fields whose change invalidates a previous credential check.
    pub fn is_credential(self) -> bool {
        matches!(
            self,
            FormField::JiraServer | FormField::JiraEmail | FormField::JiraApiToken
        )
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat editable configuration. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub jira_server: String,
    pub jira_email: String,
    pub jira_api_token: String,
    pub jql_query: String,
    pub project_key: String,
    pub lead_time_start_state: String,
    pub lead_time_end_state: String,
    pub cycle_time_start_state: String,
    pub cycle_time_end_state: String,
}

impl FormData {
    pub fn from_configuration(config: &JiraConfiguration) -> Self {
        Self {
            name: config.name.clone(),
            jira_server: config.jira_server.clone(),
            jira_email: config.jira_email.clone(),
            jira_api_token: config.jira_api_token.clone(),
            jql_query: config.jql_query.clone(),
            project_key: config.project_key.clone(),
            lead_time_start_state: config.lead_time_start_state.clone(),
            lead_time_end_state: config.lead_time_end_state.clone(),
            cycle_time_start_state: config.cycle_time_start_state.clone(),
            cycle_time_end_state: config.cycle_time_end_state.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::JiraServer => &self.jira_server,
            FormField::JiraEmail => &self.jira_email,
            FormField::JiraApiToken => &self.jira_api_token,
            FormField::JqlQuery => &self.jql_query,
            FormField::ProjectKey => &self.project_key,
            FormField::LeadTimeStartState => &self.lead_time_start_state,
            FormField::LeadTimeEndState => &self.lead_time_end_state,
            FormField::CycleTimeStartState => &self.cycle_time_start_state,
            FormField::CycleTimeEndState => &self.cycle_time_end_state,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::JiraServer => &mut self.jira_server,
            FormField::JiraEmail => &mut self.jira_email,
            FormField::JiraApiToken => &mut self.jira_api_token,
            FormField::JqlQuery => &mut self.jql_query,
            FormField::ProjectKey => &mut self.project_key,
            FormField::LeadTimeStartState => &mut self.lead_time_start_state,
            FormField::LeadTimeEndState => &mut self.lead_time_end_state,
            FormField::CycleTimeStartState => &mut self.cycle_time_start_state,
            FormField::CycleTimeEndState => &mut self.cycle_time_end_state,
        }
    }

    pub fn credentials(&self) -> JiraCredentials {
        JiraCredentials {
            name: self.name.clone(),
            jira_server: self.jira_server.clone(),
            jira_email: self.jira_email.clone(),
            jira_api_token: self.jira_api_token.clone(),
        }
    }

    pub fn to_configuration(&self, workflow_states: Vec<String>) -> JiraConfiguration {
        JiraConfiguration {
            name: self.name.clone(),
            jira_server: self.jira_server.clone(),
            jira_email: self.jira_email.clone(),
            jira_api_token: self.jira_api_token.clone(),
            jql_query: self.jql_query.clone(),
            project_key: self.project_key.clone(),
            lead_time_start_state: self.lead_time_start_state.clone(),
            lead_time_end_state: self.lead_time_end_state.clone(),
            cycle_time_start_state: self.cycle_time_start_state.clone(),
            cycle_time_end_state: self.cycle_time_end_state.clone(),
            workflow_states,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: FormField,
    pub changed: bool,
}

/// Sole owner of the form. Every write goes through `update_field`.
#[derive(Debug, Clone, Default)]
pub struct FormDataStore {
    data: FormData,
}

impl FormDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: FormData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn get(&self, field: FormField) -> &str {
        self.data.get(field)
    }

    pub fn update_field(&mut self, field: FormField, value: &str) -> FieldUpdate {
        let slot = self.data.slot_mut(field);
        let changed = slot != value;
        if changed {
            *slot = value.to_string();
        }
        FieldUpdate { field, changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_field_reports_whether_value_changed() {
        let mut store = FormDataStore::new();
        let first = store.update_field(FormField::JiraEmail, "dev@example.com");
        let repeat = store.update_field(FormField::JiraEmail, "dev@example.com");
        assert!(first.changed);
        assert!(!repeat.changed);
        assert_eq!(store.data().jira_email, "dev@example.com");
    }

    #[test]
    fn field_names_round_trip_through_parse() {
        for field in ALL_FORM_FIELDS {
            assert_eq!(FormField::parse(field.as_str()), Ok(field));
        }
        assert!(FormField::parse("favorite_color").is_err());
    }

    #[test]
    fn only_server_email_and_token_are_credential_fields() {
        let credential_fields = ALL_FORM_FIELDS
            .iter()
            .filter(|field| field.is_credential())
            .count();
        assert_eq!(credential_fields, 3);
        assert!(!FormField::Name.is_credential());
    }

    #[test]
    fn configuration_copy_preserves_every_field() {
        let config = JiraConfiguration {
            name: "Team A".to_string(),
            jira_server: "https://jira.example".to_string(),
            jira_email: "a@example.com".to_string(),
            jira_api_token: "secret".to_string(),
            jql_query: "project = A".to_string(),
            project_key: "A".to_string(),
            lead_time_start_state: "To Do".to_string(),
            lead_time_end_state: "Done".to_string(),
            cycle_time_start_state: "In Progress".to_string(),
            cycle_time_end_state: "Done".to_string(),
            workflow_states: vec!["To Do".to_string(), "Done".to_string()],
        };
        let data = FormData::from_configuration(&config);
        assert_eq!(data.to_configuration(config.workflow_states.clone()), config);
    }
}
