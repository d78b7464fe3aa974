use crate::setup::form_data::FormData;
use crate::setup::navigation::WizardStep;
use crate::setup::wizard::WizardMode;

pub const MSG_REQUIRED_FIELDS: &str = "Please fill in all required fields.";
pub const MSG_NAME_EXISTS: &str = "A configuration with this name already exists.";
pub const MSG_PROJECT_REQUIRED: &str = "Please select a project and enter a JQL query.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepValidation {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl StepValidation {
    fn ok() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.to_string()),
        }
    }
}

fn is_unset(value: &str) -> bool {
    value.trim().is_empty()
}

/// An unknown availability (`None`) passes; only a confirmed collision blocks.
pub fn validate_credentials_step(
    form: &FormData,
    mode: &WizardMode,
    name_available: Option<bool>,
) -> StepValidation {
    if [
        &form.name,
        &form.jira_server,
        &form.jira_email,
        &form.jira_api_token,
    ]
    .iter()
    .any(|value| is_unset(value))
    {
        return StepValidation::fail(MSG_REQUIRED_FIELDS);
    }
    if matches!(mode, WizardMode::Create) && name_available == Some(false) {
        return StepValidation::fail(MSG_NAME_EXISTS);
    }
    StepValidation::ok()
}

pub fn validate_project_step(form: &FormData) -> StepValidation {
    if is_unset(&form.project_key) || is_unset(&form.jql_query) {
        return StepValidation::fail(MSG_PROJECT_REQUIRED);
    }
    StepValidation::ok()
}

pub fn validate_step(
    step: WizardStep,
    form: &FormData,
    mode: &WizardMode,
    name_available: Option<bool>,
) -> StepValidation {
    match step {
        WizardStep::Credentials => validate_credentials_step(form, mode, name_available),
        WizardStep::Project => validate_project_step(form),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormData {
        FormData {
            name: "Team".to_string(),
            jira_server: "https://jira.example".to_string(),
            jira_email: "dev@example.com".to_string(),
            jira_api_token: "token".to_string(),
            ..FormData::default()
        }
    }

    #[test]
    fn credentials_step_requires_all_four_fields() {
        let mut form = filled();
        form.jira_api_token = "  ".to_string();
        let result = validate_credentials_step(&form, &WizardMode::Create, None);
        assert!(!result.is_valid);
        assert_eq!(result.error_message.as_deref(), Some(MSG_REQUIRED_FIELDS));
    }

    #[test]
    fn known_collision_blocks_only_in_create_mode() {
        let form = filled();
        let create = validate_credentials_step(&form, &WizardMode::Create, Some(false));
        assert_eq!(create.error_message.as_deref(), Some(MSG_NAME_EXISTS));

        let edit = WizardMode::Edit {
            original_name: "Team".to_string(),
        };
        assert!(validate_credentials_step(&form, &edit, Some(false)).is_valid);
    }

    #[test]
    fn unknown_availability_does_not_block() {
        assert!(validate_credentials_step(&filled(), &WizardMode::Create, None).is_valid);
    }

    #[test]
    fn project_step_needs_key_and_query() {
        let mut form = filled();
        form.project_key = "TEST".to_string();
        assert!(!validate_project_step(&form).is_valid);
        form.jql_query = "project = TEST".to_string();
        assert!(validate_step(WizardStep::Project, &form, &WizardMode::Create, None).is_valid);
    }
}
