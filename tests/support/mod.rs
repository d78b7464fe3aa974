#![allow(dead_code)]

use flowlens::api::{
    ApiError, ConfigApi, JiraConfiguration, JiraCredentials, JiraProject, ValidationResponse,
    WorkflowStatus,
};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Scripted backend. Queued responses are consumed first; once a queue is
/// empty the default answer applies.
#[derive(Debug, Default)]
pub struct FakeConfigApi {
    pub validations: RefCell<VecDeque<Result<ValidationResponse, ApiError>>>,
    pub project_results: RefCell<VecDeque<Result<Vec<JiraProject>, ApiError>>>,
    pub projects: Vec<JiraProject>,
    pub configurations: RefCell<Vec<JiraConfiguration>>,
    pub list_errors: RefCell<VecDeque<ApiError>>,
    pub save_error: Option<ApiError>,
    pub workflows: Vec<WorkflowStatus>,
    pub created: RefCell<Vec<JiraConfiguration>>,
    pub updated: RefCell<Vec<(String, JiraConfiguration)>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeConfigApi {
    pub fn with_projects(projects: &[(&str, &str)]) -> Self {
        Self {
            projects: projects
                .iter()
                .map(|(key, name)| JiraProject {
                    key: key.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_configuration(self, name: &str) -> Self {
        self.configurations.borrow_mut().push(JiraConfiguration {
            name: name.to_string(),
            ..JiraConfiguration::default()
        });
        self
    }

    pub fn with_workflows(mut self, statuses: &[(&str, &str)]) -> Self {
        self.workflows = statuses
            .iter()
            .map(|(name, category)| WorkflowStatus {
                name: name.to_string(),
                category: category.to_string(),
            })
            .collect();
        self
    }

    pub fn queue_validation(&self, result: Result<ValidationResponse, ApiError>) {
        self.validations.borrow_mut().push_back(result);
    }

    pub fn queue_projects(&self, result: Result<Vec<JiraProject>, ApiError>) {
        self.project_results.borrow_mut().push_back(result);
    }

    pub fn queue_list_error(&self, err: ApiError) {
        self.list_errors.borrow_mut().push_back(err);
    }

    pub fn count(&self, call: &str) -> usize {
        let prefix = format!("{call}:");
        self.calls
            .borrow()
            .iter()
            .filter(|recorded| recorded.as_str() == call || recorded.starts_with(&prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

pub fn status_error(status: u16) -> ApiError {
    ApiError::Status {
        status,
        message: String::new(),
    }
}

impl ConfigApi for FakeConfigApi {
    fn validate_credentials(
        &self,
        _credentials: &JiraCredentials,
    ) -> Result<ValidationResponse, ApiError> {
        self.record("validate_credentials".to_string());
        self.validations
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ValidationResponse::success()))
    }

    fn get_projects_with_credentials(
        &self,
        _credentials: &JiraCredentials,
    ) -> Result<Vec<JiraProject>, ApiError> {
        self.record("get_projects".to_string());
        self.project_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(self.projects.clone()))
    }

    fn list_configurations(&self) -> Result<Vec<JiraConfiguration>, ApiError> {
        self.record("list_configurations".to_string());
        if let Some(err) = self.list_errors.borrow_mut().pop_front() {
            return Err(err);
        }
        Ok(self.configurations.borrow().clone())
    }

    fn create_configuration(
        &self,
        config: &JiraConfiguration,
    ) -> Result<JiraConfiguration, ApiError> {
        self.record(format!("create_configuration:{}", config.name));
        if let Some(err) = &self.save_error {
            return Err(err.clone());
        }
        self.created.borrow_mut().push(config.clone());
        self.configurations.borrow_mut().push(config.clone());
        Ok(config.clone())
    }

    fn update_configuration(
        &self,
        name: &str,
        config: &JiraConfiguration,
    ) -> Result<JiraConfiguration, ApiError> {
        self.record(format!("update_configuration:{name}"));
        if let Some(err) = &self.save_error {
            return Err(err.clone());
        }
        self.updated
            .borrow_mut()
            .push((name.to_string(), config.clone()));
        Ok(config.clone())
    }

    fn get_workflows(
        &self,
        project_key: &str,
        config_name: &str,
    ) -> Result<Vec<WorkflowStatus>, ApiError> {
        self.record(format!("get_workflows:{project_key}:{config_name}"));
        Ok(self.workflows.clone())
    }

    fn get_workflows_with_credentials(
        &self,
        _credentials: &JiraCredentials,
        project_key: &str,
    ) -> Result<Vec<WorkflowStatus>, ApiError> {
        self.record(format!("get_workflows_with_credentials:{project_key}"));
        Ok(self.workflows.clone())
    }
}
