use super::{
    ApiError, ConfigApi, JiraConfiguration, JiraCredentials, JiraProject, ValidationResponse,
    WorkflowStatus,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const API_BASE_ENV: &str = "FLOWLENS_API_BASE";

/// Blocking client for the dashboard backend.
#[derive(Debug, Clone)]
pub struct HttpConfigApi {
    api_base: String,
    agent: ureq::Agent,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpConfigApi {
    pub fn new(api_base: &str, timeout: Duration) -> Self {
        let api_base = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| api_base.to_string());
        Self::with_base(&api_base, timeout)
    }

    /// Builds a client for `api_base` without consulting the environment.
    pub fn with_base(api_base: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            api_base: api_base.to_string(),
            agent,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut request = self.agent.get(&self.endpoint(path));
        for (key, value) in query {
            request = request.query(key, value);
        }
        decode(request.call())
    }

    fn send_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .agent
            .request(method, &self.endpoint(path))
            .send_json(body);
        decode(response)
    }
}

fn decode<T: for<'de> Deserialize<'de>>(
    response: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    match response {
        Ok(response) => response
            .into_json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            let raw = response.into_string().unwrap_or_default();
            Err(ApiError::Status {
                status,
                message: error_message_from_body(&raw),
            })
        }
        Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport(transport.to_string())),
    }
}

fn error_message_from_body(raw: &str) -> String {
    let Ok(body) = serde_json::from_str::<ErrorBody>(raw) else {
        return raw.trim().to_string();
    };
    match (body.detail, body.message) {
        (Some(serde_json::Value::String(detail)), _) => detail,
        (Some(detail), _) => detail.to_string(),
        (None, Some(message)) => message,
        (None, None) => raw.trim().to_string(),
    }
}

impl ConfigApi for HttpConfigApi {
    fn validate_credentials(
        &self,
        credentials: &JiraCredentials,
    ) -> Result<ValidationResponse, ApiError> {
        self.send_json("POST", "api/jira/validate-credentials", credentials)
    }

    fn get_projects_with_credentials(
        &self,
        credentials: &JiraCredentials,
    ) -> Result<Vec<JiraProject>, ApiError> {
        self.send_json("POST", "api/jira/projects", credentials)
    }

    fn list_configurations(&self) -> Result<Vec<JiraConfiguration>, ApiError> {
        self.get_json("api/configurations", &[])
    }

    fn create_configuration(
        &self,
        config: &JiraConfiguration,
    ) -> Result<JiraConfiguration, ApiError> {
        self.send_json("POST", "api/configurations", config)
    }

    fn update_configuration(
        &self,
        name: &str,
        config: &JiraConfiguration,
    ) -> Result<JiraConfiguration, ApiError> {
        let path = format!("api/configurations/{}", urlencoding::encode(name));
        self.send_json("PUT", &path, config)
    }

    fn get_workflows(
        &self,
        project_key: &str,
        config_name: &str,
    ) -> Result<Vec<WorkflowStatus>, ApiError> {
        let path = format!(
            "api/jira/projects/{}/workflows",
            urlencoding::encode(project_key)
        );
        self.get_json(&path, &[("config_name", config_name)])
    }

    fn get_workflows_with_credentials(
        &self,
        credentials: &JiraCredentials,
        project_key: &str,
    ) -> Result<Vec<WorkflowStatus>, ApiError> {
        let path = format!(
            "api/jira/projects/{}/workflows",
            urlencoding::encode(project_key)
        );
        self.send_json("POST", &path, credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path_with_single_slash() {
        let api = HttpConfigApi::with_base("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(
            api.endpoint("/api/configurations"),
            "http://localhost:8000/api/configurations"
        );
    }

    #[test]
    fn error_body_prefers_detail_then_message_then_raw() {
        assert_eq!(
            error_message_from_body(r#"{"detail":"Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(
            error_message_from_body(r#"{"message":"forbidden"}"#),
            "forbidden"
        );
        assert_eq!(error_message_from_body("gateway timeout\n"), "gateway timeout");
    }
}
