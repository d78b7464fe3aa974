use crate::api::{ApiError, ConfigApi, JiraCredentials, JiraProject};
use crate::setup::credentials::credential_error_message;
use crate::setup::form_data::{FieldUpdate, FormDataStore, FormField};
use sha2::{Digest, Sha256};

pub fn default_jql(project_key: &str) -> String {
    format!("project = {project_key} AND type = Story")
}

/// Identifies a credential set without keeping the token around in clear.
pub fn credentials_fingerprint(credentials: &JiraCredentials) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credentials.jira_server.as_bytes());
    hasher.update([0]);
    hasher.update(credentials.jira_email.as_bytes());
    hasher.update([0]);
    hasher.update(credentials.jira_api_token.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    const HEX: &[u8; 16] = b"0123456789abcdef";
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFetchTicket {
    seq: u64,
    fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectFetchOutcome {
    Loaded { count: usize, auto_selected: bool },
    InFlight,
    AlreadyLoaded,
    Stale,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct ProjectsManager {
    projects: Vec<JiraProject>,
    loading: Option<ProjectFetchTicket>,
    loaded_for: Option<String>,
    error: Option<String>,
    seq: u64,
}

impl ProjectsManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[JiraProject] {
        &self.projects
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loaded_for(&self, credentials: &JiraCredentials) -> bool {
        self.loaded_for.as_deref() == Some(credentials_fingerprint(credentials).as_str())
    }

    pub fn selected_project<'a>(&'a self, form: &FormDataStore) -> Option<&'a JiraProject> {
        let key = form.get(FormField::ProjectKey);
        self.projects.iter().find(|project| project.key == key)
    }

    /// Starts a fetch unless one is already running or the list is current
    /// for these credentials.
    pub fn begin_fetch(
        &mut self,
        credentials: &JiraCredentials,
    ) -> Result<ProjectFetchTicket, ProjectFetchOutcome> {
        if self.loading.is_some() {
            return Err(ProjectFetchOutcome::InFlight);
        }
        let fingerprint = credentials_fingerprint(credentials);
        if self.loaded_for.as_deref() == Some(fingerprint.as_str()) {
            return Err(ProjectFetchOutcome::AlreadyLoaded);
        }
        self.seq += 1;
        let ticket = ProjectFetchTicket {
            seq: self.seq,
            fingerprint,
        };
        self.loading = Some(ticket.clone());
        Ok(ticket)
    }

    pub fn finish_fetch(
        &mut self,
        ticket: &ProjectFetchTicket,
        result: Result<Vec<JiraProject>, ApiError>,
        form: &mut FormDataStore,
    ) -> ProjectFetchOutcome {
        if self.loading.as_ref() != Some(ticket) {
            return ProjectFetchOutcome::Stale;
        }
        self.loading = None;
        match result {
            Ok(projects) => {
                let count = projects.len();
                let updates = self.replace_projects(projects, ticket.fingerprint.clone(), form);
                ProjectFetchOutcome::Loaded {
                    count,
                    auto_selected: !updates.is_empty(),
                }
            }
            Err(err) => {
                let message = credential_error_message(&err);
                self.error = Some(message.clone());
                ProjectFetchOutcome::Failed(message)
            }
        }
    }

    pub fn fetch_projects<A: ConfigApi>(
        &mut self,
        api: &A,
        credentials: &JiraCredentials,
        form: &mut FormDataStore,
    ) -> ProjectFetchOutcome {
        let ticket = match self.begin_fetch(credentials) {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let result = api.get_projects_with_credentials(credentials);
        self.finish_fetch(&ticket, result, form)
    }

    /// Installs a freshly fetched list. Auto-selects the first project when
    /// none is selected and returns the form fields that selection touched.
    pub fn replace_projects(
        &mut self,
        projects: Vec<JiraProject>,
        fingerprint: String,
        form: &mut FormDataStore,
    ) -> Vec<FieldUpdate> {
        self.projects = projects;
        self.loaded_for = Some(fingerprint);
        self.error = None;
        if !form.get(FormField::ProjectKey).is_empty() {
            return Vec::new();
        }
        match self.projects.first().map(|project| project.key.clone()) {
            Some(key) => self.select_project(&key, form),
            None => Vec::new(),
        }
    }

    pub fn select_project(&mut self, key: &str, form: &mut FormDataStore) -> Vec<FieldUpdate> {
        vec![
            form.update_field(FormField::ProjectKey, key),
            form.update_field(FormField::JqlQuery, &default_jql(key)),
        ]
    }

    /// Credentials changed: the loaded list no longer counts as current and
    /// any running fetch will be discarded when it returns.
    pub fn invalidate(&mut self) {
        self.loaded_for = None;
        self.loading = None;
    }
}
