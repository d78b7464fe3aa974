mod support;

use flowlens::setup::{ConfigWizard, FormField};
use flowlens::shared::logging::append_log_line;
use flowlens::shared::WizardLog;
use std::fs;
use support::{status_error, FakeConfigApi};
use tempfile::tempdir;

fn read_lines(path: &std::path::Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .expect("read log")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn log_lines_are_json_with_timestamp_level_and_event() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("logs/wizard.log");
    let log = WizardLog::to_file(&path);
    log.info("configuration_saved", "saved `Team`");
    log.error("credentials_rejected", "api responded with status 401");

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["level"], "info");
    assert_eq!(lines[0]["event"], "configuration_saved");
    assert_eq!(lines[1]["level"], "error");
    assert_eq!(lines[1]["message"], "api responded with status 401");
    let stamp = lines[0]["timestamp"].as_str().expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "{stamp}");
}

#[test]
fn disabled_log_and_unwritable_paths_are_silent() {
    let dir = tempdir().expect("tempdir");
    WizardLog::disabled().warn("ignored", "nothing to write");
    assert!(WizardLog::disabled().path().is_none());

    let blocker = dir.path().join("file");
    fs::write(&blocker, "x").expect("write");
    append_log_line(&blocker.join("wizard.log"), "info", "event", "message");
    assert_eq!(fs::read_to_string(&blocker).expect("read"), "x");
}

#[test]
fn wizard_logs_credential_failures_and_saves() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("wizard.log");
    let api = FakeConfigApi::with_projects(&[("TEST", "Test")]);
    api.queue_validation(Err(status_error(401)));
    let mut wizard = ConfigWizard::new(api).with_log(WizardLog::to_file(&path));
    wizard.update_field(FormField::Name, "Team");
    wizard.update_field(FormField::JiraServer, "https://test.atlassian.net");
    wizard.update_field(FormField::JiraEmail, "test@example.com");
    wizard.update_field(FormField::JiraApiToken, "token");

    wizard.go_to_next_step();
    wizard.go_to_next_step();
    wizard.handle_submit(|_| {});

    let events: Vec<String> = read_lines(&path)
        .iter()
        .map(|line| line["event"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        events,
        vec![
            "credentials_rejected",
            "credentials_validated",
            "configuration_saved"
        ]
    );
}
