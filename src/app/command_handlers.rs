use crate::api::{ConfigApi, HttpConfigApi, JiraConfiguration};
use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::app::draft::WizardDraft;
use crate::config::{load_settings, Settings};
use crate::setup::step_validation::MSG_NAME_EXISTS;
use crate::setup::{ConfigWizard, FormField, StepOutcome, SubmitOutcome};
use crate::shared::WizardLog;
use crate::workflow::WorkflowState;
use std::path::Path;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Create => cmd_create(&args[1..]),
        CliVerb::Edit => cmd_edit(&args[1..]),
        CliVerb::States => cmd_states(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}

struct CommandContext {
    settings: Settings,
    api: HttpConfigApi,
    log: WizardLog,
}

fn command_context() -> Result<CommandContext, String> {
    let settings = load_settings().map_err(|e| e.to_string())?;
    let api = HttpConfigApi::new(&settings.api_base_url, settings.request_timeout());
    let log = settings
        .resolve_log_path()
        .map(WizardLog::to_file)
        .unwrap_or_default();
    Ok(CommandContext { settings, api, log })
}

fn cmd_create(args: &[String]) -> Result<String, String> {
    if args.len() != 1 {
        return Err("usage: create <draft.yaml>".to_string());
    }
    let draft = WizardDraft::load(Path::new(&args[0]))?;
    let ctx = command_context()?;
    let wizard = ConfigWizard::new(ctx.api)
        .with_name_check_delay(ctx.settings.name_check_debounce())
        .with_log(ctx.log);
    create_configuration(wizard, &draft)
}

fn cmd_edit(args: &[String]) -> Result<String, String> {
    if args.len() != 2 {
        return Err("usage: edit <name> <draft.yaml>".to_string());
    }
    let draft = WizardDraft::load(Path::new(&args[1]))?;
    let ctx = command_context()?;
    edit_configuration(ctx.api, &args[0], &draft, ctx.log)
}

fn cmd_states(args: &[String]) -> Result<String, String> {
    if args.len() != 1 {
        return Err("usage: states <draft.yaml>".to_string());
    }
    let draft = WizardDraft::load(Path::new(&args[0]))?;
    let ctx = command_context()?;
    preview_workflow_states(ConfigWizard::new(ctx.api).with_log(ctx.log), &draft)
}

/// Drives a create-mode wizard through both steps with the draft's values.
pub fn create_configuration<A: ConfigApi>(
    mut wizard: ConfigWizard<A>,
    draft: &WizardDraft,
) -> Result<String, String> {
    for (field, value) in draft.credential_fields()? {
        wizard.update_field(field, &value);
    }
    advance_to_project(&mut wizard)?;
    apply_project_overrides(&mut wizard, draft);
    apply_workflow(&mut wizard, draft)?;
    finish(wizard.handle_submit(|_| {}))
}

/// Opens `name` for editing, layers the draft on top and saves it. The
/// configuration name itself cannot change.
pub fn edit_configuration<A: ConfigApi>(
    api: A,
    name: &str,
    draft: &WizardDraft,
    log: WizardLog,
) -> Result<String, String> {
    let existing = api
        .list_configurations()
        .map_err(|e| format!("failed to list configurations: {e}"))?
        .into_iter()
        .find(|config| config.name == name)
        .ok_or_else(|| format!("configuration `{name}` not found"))?;
    let mut wizard = ConfigWizard::edit(api, &existing).with_log(log);
    for (field, value) in draft.credential_fields()? {
        if field != FormField::Name {
            wizard.update_field(field, &value);
        }
    }
    advance_to_project(&mut wizard)?;
    apply_project_overrides(&mut wizard, draft);
    apply_workflow(&mut wizard, draft)?;
    finish(wizard.handle_submit(|_| {}))
}

pub fn preview_workflow_states<A: ConfigApi>(
    mut wizard: ConfigWizard<A>,
    draft: &WizardDraft,
) -> Result<String, String> {
    for (field, value) in draft.credential_fields()? {
        wizard.update_field(field, &value);
    }
    wizard
        .validate_credentials(|_| {})
        .map_err(|e| e.to_string())?;
    if let Some(key) = draft.project_key.as_deref() {
        wizard.select_project(key.trim());
    }
    let list = wizard.load_workflow_states().map_err(|e| e.to_string())?;
    if list.is_empty() {
        return Ok(format!(
            "no workflow states found for project {}",
            wizard.field(FormField::ProjectKey)
        ));
    }
    Ok(render_states(list.states()))
}

fn advance_to_project<A: ConfigApi>(wizard: &mut ConfigWizard<A>) -> Result<(), String> {
    match wizard.go_to_next_step() {
        StepOutcome::Moved { .. } => Ok(()),
        StepOutcome::Blocked { message, .. } => Err(message),
        other => Err(format!("unexpected wizard outcome: {other:?}")),
    }
}

fn apply_project_overrides<A: ConfigApi>(wizard: &mut ConfigWizard<A>, draft: &WizardDraft) {
    if let Some(key) = draft.project_key.as_deref() {
        wizard.select_project(key.trim());
    }
    if let Some(query) = draft.jql_query.as_deref() {
        wizard.update_field(FormField::JqlQuery, query);
    }
}

/// Uses the draft's states when given, else keeps stored states, else seeds
/// from the project's Jira statuses.
fn apply_workflow<A: ConfigApi>(
    wizard: &mut ConfigWizard<A>,
    draft: &WizardDraft,
) -> Result<(), String> {
    if let Some(list) = draft.state_list() {
        wizard.apply_workflow_states(list.states());
        return Ok(());
    }
    if wizard.workflow_states().is_some() {
        return Ok(());
    }
    let list = wizard.load_workflow_states().map_err(|e| e.to_string())?;
    wizard.apply_workflow_states(list.states());
    Ok(())
}

fn finish(outcome: StepOutcome) -> Result<String, String> {
    match outcome {
        StepOutcome::Submitted(SubmitOutcome::Created(config)) => Ok(summarize("created", &config)),
        StepOutcome::Submitted(SubmitOutcome::Updated(config)) => Ok(summarize("updated", &config)),
        StepOutcome::Submitted(SubmitOutcome::NameTaken) => Err(MSG_NAME_EXISTS.to_string()),
        StepOutcome::Submitted(SubmitOutcome::Failed(message)) => Err(message),
        StepOutcome::Blocked { message, .. } => Err(message),
        other => Err(format!("unexpected wizard outcome: {other:?}")),
    }
}

fn summarize(verb: &str, config: &JiraConfiguration) -> String {
    let mut lines = vec![
        format!("{verb} configuration `{}`", config.name),
        format!("project: {}", config.project_key),
        format!("jql: {}", config.jql_query),
        format!(
            "lead time: {} -> {}",
            config.lead_time_start_state, config.lead_time_end_state
        ),
        format!(
            "cycle time: {} -> {}",
            config.cycle_time_start_state, config.cycle_time_end_state
        ),
    ];
    if !config.workflow_states.is_empty() {
        lines.push(format!("workflow: {}", config.workflow_states.join(" > ")));
    }
    lines.join("\n")
}

fn render_states(states: &[WorkflowState]) -> String {
    states
        .iter()
        .enumerate()
        .map(|(index, state)| {
            let mut line = format!("{}. {}", index + 1, state.name);
            if state.is_start_point {
                line.push_str(" [start]");
            }
            if state.is_end_point {
                line.push_str(" [end]");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
