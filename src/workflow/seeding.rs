use crate::api::{JiraConfiguration, WorkflowStatus};
use crate::workflow::state_list::WorkflowStateList;
use std::collections::HashSet;

const START_CATEGORIES: [&str; 2] = ["To Do", "New"];
const END_CATEGORIES: [&str; 2] = ["Done", "Completed"];

fn category_in(category: &str, options: &[&str]) -> bool {
    options
        .iter()
        .any(|option| option.eq_ignore_ascii_case(category.trim()))
}

/// Builds the state list from a project's Jira statuses, keeping Jira's
/// order. Duplicate names (case-insensitive) keep their first occurrence.
pub fn seed_workflow_states(statuses: &[WorkflowStatus]) -> WorkflowStateList {
    let mut list = WorkflowStateList::new();
    let mut seen = HashSet::new();
    let mut start_marked = false;
    let mut end_marked = false;
    for status in statuses {
        let name = status.name.trim();
        if name.is_empty() || !seen.insert(name.to_lowercase()) {
            continue;
        }
        let is_start = !start_marked && category_in(&status.category, &START_CATEGORIES);
        let is_end = !end_marked && category_in(&status.category, &END_CATEGORIES);
        start_marked |= is_start;
        end_marked |= is_end;
        list.push_marked(name, is_start, is_end);
    }
    list
}

/// Rebuilds the list stored with a configuration, marking the states its
/// lead-time boundaries name.
pub fn states_from_configuration(config: &JiraConfiguration) -> WorkflowStateList {
    let mut list = WorkflowStateList::new();
    for name in &config.workflow_states {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let is_start =
            !config.lead_time_start_state.is_empty() && name == config.lead_time_start_state;
        let is_end = !config.lead_time_end_state.is_empty() && name == config.lead_time_end_state;
        list.push_marked(name, is_start, is_end);
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::boundaries::boundary_states;

    fn status(name: &str, category: &str) -> WorkflowStatus {
        WorkflowStatus {
            name: name.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn first_matching_categories_become_markers() {
        let list = seed_workflow_states(&[
            status("Backlog", "New"),
            status("Selected", "To Do"),
            status("In Progress", "In Progress"),
            status("Done", "Done"),
            status("Closed", "Completed"),
        ]);
        assert_eq!(
            list.names(),
            vec!["Backlog", "Selected", "In Progress", "Done", "Closed"]
        );
        let marked_start = list.states().iter().filter(|s| s.is_start_point).count();
        let marked_end = list.states().iter().filter(|s| s.is_end_point).count();
        assert_eq!((marked_start, marked_end), (1, 1));
        let boundaries = boundary_states(list.states());
        assert_eq!(boundaries.start.as_deref(), Some("Backlog"));
        assert_eq!(boundaries.end.as_deref(), Some("Done"));
    }

    #[test]
    fn duplicate_status_names_are_collapsed() {
        let list = seed_workflow_states(&[
            status("To Do", "To Do"),
            status("to do", "To Do"),
            status(" ", "Done"),
        ]);
        assert_eq!(list.names(), vec!["To Do"]);
    }

    #[test]
    fn configuration_round_trip_marks_boundaries() {
        let config = JiraConfiguration {
            workflow_states: vec![
                "To Do".to_string(),
                "In Progress".to_string(),
                "Done".to_string(),
            ],
            lead_time_start_state: "In Progress".to_string(),
            lead_time_end_state: "Done".to_string(),
            ..JiraConfiguration::default()
        };
        let list = states_from_configuration(&config);
        let boundaries = boundary_states(list.states());
        assert_eq!(boundaries.start.as_deref(), Some("In Progress"));
        assert_eq!(boundaries.end.as_deref(), Some("Done"));
    }
}
