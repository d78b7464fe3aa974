use crate::setup::form_data::{FieldUpdate, FormDataStore, FormField};
use crate::workflow::state_list::WorkflowState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryStates {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// First start-marked and first end-marked state names, by list position.
pub fn boundary_states(states: &[WorkflowState]) -> BoundaryStates {
    BoundaryStates {
        start: states
            .iter()
            .find(|state| state.is_start_point)
            .map(|state| state.name.clone()),
        end: states
            .iter()
            .find(|state| state.is_end_point)
            .map(|state| state.name.clone()),
    }
}

/// Writes the lead-time and cycle-time boundaries into the form. A side with
/// no marked state leaves its two fields untouched. Idempotent.
pub fn apply_boundary_fields(
    states: &[WorkflowState],
    form: &mut FormDataStore,
) -> Vec<FieldUpdate> {
    let boundaries = boundary_states(states);
    let mut updates = Vec::new();
    if let Some(start) = boundaries.start.as_deref() {
        updates.push(form.update_field(FormField::LeadTimeStartState, start));
        updates.push(form.update_field(FormField::CycleTimeStartState, start));
    }
    if let Some(end) = boundaries.end.as_deref() {
        updates.push(form.update_field(FormField::LeadTimeEndState, end));
        updates.push(form.update_field(FormField::CycleTimeEndState, end));
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ids::WorkflowStateId;

    fn state(id: &str, name: &str, start: bool, end: bool) -> WorkflowState {
        WorkflowState {
            id: WorkflowStateId::parse(id).expect("id"),
            name: name.to_string(),
            is_start_point: start,
            is_end_point: end,
        }
    }

    #[test]
    fn first_marked_state_wins_on_each_side() {
        let states = vec![
            state("s1", "Backlog", false, false),
            state("s2", "Selected", true, false),
            state("s3", "In Progress", true, false),
            state("s4", "Review", false, true),
            state("s5", "Done", false, true),
        ];
        assert_eq!(
            boundary_states(&states),
            BoundaryStates {
                start: Some("Selected".to_string()),
                end: Some("Review".to_string()),
            }
        );
    }

    #[test]
    fn unmarked_side_leaves_form_fields_alone() {
        let mut form = FormDataStore::new();
        form.update_field(FormField::LeadTimeEndState, "Closed");
        let states = vec![state("s1", "To Do", true, false)];
        apply_boundary_fields(&states, &mut form);
        assert_eq!(form.get(FormField::LeadTimeStartState), "To Do");
        assert_eq!(form.get(FormField::CycleTimeStartState), "To Do");
        assert_eq!(form.get(FormField::LeadTimeEndState), "Closed");
        assert_eq!(form.get(FormField::CycleTimeEndState), "");
    }

    #[test]
    fn derivation_is_idempotent() {
        let states = vec![
            state("s1", "To Do", true, false),
            state("s2", "Done", false, true),
        ];
        let mut form = FormDataStore::new();
        apply_boundary_fields(&states, &mut form);
        let first = form.data().clone();
        let second_pass = apply_boundary_fields(&states, &mut form);
        assert_eq!(form.data(), &first);
        assert!(second_pass.iter().all(|update| !update.changed));
    }
}
