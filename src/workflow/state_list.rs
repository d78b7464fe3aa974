use crate::shared::ids::{StateIdAllocator, WorkflowStateId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub id: WorkflowStateId,
    pub name: String,
    #[serde(default)]
    pub is_start_point: bool,
    #[serde(default)]
    pub is_end_point: bool,
}

type ChangeListener = Box<dyn FnMut(&[WorkflowState])>;

/// Ordered workflow states for one configuration's edit session.
///
/// Order is the canonical workflow sequence. Start and end markers are
/// independent flags; nothing stops several states, or one state, from
/// carrying both. Boundary derivation resolves that by position.
///
/// Every mutation that changes the list reports the full new list to the
/// change listener exactly once.
pub struct WorkflowStateList {
    states: Vec<WorkflowState>,
    ids: StateIdAllocator,
    on_change: Option<ChangeListener>,
}

impl std::fmt::Debug for WorkflowStateList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowStateList")
            .field("states", &self.states)
            .field("has_listener", &self.on_change.is_some())
            .finish()
    }
}

impl Default for WorkflowStateList {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowStateList {
    pub fn new() -> Self {
        Self::with_allocator(StateIdAllocator::new())
    }

    pub fn with_allocator(ids: StateIdAllocator) -> Self {
        Self {
            states: Vec::new(),
            ids,
            on_change: None,
        }
    }

    pub fn from_states(states: Vec<WorkflowState>) -> Self {
        Self {
            states,
            ..Self::new()
        }
    }

    pub fn set_on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&[WorkflowState]) + 'static,
    {
        self.on_change = Some(Box::new(listener));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    pub fn states(&self) -> &[WorkflowState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.states.iter().map(|state| state.name.clone()).collect()
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.states);
        }
    }

    /// Appends a new unmarked state. Blank names are ignored.
    pub fn add_state(&mut self, name: &str) -> Option<WorkflowStateId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        self.states.push(WorkflowState {
            id: id.clone(),
            name: name.to_string(),
            is_start_point: false,
            is_end_point: false,
        });
        self.notify();
        Some(id)
    }

    /// Used when seeding from Jira, where markers are known up front.
    pub(crate) fn push_marked(&mut self, name: &str, is_start_point: bool, is_end_point: bool) {
        let id = self.ids.next_id();
        self.states.push(WorkflowState {
            id,
            name: name.to_string(),
            is_start_point,
            is_end_point,
        });
    }

    pub fn remove_state(&mut self, id: &WorkflowStateId) {
        self.states.retain(|state| &state.id != id);
        self.notify();
    }

    pub fn toggle_start_point(&mut self, id: &WorkflowStateId) {
        for state in self.states.iter_mut().filter(|state| &state.id == id) {
            state.is_start_point = !state.is_start_point;
        }
        self.notify();
    }

    pub fn toggle_end_point(&mut self, id: &WorkflowStateId) {
        for state in self.states.iter_mut().filter(|state| &state.id == id) {
            state.is_end_point = !state.is_end_point;
        }
        self.notify();
    }

    /// Renames a state in place. Blank names are ignored.
    pub fn rename_state(&mut self, id: &WorkflowStateId, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        for state in self.states.iter_mut().filter(|state| &state.id == id) {
            state.name = name.to_string();
        }
        self.notify();
    }

    /// Reorder primitive behind drag and drop: removes the state at
    /// `from_index` and reinserts it at `to_index` (clamped to the end).
    pub fn move_item(&mut self, from_index: usize, to_index: usize) {
        if from_index == to_index || from_index >= self.states.len() {
            return;
        }
        let state = self.states.remove(from_index);
        let to_index = to_index.min(self.states.len());
        self.states.insert(to_index, state);
        self.notify();
    }

    pub fn find_item_by_id(&self, id: Option<&WorkflowStateId>) -> Option<&WorkflowState> {
        let id = id?;
        self.states.iter().find(|state| &state.id == id)
    }

    pub fn position_of(&self, id: &WorkflowStateId) -> Option<usize> {
        self.states.iter().position(|state| &state.id == id)
    }
}
