pub mod boundaries;
pub mod seeding;
pub mod state_list;

pub use boundaries::{apply_boundary_fields, boundary_states, BoundaryStates};
pub use seeding::{seed_workflow_states, states_from_configuration};
pub use state_list::{WorkflowState, WorkflowStateList};
