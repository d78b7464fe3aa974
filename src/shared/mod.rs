pub mod errors;
pub mod fs_atomic;
pub mod ids;
pub mod logging;

pub use errors::WizardError;
pub use ids::{StateIdAllocator, WorkflowStateId};
pub use logging::WizardLog;
