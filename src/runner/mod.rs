//! Install workflow orchestration.

pub mod stage;
pub mod workflow;

pub use stage::{InstallOutcome, InstallStage};
pub use workflow::{InstallWorkflow, WorkflowOptions, EXIT_PROMPT};
