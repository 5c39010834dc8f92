//! Lifecycle actions the orchestrator can invoke on the agent.

pub mod action;
pub mod mount_disk;

pub use action::{Action, ActionValue};
pub use agent_error::{ActionError, ActionResult};
pub use mount_disk::MountDiskAction;
