//! The action contract.

use agent_error::{ActionError, ActionResult};
use serde_json::Value;

/// Payload handed back to the orchestrator on success.
pub type ActionValue = Value;

/// A single lifecycle operation.
pub trait Action: Send + Sync {
    /// True when the orchestrator should poll for completion instead of waiting on the
    /// synchronous command path.
    fn is_asynchronous(&self) -> bool;

    /// True when the action must be replayed after an agent restart.
    fn is_persistent(&self) -> bool;

    /// Execute once, to completion, on the calling thread. No retries.
    fn run(&self, args: &[Value]) -> ActionResult<ActionValue>;

    /// Re-attach to a run interrupted by an agent restart.
    fn resume(&self) -> ActionResult<ActionValue>;
}

/// Extract the only argument of an action that takes one string.
pub fn single_string_arg(args: &[Value]) -> ActionResult<&str> {
    match args {
        [Value::String(s)] => Ok(s.as_str()),
        [other] => Err(ActionError::InvalidArguments(format!(
            "expected a string, got {}",
            other
        ))),
        _ => Err(ActionError::InvalidArguments(format!(
            "expected 1 argument, got {}",
            args.len()
        ))),
    }
}
