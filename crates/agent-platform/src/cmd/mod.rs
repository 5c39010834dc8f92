//! External command execution.
//!
//! Commands are world-touching and must go through a [`CmdRunner`] so platform code can be
//! exercised without spawning real processes.

pub mod exec;
pub mod fake;

pub use exec::ExecCmdRunner;
pub use fake::{FakeCmdRunner, RecordedCommand};

use agent_error::{PlatformError, PlatformResult};
use std::path::Path;
use std::time::Duration;

/// Captured output of a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
}

pub trait CmdRunner: Send + Sync {
    /// Run `program` to completion. A non-zero exit is reported as
    /// [`PlatformError::CommandFailed`].
    fn run_command(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> PlatformResult<CmdOutput>;
}

/// Borrow a path as a command argument.
pub fn path_arg(path: &Path) -> PlatformResult<&str> {
    path.to_str()
        .ok_or_else(|| PlatformError::InvalidPath(path.display().to_string()))
}
