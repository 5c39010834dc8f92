//! Recording command runner for tests.

use super::{CmdOutput, CmdRunner};
use agent_error::{PlatformError, PlatformResult};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RecordedCommand {
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Output(String),
    Failure { code: Option<i32>, stderr: String },
}

#[derive(Debug, Default)]
struct FakeCmdState {
    commands: Vec<RecordedCommand>,
    /// Keyed by full command line; consumed in order, unscripted commands succeed silently.
    scripted: HashMap<String, VecDeque<Scripted>>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeCmdRunner {
    state: Arc<Mutex<FakeCmdState>>,
}

impl FakeCmdRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_output(&self, command_line: &str, stdout: &str) {
        self.push(command_line, Scripted::Output(stdout.to_string()));
    }

    pub fn add_failure(&self, command_line: &str, code: Option<i32>, stderr: &str) {
        self.push(
            command_line,
            Scripted::Failure {
                code,
                stderr: stderr.to_string(),
            },
        );
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.lock().commands.clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.lock()
            .commands
            .iter()
            .map(RecordedCommand::command_line)
            .collect()
    }

    fn push(&self, command_line: &str, result: Scripted) {
        self.lock()
            .scripted
            .entry(command_line.to_string())
            .or_default()
            .push_back(result);
    }

    fn lock(&self) -> MutexGuard<'_, FakeCmdState> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CmdRunner for FakeCmdRunner {
    fn run_command(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> PlatformResult<CmdOutput> {
        let recorded = RecordedCommand {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        };
        let line = recorded.command_line();

        let mut state = self.lock();
        state.commands.push(recorded);
        let next = state.scripted.get_mut(&line).and_then(VecDeque::pop_front);

        match next {
            None => Ok(CmdOutput::default()),
            Some(Scripted::Output(stdout)) => Ok(CmdOutput {
                stdout,
                stderr: String::new(),
            }),
            Some(Scripted::Failure { code, stderr }) => Err(PlatformError::CommandFailed {
                program: program.to_string(),
                code,
                stderr,
            }),
        }
    }
}
