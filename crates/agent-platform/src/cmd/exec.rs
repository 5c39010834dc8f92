//! Real command runner backed by `std::process`.

use super::{CmdOutput, CmdRunner};
use agent_error::{PlatformError, PlatformResult};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use wait_timeout::ChildExt;

#[derive(Debug, Clone, Default)]
pub struct ExecCmdRunner;

impl ExecCmdRunner {
    pub fn new() -> Self {
        Self
    }
}

fn map_spawn_err(program: &str, err: std::io::Error) -> PlatformError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return PlatformError::CommandNotFound(program.to_string());
    }
    PlatformError::Io(err)
}

/// Background readers for a child's stdout and stderr.
///
/// Both pipes are read while the child runs so a chatty command can't block on a full pipe.
struct PipeReaders {
    stdout: JoinHandle<Vec<u8>>,
    stderr: JoinHandle<Vec<u8>>,
}

impl PipeReaders {
    fn start(child: &mut Child) -> Self {
        Self {
            stdout: drain(child.stdout.take()),
            stderr: drain(child.stderr.take()),
        }
    }

    fn finish(self) -> (String, String) {
        (lossy(self.stdout), lossy(self.stderr))
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn lossy(handle: JoinHandle<Vec<u8>>) -> String {
    String::from_utf8_lossy(&handle.join().unwrap_or_default()).into_owned()
}

/// Kill and reap `child`, then join its readers. Nothing is left running or detached.
fn abandon(child: &mut Child, readers: PipeReaders) {
    let _ = child.kill();
    let _ = child.wait();
    let _ = readers.finish();
}

impl CmdRunner for ExecCmdRunner {
    fn run_command(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> PlatformResult<CmdOutput> {
        log::debug!("Running command: {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| map_spawn_err(program, e))?;
        let readers = PipeReaders::start(&mut child);

        let status = match child.wait_timeout(timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                abandon(&mut child, readers);
                return Err(PlatformError::CommandTimeout {
                    program: program.to_string(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            Err(err) => {
                abandon(&mut child, readers);
                return Err(err.into());
            }
        };

        let (stdout, stderr) = readers.finish();
        if !status.success() {
            return Err(PlatformError::CommandFailed {
                program: program.to_string(),
                code: status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CmdOutput { stdout, stderr })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn captures_stdout() {
        let out = ExecCmdRunner::new()
            .run_command("sh", &["-c", "echo hello"], TIMEOUT)
            .unwrap();
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn non_zero_exit_is_command_failed() {
        let err = ExecCmdRunner::new()
            .run_command("sh", &["-c", "echo oops >&2; exit 3"], TIMEOUT)
            .unwrap_err();
        match err {
            PlatformError::CommandFailed { program, code, stderr } => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_command_not_found() {
        let err = ExecCmdRunner::new()
            .run_command("definitely-not-a-real-binary-xyz", &[], TIMEOUT)
            .unwrap_err();
        assert!(matches!(err, PlatformError::CommandNotFound(_)));
    }

    #[test]
    fn abandon_reaps_child_and_joins_readers() {
        let mut child = Command::new("sleep")
            .arg("30")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let readers = PipeReaders::start(&mut child);

        let started = std::time::Instant::now();
        abandon(&mut child, readers);

        // Reaped: the exit status is already known and we did not wait out the sleep.
        assert!(child.try_wait().unwrap().is_some());
        assert!(started.elapsed() < Duration::from_secs(20));
    }

    #[test]
    fn slow_command_times_out() {
        let err = ExecCmdRunner::new()
            .run_command("sleep", &["5"], Duration::from_millis(200))
            .unwrap_err();
        assert!(matches!(err, PlatformError::CommandTimeout { .. }));
    }
}
