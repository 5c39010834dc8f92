use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type SettingsResult<T> = Result<T, SettingsError>;
pub type PlatformResult<T> = Result<T, PlatformError>;
pub type ActionResult<T> = Result<T, ActionError>;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Reading settings file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parsing settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command failed: {program} (exit={code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Command timed out: {program} after {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Nix(#[from] nix::errno::Errno),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Refreshing the settings")]
    RefreshSettings(#[source] SettingsError),

    #[error("Persistent disk with volume id '{0}' could not be found")]
    DiskNotFound(String),

    #[error("Checking mount point")]
    CheckMountPoint(#[source] PlatformError),

    #[error("Mounting persistent disk")]
    MountPersistentDisk(#[source] PlatformError),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("not supported")]
    NotSupported,
}

impl ActionError {
    /// True when the caller sent something this agent cannot act on; retrying won't help.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ActionError::DiskNotFound(_) | ActionError::InvalidArguments(_)
        )
    }
}

/// Render `err` and its causes as one line: `stage: cause: root cause`.
pub fn display_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn wrapped_errors_keep_stage_and_cause() {
        let err = ActionError::MountPersistentDisk(PlatformError::CommandFailed {
            program: "mount".to_string(),
            code: Some(32),
            stderr: "wrong fs type".to_string(),
        });

        assert_eq!(err.to_string(), "Mounting persistent disk");
        let source = err.source().expect("cause should be preserved");
        assert!(source.to_string().contains("wrong fs type"));

        assert_eq!(
            display_chain(&err),
            "Mounting persistent disk: Command failed: mount (exit=Some(32)): wrong fs type"
        );
    }

    #[test]
    fn root_cause_appears_once_in_chain() {
        let err = ActionError::RefreshSettings(SettingsError::Io {
            path: PathBuf::from("/var/vcap/bosh/settings.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        });

        let chain = display_chain(&err);
        assert_eq!(
            chain,
            "Refreshing the settings: Reading settings file /var/vcap/bosh/settings.json: \
             No such file or directory"
        );
        assert_eq!(chain.matches("No such file").count(), 1);
    }

    #[test]
    fn io_errors_are_transparent() {
        let err = PlatformError::from(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(display_chain(&err).matches("disk on fire").count(), 1);
    }

    #[test]
    fn disk_not_found_names_the_identifier() {
        let err = ActionError::DiskNotFound("vol-9".to_string());
        assert_eq!(
            err.to_string(),
            "Persistent disk with volume id 'vol-9' could not be found"
        );
        assert!(err.is_client_error());
        assert!(err.source().is_none());
    }

    #[test]
    fn not_supported_is_not_a_client_error() {
        assert_eq!(ActionError::NotSupported.to_string(), "not supported");
        assert!(!ActionError::NotSupported.is_client_error());
    }
}
