//! Launcher error taxonomy and exit-code mapping.

use crate::options::StartupError;
use forge_rc::RcError;
use thiserror::Error;

/// Process exit codes surfaced by the launcher.
///
/// These codes are stable and used for automation: they distinguish faults
/// attributable to user configuration or arguments from internal
/// inconsistencies.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BAD_ARGV: i32 = 2;
    pub const INTERNAL_ERROR: i32 = 37;
}

/// Failures raised during configuration resolution.
///
/// Resolution is all-or-nothing: the first failure aborts the run and no
/// partial argument vector is exposed.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// An explicitly named rc file cannot be accessed. Reported before any
    /// parsing starts.
    #[error("Unable to read rc file '{path}'")]
    UnreadableRcFile { path: String },

    /// Rc-file parsing failed (bad import, import cycle, or an unexpected
    /// read failure).
    #[error(transparent)]
    Rc(#[from] RcError),

    /// An unrecognized or malformed startup flag, from an rc file or the
    /// command line, or an upfront validation failure.
    #[error(transparent)]
    Startup(#[from] StartupError),

    /// `parse_options` was invoked a second time on the same processor.
    #[error("parse_options called more than once on the same OptionProcessor")]
    AlreadyParsed,
}

impl LauncherError {
    /// Map the failure to its exit-code category: user configuration or
    /// arguments vs. internal inconsistency.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnreadableRcFile { .. } => exit_code::BAD_ARGV,
            Self::Rc(RcError::UnexpectedRead { .. }) => exit_code::INTERNAL_ERROR,
            Self::Rc(_) => exit_code::BAD_ARGV,
            Self::Startup(_) => exit_code::BAD_ARGV,
            Self::AlreadyParsed => exit_code::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_faults_map_to_bad_argv() {
        let err = LauncherError::UnreadableRcFile {
            path: "/tmp/.forgerc".to_string(),
        };
        assert_eq!(err.exit_code(), exit_code::BAD_ARGV);

        let err = LauncherError::Rc(RcError::ImportCycle { cycle: vec![] });
        assert_eq!(err.exit_code(), exit_code::BAD_ARGV);
    }

    #[test]
    fn test_internal_faults_map_to_internal_error() {
        let err = LauncherError::Rc(RcError::UnexpectedRead {
            path: "/tmp/.forgerc".to_string(),
        });
        assert_eq!(err.exit_code(), exit_code::INTERNAL_ERROR);
        assert_eq!(
            LauncherError::AlreadyParsed.exit_code(),
            exit_code::INTERNAL_ERROR
        );
    }
}
