//! Error types for AppImage builds.
//!
//! [`BuildError`] is the closed set of outcomes a failed build can report.
//! Everything that goes wrong inside the pipeline is normalized into one of
//! its variants before it crosses the public boundary, so callers only ever
//! see plain messages, never raw platform errors.

use std::path::PathBuf;
use thiserror::Error;

/// Outcome of a single [`Bundler::bundle`](crate::bundler::Bundler::bundle) call.
///
/// `Ok` carries the absolute path of the relocated `.AppImage`.
pub type BuildResult = std::result::Result<PathBuf, BuildError>;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure reported by a build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A required input path does not exist.
    #[error("{what} '{}' doesn't exist", path.display())]
    PathNotFound {
        /// What the path was supposed to be ("File", "Folder", "Icon")
        what: &'static str,
        /// The offending path, as resolved for the check
        path: PathBuf,
    },

    /// Packaging only works on Linux hosts.
    #[error("AppImage can only be built on Linux (current OS: {0}); on Windows use WSL")]
    UnsupportedOs(String),

    /// The host CPU cannot run any of the packaging tools.
    #[error("current OS architecture is unsupported: {0}")]
    UnsupportedOsArchitecture(String),

    /// The requested target architecture is not one of the supported values.
    #[error("unsupported AppImage architecture specified: {0}")]
    UnsupportedArchitecture(String),

    /// Anything else: filesystem errors while staging, tool failures,
    /// relocation failures.
    #[error("{0}")]
    Unknown(String),
}

impl BuildError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PathNotFound { .. } => ErrorKind::PathNotFound,
            Self::UnsupportedOs(_) => ErrorKind::UnsupportedOs,
            Self::UnsupportedOsArchitecture(_) => ErrorKind::UnsupportedOsArchitecture,
            Self::UnsupportedArchitecture(_) => ErrorKind::UnsupportedArchitecture,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub(crate) fn path_not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound {
            what,
            path: path.into(),
        }
    }
}

impl From<crate::bundler::Error> for BuildError {
    fn from(err: crate::bundler::Error) -> Self {
        Self::Unknown(err.to_string())
    }
}

/// Discriminant of [`BuildError`], with the numeric codes and identifiers
/// the command line reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PathNotFound,
    UnsupportedOsArchitecture,
    UnsupportedArchitecture,
    UnsupportedOs,
    Unknown,
}

impl ErrorKind {
    /// Numeric status code. `0` is reserved for success.
    pub fn code(self) -> i32 {
        match self {
            Self::PathNotFound => 1,
            Self::UnsupportedOsArchitecture => 2,
            Self::UnsupportedArchitecture => 3,
            Self::UnsupportedOs => 4,
            Self::Unknown => 5,
        }
    }

    /// Upper-snake identifier, e.g. `PATH_NOT_FOUND`.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::PathNotFound => "PATH_NOT_FOUND",
            Self::UnsupportedOsArchitecture => "UNSUPPORTED_OS_ARCHITECTURE",
            Self::UnsupportedArchitecture => "UNSUPPORTED_ARCHITECTURE",
            Self::UnsupportedOs => "UNSUPPORTED_OS",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Top-level error for the command line tool
#[derive(Error, Debug)]
pub enum AppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request construction errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Argument \"{argument}\" not specified")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}
