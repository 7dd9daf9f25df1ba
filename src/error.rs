//! Unified error type for the alarm engine.
//!
//! Every fallible engine operation funnels into [`Error`]. Port-level
//! errors are defined next to their traits in [`crate::app::ports`] and
//! convert into this type, so `?` works across the port boundary. All
//! variants are `Copy`.

use core::fmt;

use crate::app::ports::{ClassifierError, ConfigError, RepositoryError};

// ---------------------------------------------------------------------------
// Top-level engine error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The caller passed a sensor, name or value the system does not accept.
    InvalidArgument(&'static str),
    /// The status repository failed or rejected the request.
    Repository(RepositoryError),
    /// The image classifier failed or was unreachable.
    Classifier(ClassifierError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Repository(e) => write!(f, "repository: {e}"),
            Self::Classifier(e) => write!(f, "classifier: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<RepositoryError> for Error {
    fn from(e: RepositoryError) -> Self {
        Self::Repository(e)
    }
}

impl From<ClassifierError> for Error {
    fn from(e: ClassifierError) -> Self {
        Self::Classifier(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
