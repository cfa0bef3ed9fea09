//! CLI error types.

use cfctl_api::{ApiError, ConfigError};
use thiserror::Error;

use crate::requirements::RequirementError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// A request to the API failed or a lookup found nothing.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A user-supplied value was rejected before anything was sent.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// A command precondition failed.
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error: 2 for usage errors, 1 otherwise.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            _ => 1,
        }
    }
}
