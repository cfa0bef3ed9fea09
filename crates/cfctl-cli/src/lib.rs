//! # cfctl-cli
//!
//! Command-line client for the cloud controller.
//!
//! Provides commands for:
//! - Scaling and restarting apps
//! - Listing, creating and assigning quota definitions
//! - Managing service auth tokens
//!
//! # Architecture
//!
//! Each command declares the [`requirements::Requirement`]s it needs. The
//! [`commands::run`] dispatcher evaluates them in order against the
//! configuration and the API, then executes the command with the resolved
//! records. All API access goes through the repositories of `cfctl-api`.
//!
//! ```text
//! ┌───────────┐  requirements  ┌────────────┐  repositories  ┌──────────────┐
//! │ cfctl CLI │───────────────►│  commands  │───────────────►│  cfctl-api   │
//! └───────────┘                └────────────┘                └──────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;
pub mod requirements;
pub mod units;

#[cfg(test)]
pub(crate) mod testing;

pub use cli::{Cli, Commands, Format, ScaleArgs};
pub use context::Context;
pub use error::CliError;
pub use output::OutputFormat;
pub use requirements::{Requirement, RequirementError};
