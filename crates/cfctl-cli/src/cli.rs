//! Command-line argument parsing with clap.

use std::path::PathBuf;
use std::time::Duration;

use cfctl_api::Config;
use cfctl_api::config::CONFIG_FILE;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::CliError;

/// cfctl - cloud controller command-line client.
#[derive(Parser, Debug, Clone)]
#[command(name = "cfctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding config.json (defaults to ~/.cfctl).
    #[arg(long, env = "CFCTL_HOME", global = true)]
    pub home: Option<PathBuf>,

    /// API endpoint, overriding the one in the config file.
    #[arg(long, env = "CFCTL_API", global = true)]
    pub api: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 60, global = true)]
    pub timeout_secs: u64,

    /// Log requests to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load the configuration this invocation points at, applying the
    /// endpoint override.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read.
    pub fn load_config(&self) -> Result<Config, CliError> {
        let path = match &self.home {
            Some(home) => home.join(CONFIG_FILE),
            None => Config::default_path()?,
        };
        let config = Config::load(&path)?;
        Ok(match self.api.as_deref() {
            Some(api) => config.with_api_endpoint(api),
            None => config,
        })
    }

    /// HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show or change an app's instance count, memory and disk limits.
    Scale(ScaleArgs),

    /// Stop and start an app.
    Restart {
        /// App name.
        app: String,
    },

    /// List quota definitions.
    Quotas,

    /// Define a new quota.
    CreateQuota(CreateQuotaArgs),

    /// Bind an org to a quota.
    SetQuota {
        /// Org name.
        org: String,
        /// Quota name.
        quota: String,
    },

    /// List service auth tokens.
    ServiceAuthTokens,

    /// Register a service auth token.
    CreateServiceAuthToken(AuthTokenArgs),

    /// Replace the secret of a service auth token.
    UpdateServiceAuthToken(AuthTokenArgs),

    /// Delete a service auth token.
    DeleteServiceAuthToken {
        /// Service label.
        label: String,
        /// Service provider.
        provider: String,
        /// Delete without asking for confirmation.
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the scale command.
#[derive(Args, Debug, Clone, Default)]
pub struct ScaleArgs {
    /// App name.
    pub app: String,

    /// Number of instances.
    #[arg(short, long)]
    pub instances: Option<u32>,

    /// Memory limit per instance (e.g. 256M, 1024M, 1G).
    #[arg(short, long)]
    pub memory: Option<String>,

    /// Disk limit per instance (e.g. 256M, 1024M, 1G).
    #[arg(short = 'k', long)]
    pub disk: Option<String>,
}

impl ScaleArgs {
    /// Returns true if any option that changes the app was supplied.
    #[must_use]
    pub const fn any_set(&self) -> bool {
        self.instances.is_some() || self.memory.is_some() || self.disk.is_some()
    }
}

/// Arguments for the create-quota command.
#[derive(Args, Debug, Clone)]
pub struct CreateQuotaArgs {
    /// Quota name.
    pub name: String,

    /// Total memory limit (e.g. 1024M, 10G).
    #[arg(short, long)]
    pub memory: String,

    /// Maximum number of service instances.
    #[arg(short = 's', long, default_value_t = 0)]
    pub services: u64,

    /// Maximum number of routes.
    #[arg(short = 'r', long, default_value_t = 0)]
    pub routes: u64,

    /// Allow paid service plans.
    #[arg(long)]
    pub allow_paid_service_plans: bool,
}

/// Arguments for creating or updating a service auth token.
#[derive(Args, Debug, Clone)]
pub struct AuthTokenArgs {
    /// Service label.
    pub label: String,
    /// Service provider.
    pub provider: String,
    /// Token secret.
    pub token: String,
}
