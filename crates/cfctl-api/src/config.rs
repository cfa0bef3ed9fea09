//! Client configuration: API endpoint, access token and the targeted
//! organization and space.
//!
//! Repositories only read configuration, through [`ConfigReader`]. [`Config`]
//! is the JSON-file backed implementation the binary uses.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{OrganizationFields, SpaceFields};

/// Directory under the home directory holding the config file.
pub const CONFIG_DIR: &str = ".cfctl";

/// File name of the config file.
pub const CONFIG_FILE: &str = "config.json";

/// Read access to the client configuration.
pub trait ConfigReader: Send + Sync {
    /// Base URL of the API, without a trailing slash.
    fn api_endpoint(&self) -> &str;

    /// Access token, including its scheme (e.g. `bearer ...`).
    fn access_token(&self) -> &str;

    /// Name of the logged-in user.
    fn username(&self) -> &str;

    /// Targeted organization, if any.
    fn organization_fields(&self) -> Option<&OrganizationFields>;

    /// Targeted space, if any.
    fn space_fields(&self) -> Option<&SpaceFields>;

    /// Returns true if an access token is present.
    fn is_logged_in(&self) -> bool {
        !self.access_token().is_empty()
    }

    /// Returns true if an organization is targeted.
    fn has_organization(&self) -> bool {
        self.organization_fields().is_some_and(|org| !org.guid.is_empty())
    }

    /// Returns true if a space is targeted.
    fn has_space(&self) -> bool {
        self.space_fields().is_some_and(|space| !space.guid.is_empty())
    }
}

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid config file {}: {reason}", path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// The reason parsing failed.
        reason: String,
    },

    /// No home directory to look for the config file in.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// JSON-file backed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API base URL.
    #[serde(default)]
    pub api_endpoint: String,
    /// Access token.
    #[serde(default)]
    pub access_token: String,
    /// Logged-in user.
    #[serde(default)]
    pub username: String,
    /// Targeted organization.
    #[serde(default)]
    pub organization_fields: Option<OrganizationFields>,
    /// Targeted space.
    #[serde(default)]
    pub space_fields: Option<SpaceFields>,
}

impl Config {
    /// Default config file location, `~/.cfctl/config.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Load the config file at `path`.
    ///
    /// A missing file yields an empty configuration (not logged in, nothing
    /// targeted).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using empty configuration");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.api_endpoint = normalize_endpoint(&config.api_endpoint);
        debug!(path = %path.display(), endpoint = %config.api_endpoint, "loaded config");
        Ok(config)
    }

    /// Replace the API endpoint.
    #[must_use]
    pub fn with_api_endpoint(mut self, endpoint: &str) -> Self {
        self.api_endpoint = normalize_endpoint(endpoint);
        self
    }
}

impl ConfigReader for Config {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn organization_fields(&self) -> Option<&OrganizationFields> {
        self.organization_fields.as_ref()
    }

    fn space_fields(&self) -> Option<&SpaceFields> {
        self.space_fields.as_ref()
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim().trim_end_matches('/').to_string()
}
