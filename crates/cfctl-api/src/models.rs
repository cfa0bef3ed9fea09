//! Domain records: the flattened, typed view of each resource kind.

use serde::{Deserialize, Serialize};

/// Application state value for a running app.
pub const STATE_STARTED: &str = "STARTED";

/// Application state value for a stopped app.
pub const STATE_STOPPED: &str = "STOPPED";

/// A quota definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuotaFields {
    /// Server-assigned id; empty for records not yet created.
    pub guid: String,
    /// Quota name.
    pub name: String,
    /// Memory limit in megabytes.
    pub memory_limit: u64,
    /// Maximum number of service instances.
    pub total_services: u64,
    /// Maximum number of routes.
    pub total_routes: u64,
    /// Whether paid service plans may be used.
    pub non_basic_services_allowed: bool,
}

/// A service auth token.
///
/// The secret `token` is write-only; records read from the API carry an
/// empty token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceAuthTokenFields {
    /// Server-assigned id.
    pub guid: String,
    /// Service label.
    pub label: String,
    /// Service provider.
    pub provider: String,
    /// Secret token value.
    #[serde(skip)]
    pub token: String,
}

/// An application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Application {
    /// Server-assigned id.
    pub guid: String,
    /// Application name.
    pub name: String,
    /// Desired state, `STARTED` or `STOPPED`.
    pub state: String,
    /// Number of instances.
    pub instances: u32,
    /// Memory per instance in megabytes.
    pub memory: u64,
    /// Disk quota per instance in megabytes.
    pub disk_quota: u64,
    /// Owning space.
    pub space_guid: String,
}

impl Application {
    /// Returns true if the app's desired state is stopped.
    pub fn is_stopped(&self) -> bool {
        self.state.eq_ignore_ascii_case(STATE_STOPPED)
    }
}

/// Sparse application update.
///
/// Every field left as `None` is omitted from the request body and leaves the
/// remote value unchanged; `Some(0)` is a real update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppParams {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New desired state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// New instance count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
    /// New memory limit in megabytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    /// New disk quota in megabytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_quota: Option<u64>,
}

impl AppParams {
    /// Parameters that only change the desired state.
    #[must_use]
    pub fn with_state(state: &str) -> Self {
        Self {
            state: Some(state.to_string()),
            ..Self::default()
        }
    }

    /// Returns true if no field is set.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.state.is_none()
            && self.instances.is_none()
            && self.memory.is_none()
            && self.disk_quota.is_none()
    }

    /// Returns true if a field that only takes effect after a restart is set.
    pub const fn requires_restart(&self) -> bool {
        self.memory.is_some() || self.disk_quota.is_some()
    }
}

/// An organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationFields {
    /// Server-assigned id.
    pub guid: String,
    /// Organization name.
    pub name: String,
    /// Quota definition the organization is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_definition_guid: Option<String>,
}

/// A space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceFields {
    /// Server-assigned id.
    pub guid: String,
    /// Space name.
    pub name: String,
}
