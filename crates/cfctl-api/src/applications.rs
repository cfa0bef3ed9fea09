//! Applications.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::ConfigReader;
use crate::error::ApiResult;
use crate::filter::Filter;
use crate::gateway::Gateway;
use crate::models::{AppParams, Application, STATE_STOPPED};
use crate::repository::{ResourceKind, ResourceRepository};
use crate::resources::ResourceEnvelope;

/// Wire entity of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationEntity {
    /// Application name.
    pub name: String,
    /// Desired state.
    #[serde(default)]
    pub state: Option<String>,
    /// Number of instances.
    #[serde(default)]
    pub instances: u32,
    /// Memory per instance in megabytes.
    #[serde(default)]
    pub memory: u64,
    /// Disk quota per instance in megabytes.
    #[serde(default)]
    pub disk_quota: u64,
    /// Owning space.
    #[serde(default)]
    pub space_guid: String,
}

/// The `apps` collection.
#[derive(Debug)]
pub struct Applications;

impl ResourceKind for Applications {
    const COLLECTION: &'static str = "apps";
    const DISPLAY_NAME: &'static str = "App";
    type Entity = ApplicationEntity;
    type Record = Application;

    fn to_record(envelope: ResourceEnvelope<ApplicationEntity>) -> Application {
        let ResourceEnvelope { metadata, entity } = envelope;
        Application {
            guid: metadata.guid,
            name: entity.name,
            state: entity.state.unwrap_or_else(|| STATE_STOPPED.to_string()),
            instances: entity.instances,
            memory: entity.memory,
            disk_quota: entity.disk_quota,
            space_guid: entity.space_guid,
        }
    }
}

/// Application lookups and sparse updates.
#[derive(Debug, Clone)]
pub struct ApplicationRepository<G> {
    resources: ResourceRepository<Applications, G>,
}

impl<G: Gateway> ApplicationRepository<G> {
    /// Create a repository.
    pub fn new(gateway: Arc<G>, config: Arc<dyn ConfigReader>) -> Self {
        Self {
            resources: ResourceRepository::new(gateway, config),
        }
    }

    /// The app named `name` inside space `space_guid`.
    pub async fn find_by_name(&self, space_guid: &str, name: &str) -> ApiResult<Application> {
        self.resources
            .find_one_in(&format!("spaces/{space_guid}/apps"), &Filter::by("name", name))
            .await
    }

    /// Apply a sparse update and return the server's updated app.
    pub async fn update(&self, app_guid: &str, params: &AppParams) -> ApiResult<Application> {
        self.resources.update_returning(app_guid, params).await
    }
}
