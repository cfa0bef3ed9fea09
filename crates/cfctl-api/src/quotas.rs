//! Quota definitions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ConfigReader;
use crate::error::ApiResult;
use crate::filter::Filter;
use crate::gateway::Gateway;
use crate::models::QuotaFields;
use crate::repository::{ResourceKind, ResourceRepository};
use crate::resources::ResourceEnvelope;

/// Wire entity of a quota definition; also its creation body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaEntity {
    /// Quota name.
    pub name: String,
    /// Memory limit in megabytes.
    #[serde(default)]
    pub memory_limit: u64,
    /// Maximum number of service instances.
    #[serde(default)]
    pub total_services: u64,
    /// Maximum number of routes.
    #[serde(default)]
    pub total_routes: u64,
    /// Whether paid service plans may be used.
    #[serde(default)]
    pub non_basic_services_allowed: bool,
}

impl From<&QuotaFields> for QuotaEntity {
    fn from(quota: &QuotaFields) -> Self {
        Self {
            name: quota.name.clone(),
            memory_limit: quota.memory_limit,
            total_services: quota.total_services,
            total_routes: quota.total_routes,
            non_basic_services_allowed: quota.non_basic_services_allowed,
        }
    }
}

/// The `quota_definitions` collection.
#[derive(Debug)]
pub struct Quotas;

impl ResourceKind for Quotas {
    const COLLECTION: &'static str = "quota_definitions";
    const DISPLAY_NAME: &'static str = "Quota";
    type Entity = QuotaEntity;
    type Record = QuotaFields;

    fn to_record(envelope: ResourceEnvelope<QuotaEntity>) -> QuotaFields {
        let ResourceEnvelope { metadata, entity } = envelope;
        QuotaFields {
            guid: metadata.guid,
            name: entity.name,
            memory_limit: entity.memory_limit,
            total_services: entity.total_services,
            total_routes: entity.total_routes,
            non_basic_services_allowed: entity.non_basic_services_allowed,
        }
    }
}

/// Quota lookups and the organization-quota association.
#[derive(Debug, Clone)]
pub struct QuotaRepository<G> {
    resources: ResourceRepository<Quotas, G>,
}

impl<G: Gateway> QuotaRepository<G> {
    /// Create a repository.
    pub fn new(gateway: Arc<G>, config: Arc<dyn ConfigReader>) -> Self {
        Self {
            resources: ResourceRepository::new(gateway, config),
        }
    }

    /// All quota definitions.
    pub async fn find_all(&self) -> ApiResult<Vec<QuotaFields>> {
        self.resources.find_all().await
    }

    /// The quota named `name`.
    pub async fn find_by_name(&self, name: &str) -> ApiResult<QuotaFields> {
        self.resources.find_one(&Filter::by("name", name)).await
    }

    /// Create a quota definition. The guid is assigned by the server and not
    /// read back.
    pub async fn create(&self, quota: &QuotaFields) -> ApiResult<()> {
        self.resources.create(&QuotaEntity::from(quota)).await
    }

    /// Bind organization `org_guid` to quota `quota_guid`.
    pub async fn update(&self, org_guid: &str, quota_guid: &str) -> ApiResult<()> {
        self.resources
            .update_association("organizations", org_guid, "quota_definition", quota_guid)
            .await
    }
}
