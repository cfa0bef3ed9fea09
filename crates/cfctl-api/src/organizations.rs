//! Organizations.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::ConfigReader;
use crate::error::ApiResult;
use crate::filter::Filter;
use crate::gateway::Gateway;
use crate::models::OrganizationFields;
use crate::repository::{ResourceKind, ResourceRepository};
use crate::resources::ResourceEnvelope;

/// Wire entity of an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrganizationEntity {
    /// Organization name.
    pub name: String,
    /// Bound quota definition.
    #[serde(default)]
    pub quota_definition_guid: Option<String>,
}

/// The `organizations` collection.
#[derive(Debug)]
pub struct Organizations;

impl ResourceKind for Organizations {
    const COLLECTION: &'static str = "organizations";
    const DISPLAY_NAME: &'static str = "Org";
    type Entity = OrganizationEntity;
    type Record = OrganizationFields;

    fn to_record(envelope: ResourceEnvelope<OrganizationEntity>) -> OrganizationFields {
        OrganizationFields {
            guid: envelope.metadata.guid,
            name: envelope.entity.name,
            quota_definition_guid: envelope.entity.quota_definition_guid,
        }
    }
}

/// Organization lookups.
#[derive(Debug, Clone)]
pub struct OrganizationRepository<G> {
    resources: ResourceRepository<Organizations, G>,
}

impl<G: Gateway> OrganizationRepository<G> {
    /// Create a repository.
    pub fn new(gateway: Arc<G>, config: Arc<dyn ConfigReader>) -> Self {
        Self {
            resources: ResourceRepository::new(gateway, config),
        }
    }

    /// Every organization visible to the user.
    pub async fn find_all(&self) -> ApiResult<Vec<OrganizationFields>> {
        self.resources.find_all().await
    }

    /// The organization named `name`.
    pub async fn find_by_name(&self, name: &str) -> ApiResult<OrganizationFields> {
        self.resources.find_one(&Filter::by("name", name)).await
    }
}
