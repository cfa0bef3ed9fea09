//! Service auth tokens.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ConfigReader;
use crate::error::ApiResult;
use crate::filter::Filter;
use crate::gateway::Gateway;
use crate::models::ServiceAuthTokenFields;
use crate::repository::{ResourceKind, ResourceRepository};
use crate::resources::ResourceEnvelope;

/// Wire entity of a service auth token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthTokenEntity {
    /// Service label.
    pub label: String,
    /// Service provider.
    pub provider: String,
}

#[derive(Debug, Serialize)]
struct CreateAuthToken<'a> {
    label: &'a str,
    provider: &'a str,
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateAuthToken<'a> {
    token: &'a str,
}

/// The `service_auth_tokens` collection.
#[derive(Debug)]
pub struct ServiceAuthTokens;

impl ResourceKind for ServiceAuthTokens {
    const COLLECTION: &'static str = "service_auth_tokens";
    const DISPLAY_NAME: &'static str = "Service Auth Token";
    type Entity = AuthTokenEntity;
    type Record = ServiceAuthTokenFields;

    fn to_record(envelope: ResourceEnvelope<AuthTokenEntity>) -> ServiceAuthTokenFields {
        ServiceAuthTokenFields {
            guid: envelope.metadata.guid,
            label: envelope.entity.label,
            provider: envelope.entity.provider,
            token: String::new(),
        }
    }
}

/// CRUD for service auth tokens.
#[derive(Debug, Clone)]
pub struct ServiceAuthTokenRepository<G> {
    resources: ResourceRepository<ServiceAuthTokens, G>,
}

impl<G: Gateway> ServiceAuthTokenRepository<G> {
    /// Create a repository.
    pub fn new(gateway: Arc<G>, config: Arc<dyn ConfigReader>) -> Self {
        Self {
            resources: ResourceRepository::new(gateway, config),
        }
    }

    /// All service auth tokens.
    pub async fn find_all(&self) -> ApiResult<Vec<ServiceAuthTokenFields>> {
        self.resources.find_all().await
    }

    /// The token registered for `label` and `provider`.
    pub async fn find_by_label_and_provider(
        &self,
        label: &str,
        provider: &str,
    ) -> ApiResult<ServiceAuthTokenFields> {
        let filter = Filter::by("label", label).and("provider", provider);
        self.resources.find_one(&filter).await
    }

    /// Register a token. Sends label, provider and the secret.
    pub async fn create(&self, auth_token: &ServiceAuthTokenFields) -> ApiResult<()> {
        self.resources
            .create(&CreateAuthToken {
                label: &auth_token.label,
                provider: &auth_token.provider,
                token: &auth_token.token,
            })
            .await
    }

    /// Replace the secret of an existing token. Only the secret is sent.
    pub async fn update(&self, auth_token: &ServiceAuthTokenFields) -> ApiResult<()> {
        self.resources
            .update(
                &auth_token.guid,
                &UpdateAuthToken {
                    token: &auth_token.token,
                },
            )
            .await
    }

    /// Delete a token.
    pub async fn delete(&self, auth_token: &ServiceAuthTokenFields) -> ApiResult<()> {
        self.resources.delete(&auth_token.guid).await
    }
}
