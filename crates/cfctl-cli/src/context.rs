//! Shared state handed to every command.

use std::sync::Arc;

use cfctl_api::{
    ApplicationRepository, ConfigReader, Gateway, OrganizationRepository, QuotaRepository,
    ServiceAuthTokenRepository,
};

use crate::requirements::RequirementEvaluator;

/// Configuration plus one repository per resource kind, all sharing the same
/// gateway.
pub struct Context<G> {
    config: Arc<dyn ConfigReader>,
    /// Quota definitions.
    pub quotas: QuotaRepository<G>,
    /// Service auth tokens.
    pub auth_tokens: ServiceAuthTokenRepository<G>,
    /// Applications.
    pub apps: ApplicationRepository<G>,
    /// Organizations.
    pub orgs: OrganizationRepository<G>,
}

impl<G: Gateway> Context<G> {
    /// Wire up the repositories.
    pub fn new(gateway: Arc<G>, config: Arc<dyn ConfigReader>) -> Self {
        Self {
            quotas: QuotaRepository::new(Arc::clone(&gateway), Arc::clone(&config)),
            auth_tokens: ServiceAuthTokenRepository::new(Arc::clone(&gateway), Arc::clone(&config)),
            apps: ApplicationRepository::new(Arc::clone(&gateway), Arc::clone(&config)),
            orgs: OrganizationRepository::new(gateway, Arc::clone(&config)),
            config,
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &dyn ConfigReader {
        self.config.as_ref()
    }

    /// An evaluator for command preconditions.
    pub fn evaluator(&self) -> RequirementEvaluator<'_, G> {
        RequirementEvaluator::new(self.config(), &self.apps, &self.orgs)
    }

    /// The name of the logged-in user.
    pub fn username(&self) -> &str {
        self.config.username()
    }

    /// "org O / space S as U", describing where an app command acts.
    pub fn target_description(&self) -> String {
        let org = self.config.organization_fields().map_or("", |org| org.name.as_str());
        let space = self.config.space_fields().map_or("", |space| space.name.as_str());
        format!("org {org} / space {space} as {}", self.username())
    }
}
