//! Command preconditions.
//!
//! A command declares an ordered list of [`Requirement`]s. They are checked
//! in order before the command does anything, and the first one that fails
//! aborts the command. Requirements that look up an entity by name keep the
//! record so the command can use it without a second request.

use cfctl_api::{
    ApiError, Application, ApplicationRepository, ConfigReader, Gateway, OrganizationFields,
    OrganizationRepository,
};
use thiserror::Error;
use tracing::debug;

/// A precondition of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// An access token is configured.
    Login,
    /// An organization is targeted.
    TargetedOrg,
    /// A space is targeted.
    TargetedSpace,
    /// The named app exists in the targeted space.
    Application(String),
    /// The named organization exists.
    Organization(String),
}

/// A failed precondition.
#[derive(Debug, Error)]
pub enum RequirementError {
    /// No access token.
    #[error("not logged in; log in before running this command")]
    NotLoggedIn,

    /// No organization targeted.
    #[error("no org targeted; target an org before running this command")]
    NoOrgTargeted,

    /// No space targeted.
    #[error("no space targeted; target a space before running this command")]
    NoSpaceTargeted,

    /// A named entity could not be resolved.
    #[error(transparent)]
    Unresolved(ApiError),

    /// A command asked for a record it never declared a requirement for.
    #[error("no {0} was resolved for this command")]
    Undeclared(&'static str),
}

/// Records resolved while evaluating requirements.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    application: Option<Application>,
    organization: Option<OrganizationFields>,
}

impl Resolved {
    /// The app resolved by [`Requirement::Application`].
    pub fn application(&self) -> Result<&Application, RequirementError> {
        self.application.as_ref().ok_or(RequirementError::Undeclared("app"))
    }

    /// The organization resolved by [`Requirement::Organization`].
    pub fn organization(&self) -> Result<&OrganizationFields, RequirementError> {
        self.organization.as_ref().ok_or(RequirementError::Undeclared("org"))
    }
}

/// Checks requirements against the configuration and the API.
pub struct RequirementEvaluator<'a, G> {
    config: &'a dyn ConfigReader,
    apps: &'a ApplicationRepository<G>,
    orgs: &'a OrganizationRepository<G>,
}

impl<'a, G: Gateway> RequirementEvaluator<'a, G> {
    /// Create an evaluator.
    pub fn new(
        config: &'a dyn ConfigReader,
        apps: &'a ApplicationRepository<G>,
        orgs: &'a OrganizationRepository<G>,
    ) -> Self {
        Self { config, apps, orgs }
    }

    /// Check `requirements` in order, stopping at the first failure.
    pub async fn evaluate(
        &self,
        requirements: &[Requirement],
    ) -> Result<Resolved, RequirementError> {
        let mut resolved = Resolved::default();
        for requirement in requirements {
            debug!(?requirement, "checking requirement");
            match requirement {
                Requirement::Login => {
                    if !self.config.is_logged_in() {
                        return Err(RequirementError::NotLoggedIn);
                    }
                }
                Requirement::TargetedOrg => {
                    if !self.config.has_organization() {
                        return Err(RequirementError::NoOrgTargeted);
                    }
                }
                Requirement::TargetedSpace => {
                    if !self.config.has_space() {
                        return Err(RequirementError::NoSpaceTargeted);
                    }
                }
                Requirement::Application(name) => {
                    let space_guid = self
                        .config
                        .space_fields()
                        .filter(|space| !space.guid.is_empty())
                        .map(|space| space.guid.as_str())
                        .ok_or(RequirementError::NoSpaceTargeted)?;
                    let app = self
                        .apps
                        .find_by_name(space_guid, name)
                        .await
                        .map_err(RequirementError::Unresolved)?;
                    resolved.application = Some(app);
                }
                Requirement::Organization(name) => {
                    let org = self
                        .orgs
                        .find_by_name(name)
                        .await
                        .map_err(RequirementError::Unresolved)?;
                    resolved.organization = Some(org);
                }
            }
        }
        Ok(resolved)
    }
}
