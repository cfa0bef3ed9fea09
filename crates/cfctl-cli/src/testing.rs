//! Helpers for command tests run against a mock API server.

use std::sync::Arc;

use cfctl_api::{Config, HttpGateway, OrganizationFields, SpaceFields};
use httpmock::MockServer;

use crate::context::Context;

/// A logged-in config targeting org `acme` (o1) and space `dev` (s1).
pub(crate) fn config(server: &MockServer) -> Config {
    Config {
        api_endpoint: server.base_url(),
        access_token: "bearer test-token".to_string(),
        username: "admin".to_string(),
        organization_fields: Some(OrganizationFields {
            guid: "o1".into(),
            name: "acme".into(),
            quota_definition_guid: None,
        }),
        space_fields: Some(SpaceFields {
            guid: "s1".into(),
            name: "dev".into(),
        }),
    }
}

pub(crate) fn context_with(config: Config) -> Context<HttpGateway> {
    let gateway = HttpGateway::new().expect("gateway");
    Context::new(Arc::new(gateway), Arc::new(config))
}

pub(crate) fn context(server: &MockServer) -> Context<HttpGateway> {
    context_with(config(server))
}

/// Render everything a command wrote.
pub(crate) fn written(out: &[u8]) -> String {
    String::from_utf8_lossy(out).into_owned()
}
