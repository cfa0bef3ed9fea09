//! # cfctl-api
//!
//! Access layer for the cloud controller's v2 management API.
//!
//! Every resource kind the CLI works with (quotas, service auth tokens,
//! applications, organizations) is served by the same listing contract: a
//! paginated collection of `{metadata, entity}` envelopes, optionally filtered
//! server-side with a `q=field:value;field:value` expression. This crate
//! implements that contract once in [`repository::ResourceRepository`] and
//! layers thin per-kind repositories on top.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐   ResourceKind   ┌───────────────────────┐
//! │ QuotaRepository, ... │─────────────────►│  ResourceRepository   │
//! └──────────────────────┘                  └───────────┬───────────┘
//!                                                       │ Gateway
//!                                           ┌───────────▼───────────┐
//!                                           │  HttpGateway (reqwest) │
//!                                           └───────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod applications;
pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod organizations;
pub mod quotas;
pub mod repository;
pub mod resources;
pub mod service_auth_tokens;

#[cfg(test)]
pub(crate) mod fake;

pub use applications::ApplicationRepository;
pub use config::{Config, ConfigError, ConfigReader};
pub use error::{ApiError, ApiResult};
pub use filter::Filter;
pub use gateway::{Gateway, HttpGateway};
pub use models::{
    AppParams, Application, OrganizationFields, QuotaFields, ServiceAuthTokenFields, SpaceFields,
};
pub use organizations::OrganizationRepository;
pub use quotas::QuotaRepository;
pub use repository::{ResourceKind, ResourceRepository};
pub use resources::{Metadata, PageEnvelope, ResourceEnvelope};
pub use service_auth_tokens::ServiceAuthTokenRepository;
