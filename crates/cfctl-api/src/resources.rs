//! Wire envelopes shared by every resource collection.
//!
//! The cloud controller wraps each entity as `{"metadata": {...}, "entity":
//! {...}}` and each listing page as `{"resources": [...], "next_url": ...}`.

use serde::Deserialize;

/// Server-assigned identity of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    /// Unique id, immutable once created.
    pub guid: String,
    /// Canonical path of the resource.
    #[serde(default)]
    pub url: Option<String>,
}

/// One resource as delivered by the API: identity plus kind-specific entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceEnvelope<E> {
    /// Identity block.
    pub metadata: Metadata,
    /// Kind-specific attributes.
    pub entity: E,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageEnvelope<E> {
    /// Total number of matching resources across all pages.
    #[serde(default)]
    pub total_results: Option<u64>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u64>,
    /// Cursor to the next page; absent on the last page.
    #[serde(default)]
    pub next_url: Option<String>,
    /// Resources on this page, in server order.
    #[serde(default = "Vec::new")]
    pub resources: Vec<ResourceEnvelope<E>>,
}
