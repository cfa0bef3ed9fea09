//! Generic repository over a paginated resource collection.
//!
//! Listing, filtering, mapping and the CRUD requests are identical for every
//! resource kind; a [`ResourceKind`] supplies only the collection name, the
//! wire entity type and the envelope-to-record mapping.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, trace};

use crate::config::ConfigReader;
use crate::error::{ApiError, ApiResult};
use crate::filter::Filter;
use crate::gateway::Gateway;
use crate::resources::{PageEnvelope, ResourceEnvelope};

/// Strategy describing one resource collection.
pub trait ResourceKind {
    /// Collection segment under `/v2/`, e.g. `quota_definitions`.
    const COLLECTION: &'static str;

    /// Name used in not-found reports, e.g. `Quota`.
    const DISPLAY_NAME: &'static str;

    /// Wire representation of the entity block.
    type Entity: DeserializeOwned + Send;

    /// Domain record produced from one envelope.
    type Record: Send;

    /// Map one envelope into a domain record.
    fn to_record(envelope: ResourceEnvelope<Self::Entity>) -> Self::Record;
}

/// Repository for the collection described by `K`.
pub struct ResourceRepository<K, G> {
    gateway: Arc<G>,
    config: Arc<dyn ConfigReader>,
    kind: PhantomData<fn() -> K>,
}

impl<K, G> Clone for ResourceRepository<K, G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            config: Arc::clone(&self.config),
            kind: PhantomData,
        }
    }
}

impl<K: ResourceKind, G> fmt::Debug for ResourceRepository<K, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRepository")
            .field("collection", &K::COLLECTION)
            .field("endpoint", &self.config.api_endpoint())
            .finish_non_exhaustive()
    }
}

impl<K, G> ResourceRepository<K, G>
where
    K: ResourceKind,
    G: Gateway,
{
    /// Create a repository reading endpoint and token from `config`.
    pub fn new(gateway: Arc<G>, config: Arc<dyn ConfigReader>) -> Self {
        Self {
            gateway,
            config,
            kind: PhantomData,
        }
    }

    /// Full URL of a path under `/v2/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/v2/{}", self.config.api_endpoint(), path)
    }

    fn resource_url(&self, guid: &str) -> String {
        self.url(&format!("{}/{guid}", K::COLLECTION))
    }

    /// List every resource in the collection, following all pages.
    pub async fn find_all(&self) -> ApiResult<Vec<K::Record>> {
        self.find_all_in(K::COLLECTION, None).await
    }

    /// List resources matching a server-side filter.
    pub async fn find_by_filter(&self, filter: &Filter) -> ApiResult<Vec<K::Record>> {
        self.find_all_in(K::COLLECTION, Some(filter)).await
    }

    /// First resource matching a filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] carrying the filter's lookup key when
    /// nothing matches.
    pub async fn find_one(&self, filter: &Filter) -> ApiResult<K::Record> {
        self.find_one_in(K::COLLECTION, filter).await
    }

    /// List resources under a nested collection path such as
    /// `spaces/{guid}/apps`.
    pub async fn find_all_in(
        &self,
        collection_path: &str,
        filter: Option<&Filter>,
    ) -> ApiResult<Vec<K::Record>> {
        let mut url = self.url(collection_path);
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            url.push('?');
            url.push_str(&filter.to_query());
        }
        self.follow_pages(url).await
    }

    /// First resource under a nested collection path matching a filter.
    ///
    /// Multiple matches are not an error; the first one in server order wins.
    pub async fn find_one_in(
        &self,
        collection_path: &str,
        filter: &Filter,
    ) -> ApiResult<K::Record> {
        self.find_all_in(collection_path, Some(filter))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound {
                kind: K::DISPLAY_NAME,
                key: filter.lookup_key(),
            })
    }

    /// Request `first_url` and every page after it, mapping all resources in
    /// order. Any failed page aborts the whole listing.
    ///
    /// A cursor naming a page already fetched in this listing is a decoding
    /// error, so a cycle of any length ends the loop.
    async fn follow_pages(&self, first_url: String) -> ApiResult<Vec<K::Record>> {
        let token = self.config.access_token();
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(first_url);

        while let Some(url) = next.take() {
            let page: PageEnvelope<K::Entity> = self.gateway.get_resource(&url, token).await?;
            records.extend(page.resources.into_iter().map(K::to_record));
            visited.insert(url.clone());

            if let Some(cursor) = page.next_url {
                let next_url = self.absolute(&cursor);
                if visited.contains(&next_url) {
                    return Err(ApiError::Decoding {
                        reason: format!("next_url of {url} points back to {next_url}"),
                    });
                }
                trace!(collection = K::COLLECTION, next = %next_url, "Following page cursor");
                next = Some(next_url);
            }
        }

        debug!(
            collection = K::COLLECTION,
            pages = visited.len(),
            count = records.len(),
            "Listed resources"
        );
        Ok(records)
    }

    fn absolute(&self, cursor: &str) -> String {
        if cursor.starts_with("http://") || cursor.starts_with("https://") {
            cursor.to_string()
        } else if cursor.starts_with('/') {
            format!("{}{cursor}", self.config.api_endpoint())
        } else {
            format!("{}/{cursor}", self.config.api_endpoint())
        }
    }

    /// Create a resource from a flat JSON body.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> ApiResult<()> {
        let body = encode(body)?;
        info!(collection = K::COLLECTION, "Creating resource");
        self.gateway
            .create_resource(&self.url(K::COLLECTION), self.config.access_token(), body)
            .await
    }

    /// Update a resource with a body holding only the fields to change.
    pub async fn update<B: Serialize + ?Sized>(&self, guid: &str, body: &B) -> ApiResult<()> {
        let body = encode(body)?;
        info!(collection = K::COLLECTION, guid, "Updating resource");
        self.gateway
            .update_resource(&self.resource_url(guid), self.config.access_token(), body)
            .await
    }

    /// Update a resource and map the server's updated representation.
    pub async fn update_returning<B: Serialize + ?Sized>(
        &self,
        guid: &str,
        body: &B,
    ) -> ApiResult<K::Record> {
        let body = encode(body)?;
        info!(collection = K::COLLECTION, guid, "Updating resource");
        let envelope: ResourceEnvelope<K::Entity> = self
            .gateway
            .update_resource_for_response(
                &self.resource_url(guid),
                self.config.access_token(),
                body,
            )
            .await?;
        Ok(K::to_record(envelope))
    }

    /// Delete a resource.
    pub async fn delete(&self, guid: &str) -> ApiResult<()> {
        info!(collection = K::COLLECTION, guid, "Deleting resource");
        self.gateway
            .delete_resource(&self.resource_url(guid), self.config.access_token())
            .await
    }

    /// Associate `owner` with `target` by id only:
    /// `PUT /v2/{owner_collection}/{owner_guid}` with `{"{field}_guid": target}`.
    pub async fn update_association(
        &self,
        owner_collection: &str,
        owner_guid: &str,
        field: &str,
        target_guid: &str,
    ) -> ApiResult<()> {
        let mut body = serde_json::Map::new();
        body.insert(
            format!("{field}_guid"),
            serde_json::Value::String(target_guid.to_string()),
        );
        let body = encode(&body)?;

        info!(owner_collection, owner_guid, field, target_guid, "Updating association");
        self.gateway
            .update_resource(
                &self.url(&format!("{owner_collection}/{owner_guid}")),
                self.config.access_token(),
                body,
            )
            .await
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body).map_err(|e| ApiError::Encoding { reason: e.to_string() })
}
