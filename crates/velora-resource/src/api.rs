use async_trait::async_trait;
use serde_json::Value;

use velora_client::{ApiResult, RestClient};
use velora_core::{ListQuery, Page};

/// Transport seam between stores and the HTTP client.
///
/// Value-level and object-safe so stores can hold `Arc<dyn ResourceApi>`
/// and tests can substitute an in-memory fake. Implementations must be
/// thread-safe (`Send + Sync`).
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// Fetch one page of a resource collection.
    async fn list(&self, resource: &str, query: &ListQuery) -> ApiResult<Page<Value>>;

    /// Fetch a single entity.
    async fn get_one(&self, resource: &str, id: &str) -> ApiResult<Value>;

    /// Create an entity; the server assigns the id.
    async fn create(&self, resource: &str, body: &Value) -> ApiResult<Value>;

    /// Sparse update; only the fields in `body` change.
    async fn update(&self, resource: &str, id: &str, body: &Value) -> ApiResult<Value>;

    /// Delete an entity.
    async fn delete(&self, resource: &str, id: &str) -> ApiResult<()>;
}

#[async_trait]
impl ResourceApi for RestClient {
    async fn list(&self, resource: &str, query: &ListQuery) -> ApiResult<Page<Value>> {
        RestClient::list(self, resource, query).await
    }

    async fn get_one(&self, resource: &str, id: &str) -> ApiResult<Value> {
        RestClient::get_one(self, resource, id).await
    }

    async fn create(&self, resource: &str, body: &Value) -> ApiResult<Value> {
        RestClient::create(self, resource, body).await
    }

    async fn update(&self, resource: &str, id: &str, body: &Value) -> ApiResult<Value> {
        RestClient::update(self, resource, id, body).await
    }

    async fn delete(&self, resource: &str, id: &str) -> ApiResult<()> {
        RestClient::delete(self, resource, id).await
    }
}
