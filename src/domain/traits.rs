use crate::domain::error::CatalogError;
use crate::domain::model::{CreateProductRequest, UpdateProductRequest};
use crate::domain::query_key::CanonicalQuery;
use crate::domain::raw::{ApiListResponse, ApiProduct};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Network boundary of the catalog.
///
/// Implementations perform exactly one request per call and never retry.
/// A 404 must surface as `CatalogError::NotFound`.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products` with the canonical query parameters
    async fn list_products(&self, query: &CanonicalQuery) -> Result<ApiListResponse, CatalogError>;

    /// `GET /products/{id}`
    async fn get_product(&self, id: i64) -> Result<ApiProduct, CatalogError>;

    /// `POST /products`
    async fn create_product(&self, request: &CreateProductRequest)
        -> Result<ApiProduct, CatalogError>;

    /// `PUT /products/{id}`
    async fn update_product(
        &self,
        id: i64,
        request: &UpdateProductRequest,
    ) -> Result<ApiProduct, CatalogError>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, id: i64) -> Result<(), CatalogError>;

    /// `PATCH /products/{id}/toggle-status`
    async fn toggle_status(&self, id: i64) -> Result<ApiProduct, CatalogError>;
}

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
