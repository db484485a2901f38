use crate::application::normalize::{empty_page, map_product, normalize_page};
use crate::domain::error::CatalogError;
use crate::domain::model::{
    CacheStats, CategoryFormat, CreateProductRequest, FilterState, PageRequest, Pagination,
    Product, QueryStatus, ResultPage, UpdateProductRequest,
};
use crate::domain::query_key::{CanonicalQuery, QueryKey};
use crate::domain::traits::CatalogApi;
use crate::infrastructure::storage::cache::QueryCache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Turns filter and pagination intent into one canonical list query, backed
/// by a [`QueryCache`].
///
/// Reads never fail: a failed list query yields an empty page and moves
/// [`status`](Self::status) to `Failed`. Writes propagate their errors and
/// clear the whole cache when they succeed.
///
/// Queries are neither queued nor cancelled. Every caller receives the page
/// for its own request; `status` only tracks the most recently issued query.
pub struct CatalogQueryController {
    api: Arc<dyn CatalogApi>,
    cache: QueryCache,
    pagination: Pagination,
    category_format: CategoryFormat,
    generation: AtomicU64,
    status: Mutex<QueryStatus>,
}

impl CatalogQueryController {
    pub fn new(api: Arc<dyn CatalogApi>, cache: QueryCache, pagination: Pagination) -> Self {
        Self {
            api,
            cache,
            pagination,
            category_format: CategoryFormat::default(),
            generation: AtomicU64::new(0),
            status: Mutex::new(QueryStatus::Idle),
        }
    }

    pub fn with_category_format(mut self, category_format: CategoryFormat) -> Self {
        self.category_format = category_format;
        self
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn status(&self) -> QueryStatus {
        self.lock_status().clone()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn invalidate_cache(&self) {
        self.cache.clear();
        info!("Cache manually cleared");
    }

    pub fn query_key(
        &self,
        filters: &FilterState,
        request: &PageRequest,
        page_size: u32,
    ) -> Result<QueryKey, CatalogError> {
        Ok(self.canonical_query(filters, request, page_size)?.key())
    }

    pub async fn query(
        &self,
        filters: &FilterState,
        request: &PageRequest,
        page_size: u32,
        use_cache: bool,
    ) -> ResultPage {
        let generation = self.begin_query();

        match self.try_query(filters, request, page_size, use_cache).await {
            Ok(page) => {
                self.finish_query(generation, QueryStatus::Ready);
                page
            }
            Err(e) => {
                warn!(error = %e, "Error fetching products");
                self.finish_query(
                    generation,
                    QueryStatus::Failed {
                        reason: e.to_string(),
                    },
                );
                empty_page(request, page_size)
            }
        }
    }

    /// Clear the cache, then query bypassing it
    pub async fn refresh(
        &self,
        filters: &FilterState,
        request: &PageRequest,
        page_size: u32,
    ) -> ResultPage {
        self.invalidate_cache();
        self.query(filters, request, page_size, false).await
    }

    /// Single product by id. Not cached; `NotFound` is returned to the caller.
    pub async fn get_product(&self, id: i64) -> Result<Product, CatalogError> {
        let raw = self.api.get_product(id).await?;
        map_product(raw)
    }

    pub async fn create(&self, request: &CreateProductRequest) -> Result<Product, CatalogError> {
        request.validate()?;
        let raw = self.api.create_product(request).await?;
        self.cache.clear();
        info!(id = raw.id, "Cache cleared after product creation");
        map_product(raw)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateProductRequest,
    ) -> Result<Product, CatalogError> {
        request.validate()?;
        let raw = self.api.update_product(id, request).await?;
        self.cache.clear();
        info!(id, "Cache cleared after product update");
        map_product(raw)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        self.api.delete_product(id).await?;
        self.cache.clear();
        info!(id, "Cache cleared after product deletion");
        Ok(())
    }

    pub async fn toggle_status(&self, id: i64) -> Result<Product, CatalogError> {
        let raw = self.api.toggle_status(id).await?;
        self.cache.clear();
        info!(id, "Cache cleared after status toggle");
        map_product(raw)
    }

    async fn try_query(
        &self,
        filters: &FilterState,
        request: &PageRequest,
        page_size: u32,
        use_cache: bool,
    ) -> Result<ResultPage, CatalogError> {
        let query = self.canonical_query(filters, request, page_size)?;
        let key = query.key();

        if use_cache {
            if let Some(page) = self.cache.get(&key) {
                debug!(%key, "Returning cached page");
                return Ok(page);
            }
        }

        debug!(%key, "Fetching fresh page");
        let raw = self.api.list_products(&query).await?;
        let page = normalize_page(raw, request, page_size)?;

        if use_cache {
            self.cache.set(key.clone(), page.clone());
            debug!(%key, items = page.len(), "Page cached");
        }

        Ok(page)
    }

    fn canonical_query(
        &self,
        filters: &FilterState,
        request: &PageRequest,
        page_size: u32,
    ) -> Result<CanonicalQuery, CatalogError> {
        CanonicalQuery::build(
            filters,
            &self.pagination,
            request,
            page_size,
            self.category_format,
        )
    }

    fn begin_query(&self) -> u64 {
        let mut status = self.lock_status();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *status = QueryStatus::Loading;
        generation
    }

    // 只有最新一次查询的结果会更新状态
    fn finish_query(&self, generation: u64, outcome: QueryStatus) {
        let mut status = self.lock_status();
        if self.generation.load(Ordering::SeqCst) == generation {
            *status = outcome;
        } else {
            debug!(generation, "Superseded query finished, status left unchanged");
        }
    }

    fn lock_status(&self) -> MutexGuard<'_, QueryStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
