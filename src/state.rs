use crate::application::query::CatalogQueryController;
use crate::application::session::CatalogSession;
use crate::domain::error::CatalogError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::client::HttpCatalogApi;
use crate::infrastructure::storage::cache::QueryCache;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<CatalogQueryController>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        let api = HttpCatalogApi::from_config(&config)?;
        let cache = QueryCache::with_system_clock(config.cache_ttl());
        let controller = CatalogQueryController::new(Arc::new(api), cache, config.pagination())
            .with_category_format(config.category_format);

        Ok(Self {
            controller: Arc::new(controller),
            config: Arc::new(config),
        })
    }

    pub fn session(&self, page_size: Option<u32>) -> CatalogSession {
        CatalogSession::new(
            self.controller.clone(),
            page_size.unwrap_or(self.config.page_size),
        )
    }
}
