// HTTP client utilities
use crate::domain::error::CatalogError;
use crate::infrastructure::config::Config;
use reqwest::{Client, Proxy};

/// Create the shared HTTP client from config (timeout, proxy, pool settings)
pub fn create_client(config: &Config) -> Result<Client, CatalogError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(config.request_timeout())
        .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")));

    if let Some(proxy) = config.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        builder = builder.proxy(Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}
