use crate::domain::error::CatalogError;
use crate::domain::model::{CategoryFormat, CreateProductRequest, UpdateProductRequest};
use crate::domain::query_key::CanonicalQuery;
use crate::domain::raw::{ApiListResponse, ApiProduct};
use crate::domain::traits::CatalogApi;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::debug;

#[derive(Serialize, Debug)]
struct CreateProductBody<'a> {
    name: &'a str,
    price: f64,
    category: &'static str,
}

#[derive(Serialize, Debug)]
struct UpdateProductBody<'a> {
    name: &'a str,
    price: f64,
    category: &'static str,
    status: &'static str,
}

/// reqwest implementation of the catalog API
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
    category_format: CategoryFormat,
}

impl HttpCatalogApi {
    pub fn new(client: Client, base_url: impl Into<String>, category_format: CategoryFormat) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            category_format,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let client = create_client(config)?;
        Ok(Self::new(client, config.api_url.clone(), config.category_format))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: i64) -> String {
        format!("{}/products/{}", self.base_url, id)
    }
}

// 非 2xx 统一转成错误；带 id 的请求 404 转为 NotFound
async fn check_status(response: Response, id: Option<i64>) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(CatalogError::NotFound { id });
    }

    let body = response.text().await.unwrap_or_default();
    Err(CatalogError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_products(&self, query: &CanonicalQuery) -> Result<ApiListResponse, CatalogError> {
        debug!(url = %self.products_url(), params = ?query.params(), "GET products");
        let response = self
            .client
            .get(self.products_url())
            .query(query.params())
            .send()
            .await?;

        // 先取文本再解析，保留 serde 的具体错误信息
        let body = check_status(response, None).await?.text().await?;
        let page = serde_json::from_str::<ApiListResponse>(&body)?;
        Ok(page)
    }

    async fn get_product(&self, id: i64) -> Result<ApiProduct, CatalogError> {
        debug!(id, "GET product");
        let response = self.client.get(self.product_url(id)).send().await?;
        let product = check_status(response, Some(id))
            .await?
            .json::<ApiProduct>()
            .await?;
        Ok(product)
    }

    async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<ApiProduct, CatalogError> {
        let body = CreateProductBody {
            name: &request.name,
            price: request.price,
            category: self.category_format.render(request.category),
        };
        debug!(?body, "POST product");

        let response = self
            .client
            .post(self.products_url())
            .json(&body)
            .send()
            .await?;
        let product = check_status(response, None)
            .await?
            .json::<ApiProduct>()
            .await?;
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i64,
        request: &UpdateProductRequest,
    ) -> Result<ApiProduct, CatalogError> {
        let body = UpdateProductBody {
            name: &request.name,
            price: request.price,
            category: self.category_format.render(request.category),
            status: request.status.as_str(),
        };
        debug!(id, ?body, "PUT product");

        let response = self
            .client
            .put(self.product_url(id))
            .json(&body)
            .send()
            .await?;
        let product = check_status(response, Some(id))
            .await?
            .json::<ApiProduct>()
            .await?;
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> Result<(), CatalogError> {
        debug!(id, "DELETE product");
        let response = self.client.delete(self.product_url(id)).send().await?;
        check_status(response, Some(id)).await?;
        Ok(())
    }

    async fn toggle_status(&self, id: i64) -> Result<ApiProduct, CatalogError> {
        debug!(id, "PATCH product status");
        let response = self
            .client
            .patch(format!("{}/toggle-status", self.product_url(id)))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let product = check_status(response, Some(id))
            .await?
            .json::<ApiProduct>()
            .await?;
        Ok(product)
    }
}
