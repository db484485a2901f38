//! 集成测试共用的夹具
#![allow(dead_code)]

use catalog_admin::application::query::CatalogQueryController;
use catalog_admin::domain::model::{CategoryFormat, Pagination, SortDirection};
use catalog_admin::domain::traits::Clock;
use catalog_admin::infrastructure::network::client::HttpCatalogApi;
use catalog_admin::infrastructure::storage::cache::{QueryCache, DEFAULT_TTL};
use chrono::{DateTime, Utc};
use httpmock::MockServer;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Clock that only moves when told to
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self(Mutex::new(Utc::now())))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn cursor_pagination() -> Pagination {
    Pagination::Cursor {
        sort_by: "id".to_string(),
        sort_dir: SortDirection::Asc,
    }
}

pub fn controller_for(
    server: &MockServer,
    pagination: Pagination,
    clock: Arc<ManualClock>,
) -> CatalogQueryController {
    controller_with_format(server, pagination, clock, CategoryFormat::Upper)
}

pub fn controller_with_format(
    server: &MockServer,
    pagination: Pagination,
    clock: Arc<ManualClock>,
    category_format: CategoryFormat,
) -> CatalogQueryController {
    let api = HttpCatalogApi::new(reqwest::Client::new(), server.base_url(), category_format);
    CatalogQueryController::new(Arc::new(api), QueryCache::new(DEFAULT_TTL, clock), pagination)
        .with_category_format(category_format)
}

pub fn api_product(id: i64, name: &str, category: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": 99.99,
        "category": category,
        "active": active,
    })
}

pub fn paged_body(products: Vec<Value>, total_elements: u64, total_pages: u32, number: u32, size: u32) -> Value {
    json!({
        "_embedded": { "productResponseDTOList": products },
        "page": {
            "size": size,
            "totalElements": total_elements,
            "totalPages": total_pages,
            "number": number,
        }
    })
}

pub fn cursor_body(products: Vec<Value>, next_cursor: Option<&str>, has_previous: bool, size: u32) -> Value {
    json!({
        "content": products,
        "nextCursor": next_cursor,
        "previousCursor": null,
        "hasNext": next_cursor.is_some(),
        "hasPrevious": has_previous,
        "size": size,
    })
}
