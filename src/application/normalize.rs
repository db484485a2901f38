//! Raw API records and list bodies → stable domain shapes.

use crate::domain::error::CatalogError;
use crate::domain::model::{
    Category, CursorMeta, OffsetMeta, PageMeta, PageRequest, Product, ProductStatus, ResultPage,
};
use crate::domain::raw::{ApiListResponse, ApiProduct};

/// Reconcile the category spellings seen across API versions
/// (`"Electronics"` and `"ELECTRONICS"`) into one enum value.
pub fn normalize_category(raw: &str) -> Result<Category, CatalogError> {
    raw.parse()
}

pub fn map_product(raw: ApiProduct) -> Result<Product, CatalogError> {
    Ok(Product {
        id: Some(raw.id),
        category: normalize_category(&raw.category)?,
        status: ProductStatus::from_active(raw.active),
        name: raw.name,
        price: raw.price,
    })
}

fn map_products(raw: Vec<ApiProduct>) -> Result<Vec<Product>, CatalogError> {
    raw.into_iter().map(map_product).collect()
}

/// Bridge either list shape into a [`ResultPage`].
///
/// The meta variant follows the request, never the body: an embedded body
/// answering a cursor request (or the reverse) is an error.
pub fn normalize_page(
    raw: ApiListResponse,
    request: &PageRequest,
    page_size: u32,
) -> Result<ResultPage, CatalogError> {
    match (raw, request) {
        (ApiListResponse::Paged(paged), PageRequest::Offset { page_index }) => {
            let items = map_products(paged.embedded.map(|e| e.products).unwrap_or_default())?;
            let info = paged.page.unwrap_or_default();
            Ok(ResultPage {
                items,
                meta: PageMeta::Offset(OffsetMeta {
                    total_items: info.total_elements,
                    total_pages: info.total_pages,
                    page_index: info.number.unwrap_or(*page_index),
                    page_size: info.size.unwrap_or(page_size),
                }),
            })
        }
        (ApiListResponse::Cursor(cursor), PageRequest::Cursor { .. }) => {
            let items = map_products(cursor.content)?;
            Ok(ResultPage {
                items,
                meta: PageMeta::Cursor(CursorMeta {
                    next_cursor: cursor.next_cursor,
                    previous_cursor: cursor.previous_cursor,
                    has_next: cursor.has_next,
                    has_previous: cursor.has_previous,
                    page_size: cursor.size.unwrap_or(page_size),
                }),
            })
        }
        (ApiListResponse::Paged(_), PageRequest::Cursor { .. }) => Err(
            CatalogError::UnexpectedShape("embedded page body for a cursor request".to_string()),
        ),
        (ApiListResponse::Cursor(_), PageRequest::Offset { .. }) => Err(
            CatalogError::UnexpectedShape("cursor body for an offset request".to_string()),
        ),
    }
}

/// Well-formed page returned when a read fails.
pub fn empty_page(request: &PageRequest, page_size: u32) -> ResultPage {
    let meta = match request {
        PageRequest::Offset { page_index } => PageMeta::Offset(OffsetMeta {
            total_items: 0,
            total_pages: 0,
            page_index: *page_index,
            page_size,
        }),
        PageRequest::Cursor { .. } => PageMeta::Cursor(CursorMeta {
            next_cursor: None,
            previous_cursor: None,
            has_next: false,
            has_previous: false,
            page_size,
        }),
    };
    ResultPage {
        items: Vec::new(),
        meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::raw::{ApiCursorResponse, ApiEmbedded, ApiPageInfo, ApiPagedResponse};

    fn raw(id: i64, category: &str, active: bool) -> ApiProduct {
        ApiProduct {
            id,
            name: format!("Product {}", id),
            price: 9.99,
            category: category.to_string(),
            active,
        }
    }

    #[test]
    fn test_map_product() {
        let p = map_product(raw(7, "Electronics", false)).unwrap();
        assert_eq!(p.id, Some(7));
        assert_eq!(p.category, Category::Electronics);
        assert_eq!(p.status, ProductStatus::Inactive);
        assert_eq!(p.price, 9.99);
    }

    #[test]
    fn test_normalize_category_both_conventions() {
        for spelling in ["Clothing", "CLOTHING", "clothing"] {
            assert_eq!(normalize_category(spelling).unwrap(), Category::Clothing);
        }
        assert!(matches!(
            normalize_category("Garden"),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_offset_page_falls_back_to_request() {
        let body = ApiListResponse::Paged(ApiPagedResponse {
            embedded: Some(ApiEmbedded {
                products: vec![raw(1, "BOOKS", true)],
            }),
            page: Some(ApiPageInfo {
                total_elements: 1,
                total_pages: 1,
                number: None,
                size: None,
            }),
        });
        let page = normalize_page(body, &PageRequest::page(2), 25).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(
            page.meta,
            PageMeta::Offset(OffsetMeta {
                total_items: 1,
                total_pages: 1,
                page_index: 2,
                page_size: 25,
            })
        );
    }

    #[test]
    fn test_missing_embedded_is_empty_page() {
        let body = ApiListResponse::Paged(ApiPagedResponse::default());
        let page = normalize_page(body, &PageRequest::page(0), 10).unwrap();
        assert!(page.is_empty());
        assert_eq!(page, empty_page(&PageRequest::page(0), 10));
    }

    #[test]
    fn test_cursor_page() {
        let body = ApiListResponse::Cursor(ApiCursorResponse {
            content: vec![raw(1, "Books", true), raw(2, "Books", true)],
            next_cursor: Some("c2".to_string()),
            previous_cursor: None,
            has_next: true,
            has_previous: false,
            size: Some(2),
        });
        let page = normalize_page(body, &PageRequest::cursor(None), 2).unwrap();
        match page.meta {
            PageMeta::Cursor(meta) => {
                assert_eq!(meta.next_cursor.as_deref(), Some("c2"));
                assert!(meta.has_next);
                assert!(!meta.has_previous);
            }
            other => panic!("Expected cursor meta, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let body = ApiListResponse::Paged(ApiPagedResponse::default());
        assert!(matches!(
            normalize_page(body, &PageRequest::cursor(None), 10),
            Err(CatalogError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_unknown_category_fails_page() {
        let body = ApiListResponse::Cursor(ApiCursorResponse {
            content: vec![raw(1, "Books", true), raw(2, "Toys", true)],
            next_cursor: None,
            previous_cursor: None,
            has_next: false,
            has_previous: false,
            size: None,
        });
        assert!(normalize_page(body, &PageRequest::cursor(None), 10).is_err());
    }
}
