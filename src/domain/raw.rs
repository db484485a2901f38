// Catalog API wire shapes
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub active: bool,
}

/// List body, depending on backend version.
///
/// A body with a `content` key is a cursor page and must decode as one, so a
/// malformed record reports its own error. Anything else is the embedded shape.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ApiListResponse {
    Cursor(ApiCursorResponse),
    Paged(ApiPagedResponse),
}

impl<'de> Deserialize<'de> for ApiListResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(de::Error::custom("list body is not a JSON object"));
        }
        if value.get("content").is_some() {
            ApiCursorResponse::deserialize(value)
                .map(ApiListResponse::Cursor)
                .map_err(de::Error::custom)
        } else {
            ApiPagedResponse::deserialize(value)
                .map(ApiListResponse::Paged)
                .map_err(de::Error::custom)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiCursorResponse {
    pub content: Vec<ApiProduct>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub previous_cursor: Option<String>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_previous: bool,
    #[serde(default)]
    pub size: Option<u32>,
}

// Spring HATEOAS 分页格式，空结果时没有 _embedded
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiPagedResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<ApiEmbedded>,
    #[serde(default)]
    pub page: Option<ApiPageInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiEmbedded {
    #[serde(rename = "productResponseDTOList", default)]
    pub products: Vec<ApiProduct>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiPageInfo {
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_shape_detected() {
        let body = r#"{"content":[],"nextCursor":"abc","hasNext":true,"hasPrevious":false,"size":10}"#;
        let parsed: ApiListResponse = serde_json::from_str(body).unwrap();
        match parsed {
            ApiListResponse::Cursor(c) => {
                assert_eq!(c.next_cursor.as_deref(), Some("abc"));
                assert!(c.has_next);
            }
            other => panic!("Expected cursor shape, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_embedded_shape_tolerated() {
        let body = r#"{"page":{"size":10,"totalElements":0,"totalPages":0,"number":0}}"#;
        let parsed: ApiListResponse = serde_json::from_str(body).unwrap();
        match parsed {
            ApiListResponse::Paged(p) => {
                assert!(p.embedded.is_none());
                assert_eq!(p.page.unwrap().total_elements, 0);
            }
            other => panic!("Expected paged shape, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_cursor_record_keeps_decode_error() {
        let body = r#"{"content":[{"id":1,"name":"Lamp","price":"cheap","category":"BOOKS","active":true}],"hasNext":false}"#;
        let err = serde_json::from_str::<ApiListResponse>(body).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid type"), "{}", message);
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(serde_json::from_str::<ApiListResponse>("[]").is_err());
    }
}
