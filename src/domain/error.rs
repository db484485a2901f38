use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Product {id} not found")]
    NotFound { id: i64 },

    #[error("Catalog API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid product: {0}")]
    Validation(String),

    #[error("Unknown product category: {0}")]
    UnknownCategory(String),

    #[error("Unexpected list response shape: {0}")]
    UnexpectedShape(String),

    #[error("Pagination mismatch: {0}")]
    PaginationMismatch(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
