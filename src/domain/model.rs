use crate::domain::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// 商品记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Option<i64>, // 服务端分配前为空
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub status: ProductStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Electronics, Category::Clothing, Category::Books];

    pub fn as_upper(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Clothing => "CLOTHING",
            Category::Books => "BOOKS",
        }
    }

    pub fn as_title(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

/// Accepts every spelling the catalog API has been seen to use
/// (`Electronics`, `ELECTRONICS`, `electronics`), surrounding whitespace included.
impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_upper().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn from_active(active: bool) -> Self {
        if active {
            ProductStatus::Active
        } else {
            ProductStatus::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ProductStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "ACTIVE",
            ProductStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(ProductStatus::Active),
            "INACTIVE" => Ok(ProductStatus::Inactive),
            _ => Err(CatalogError::Config(format!("Unknown product status: {}", s))),
        }
    }
}

/// Wire spelling used for categories sent to the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFormat {
    #[default]
    Upper,
    Title,
}

impl CategoryFormat {
    pub fn render(&self, category: Category) -> &'static str {
        match self {
            CategoryFormat::Upper => category.as_upper(),
            CategoryFormat::Title => category.as_title(),
        }
    }
}

// 筛选条件，`All` 表示不限制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProductStatus),
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub name: Option<String>,
    pub category: CategoryFilter,
    pub status: StatusFilter,
}

impl FilterState {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Pagination style, fixed when the controller is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pagination {
    Offset,
    Cursor {
        sort_by: String,
        sort_dir: SortDirection,
    },
}

impl Pagination {
    pub fn name(&self) -> &'static str {
        match self {
            Pagination::Offset => "offset",
            Pagination::Cursor { .. } => "cursor",
        }
    }
}

/// Position of the requested page: zero-based index or opaque cursor (`None` = first page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    Offset { page_index: u32 },
    Cursor { cursor: Option<String> },
}

impl PageRequest {
    pub fn page(page_index: u32) -> Self {
        PageRequest::Offset { page_index }
    }

    pub fn cursor(cursor: Option<String>) -> Self {
        PageRequest::Cursor { cursor }
    }
}

// 归一化后的查询结果页
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    pub items: Vec<Product>,
    pub meta: PageMeta,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum PageMeta {
    Offset(OffsetMeta),
    Cursor(CursorMeta),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OffsetMeta {
    pub total_items: u64,
    pub total_pages: u32,
    pub page_index: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CursorMeta {
    pub next_cursor: Option<String>,
    pub previous_cursor: Option<String>,
    pub has_next: bool,
    pub has_previous: bool,
    pub page_size: u32,
}

// 表单规则，与后台管理页面一致
pub const NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=100;
pub const PRICE_RANGE: std::ops::RangeInclusive<f64> = 0.01..=999_999.99;

/// Name is measured after trimming. NaN and infinities fall outside the range.
fn validate_fields(name: &str, price: f64) -> Result<(), CatalogError> {
    let len = name.trim().chars().count();
    if !NAME_LENGTH.contains(&len) {
        return Err(CatalogError::Validation(format!(
            "name must be {} to {} characters, got {}",
            NAME_LENGTH.start(),
            NAME_LENGTH.end(),
            len
        )));
    }
    if !PRICE_RANGE.contains(&price) {
        return Err(CatalogError::Validation(format!(
            "price must be between {} and {}, got {}",
            PRICE_RANGE.start(),
            PRICE_RANGE.end(),
            price
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    pub category: Category,
    pub status: ProductStatus,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_fields(&self.name, self.price)
    }
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_fields(&self.name, self.price)
    }
}

impl From<Product> for UpdateProductRequest {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            price: product.price,
            category: product.category,
            status: product.status,
        }
    }
}

/// Cache introspection, diagnostics only.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub count: usize,
    pub keys: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed {
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_any_case() {
        assert_eq!("Electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!("ELECTRONICS".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!(" books ".parse::<Category>().unwrap(), Category::Books);
        assert!("Toys".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_parse_all_sentinel() {
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "clothing".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Clothing)
        );
        assert_eq!(
            "inactive".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(ProductStatus::Inactive)
        );
    }

    fn create(name: &str, price: f64) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price,
            category: Category::Books,
        }
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(create("ab", 1.0).validate().is_ok());
        assert!(create(&"x".repeat(100), 1.0).validate().is_ok());
        assert!(create("a", 1.0).validate().is_err());
        assert!(create("  a  ", 1.0).validate().is_err());
        assert!(create("", 1.0).validate().is_err());
        assert!(create(&"x".repeat(101), 1.0).validate().is_err());
        // 按字符计数，不是字节
        assert!(create("书本", 1.0).validate().is_ok());
    }

    #[test]
    fn test_price_bounds() {
        assert!(create("Book", 0.01).validate().is_ok());
        assert!(create("Book", 999_999.99).validate().is_ok());
        assert!(create("Book", 0.0).validate().is_err());
        assert!(create("Book", -5.0).validate().is_err());
        assert!(create("Book", 1_000_000.0).validate().is_err());
        assert!(create("Book", 1e12).validate().is_err());
        assert!(create("Book", f64::NAN).validate().is_err());
        assert!(create("Book", f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_update_request_validated() {
        let request = UpdateProductRequest {
            name: "Shirt".to_string(),
            price: 0.0,
            category: Category::Clothing,
            status: ProductStatus::Active,
        };
        assert!(matches!(request.validate(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_category_format_render() {
        assert_eq!(CategoryFormat::Upper.render(Category::Books), "BOOKS");
        assert_eq!(CategoryFormat::Title.render(Category::Books), "Books");
    }
}
