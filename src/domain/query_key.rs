//! Query canonicalization.
//!
//! A [`CanonicalQuery`] is the ordered list of parameters that goes on the
//! wire for one list request. The cache key is derived from that same list,
//! so two queries share a key exactly when they would send the same request.

use crate::domain::error::CatalogError;
use crate::domain::model::{
    Category, CategoryFilter, CategoryFormat, FilterState, PageRequest, Pagination, StatusFilter,
};
use std::fmt;

/// Filters after trimming and dropping the `All` sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalFilters {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub active: Option<bool>,
}

impl CanonicalFilters {
    pub fn from_filters(filters: &FilterState) -> Self {
        let name = filters
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let category = match filters.category {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(c),
        };

        let active = match filters.status {
            StatusFilter::All => None,
            StatusFilter::Only(s) => Some(s.is_active()),
        };

        Self {
            name,
            category,
            active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalQuery {
    params: Vec<(&'static str, String)>,
}

impl CanonicalQuery {
    pub fn build(
        filters: &FilterState,
        pagination: &Pagination,
        request: &PageRequest,
        page_size: u32,
        category_format: CategoryFormat,
    ) -> Result<Self, CatalogError> {
        let canonical = CanonicalFilters::from_filters(filters);
        let mut params = Vec::with_capacity(7);

        if let Some(name) = canonical.name {
            params.push(("name", name));
        }
        if let Some(category) = canonical.category {
            params.push(("category", category_format.render(category).to_string()));
        }
        if let Some(active) = canonical.active {
            params.push(("active", active.to_string()));
        }

        match (pagination, request) {
            (Pagination::Offset, PageRequest::Offset { page_index }) => {
                params.push(("page", page_index.to_string()));
                params.push(("size", page_size.to_string()));
            }
            (Pagination::Cursor { sort_by, sort_dir }, PageRequest::Cursor { cursor }) => {
                if let Some(cursor) = cursor {
                    params.push(("cursor", cursor.clone()));
                }
                params.push(("limit", page_size.to_string()));
                params.push(("sortBy", sort_by.clone()));
                params.push(("sortDir", sort_dir.as_str().to_string()));
            }
            (pagination, request) => {
                return Err(CatalogError::PaginationMismatch(format!(
                    "{:?} request on a controller configured for {} paging",
                    request,
                    pagination.name()
                )));
            }
        }

        Ok(Self { params })
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn key(&self) -> QueryKey {
        let joined = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, escape(v)))
            .collect::<Vec<_>>()
            .join("&");
        QueryKey(format!("products?{}", joined))
    }
}

// 保证 key 单射：值里的分隔符需要转义
fn escape(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('&', "%26")
        .replace('=', "%3D")
}
