//! Browsing state for one list view: filters, page size and the current
//! position, including the cursor history needed to step backwards.

use crate::application::query::CatalogQueryController;
use crate::domain::model::{FilterState, PageMeta, PageRequest, Pagination, ResultPage};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Position {
    Offset {
        page_index: u32,
    },
    // history[0] 始终是第一页（None）
    Cursor {
        history: Vec<Option<String>>,
        index: usize,
    },
}

impl Position {
    fn first(pagination: &Pagination) -> Self {
        match pagination {
            Pagination::Offset => Position::Offset { page_index: 0 },
            Pagination::Cursor { .. } => Position::Cursor {
                history: vec![None],
                index: 0,
            },
        }
    }
}

pub struct CatalogSession {
    controller: Arc<CatalogQueryController>,
    filters: FilterState,
    page_size: u32,
    position: Position,
    current: Option<ResultPage>,
}

impl CatalogSession {
    pub fn new(controller: Arc<CatalogQueryController>, page_size: u32) -> Self {
        let position = Position::first(controller.pagination());
        Self {
            controller,
            filters: FilterState::default(),
            page_size,
            position,
            current: None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Replace the filters and go back to the first page
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.position = Position::first(self.controller.pagination());
        self.current = None;
    }

    pub fn current(&self) -> Option<&ResultPage> {
        self.current.as_ref()
    }

    /// 1-based page number for display
    pub fn page_number(&self) -> usize {
        match &self.position {
            Position::Offset { page_index } => (*page_index as usize).saturating_add(1),
            Position::Cursor { index, .. } => index + 1,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        match &self.position {
            Position::Offset { page_index } => PageRequest::page(*page_index),
            Position::Cursor { history, index } => {
                PageRequest::cursor(history.get(*index).cloned().flatten())
            }
        }
    }

    pub async fn load(&mut self) -> &ResultPage {
        let page = self
            .controller
            .query(&self.filters, &self.page_request(), self.page_size, true)
            .await;
        self.current.insert(page)
    }

    pub async fn refresh(&mut self) -> &ResultPage {
        let page = self
            .controller
            .refresh(&self.filters, &self.page_request(), self.page_size)
            .await;
        self.current.insert(page)
    }

    pub fn has_next(&self) -> bool {
        match self.current.as_ref().map(|p| &p.meta) {
            Some(PageMeta::Offset(meta)) => meta.page_index.saturating_add(1) < meta.total_pages,
            Some(PageMeta::Cursor(meta)) => meta.has_next && meta.next_cursor.is_some(),
            None => false,
        }
    }

    /// Backward moves only ever use locally recorded positions.
    pub fn has_previous(&self) -> bool {
        match &self.position {
            Position::Offset { page_index } => *page_index > 0,
            Position::Cursor { index, .. } => *index > 0,
        }
    }

    /// Move forward one page; `None` when there is no next page.
    pub async fn next_page(&mut self) -> Option<&ResultPage> {
        if !self.has_next() {
            return None;
        }

        let next_cursor = match self.current.as_ref().map(|p| &p.meta) {
            Some(PageMeta::Cursor(meta)) => meta.next_cursor.clone(),
            _ => None,
        };

        match &mut self.position {
            Position::Offset { page_index } => *page_index += 1,
            Position::Cursor { history, index } => {
                // 从历史中间前进时丢弃旧的分支
                history.truncate(*index + 1);
                history.push(next_cursor);
                *index += 1;
                debug!(depth = history.len(), "Cursor history advanced");
            }
        }

        Some(self.load().await)
    }

    /// Move back one page; `None` on the first page.
    pub async fn previous_page(&mut self) -> Option<&ResultPage> {
        if !self.has_previous() {
            return None;
        }

        match &mut self.position {
            Position::Offset { page_index } => *page_index -= 1,
            Position::Cursor { index, .. } => *index -= 1,
        }

        Some(self.load().await)
    }
}
