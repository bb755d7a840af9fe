use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::IntoParams;

use super::view::Paginated;

/// Raw `?page=&limit=` query of a listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Zero-based page index.
    #[param(default = 0, minimum = 0)]
    pub page: Option<u64>,
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 10,
            max_size: 100,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("limit must be at least 1")]
    ZeroLimit,
    #[error("limit must not exceed {max} (got {limit})")]
    LimitTooLarge { limit: u64, max: u64 },
    /// Both pages are zero-based, like the `page` query parameter.
    #[error("page {page} is out of range (last page is {last})")]
    PageOutOfRange { page: u64, last: u64 },
}

/// Pagination state as last observed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub nb_results: u64,
    pub nb_pages: u64,
    pub current_page: u64,
}

/// Page index and page size of one inbound listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilterRequest {
    page_index: u64,
    page_size: u64,
    paginator: Option<PageState>,
}

impl SearchFilterRequest {
    pub fn new(page_index: u64, page_size: u64) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
            paginator: None,
        }
    }

    pub fn from_query(query: &Pagination, limits: PageLimits) -> Result<Self, PaginationError> {
        let limit = query.limit.unwrap_or(limits.default_size);
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        if limit > limits.max_size {
            return Err(PaginationError::LimitTooLarge {
                limit,
                max: limits.max_size,
            });
        }
        Ok(Self::new(query.page.unwrap_or(0), limit))
    }

    pub fn page_index(&self) -> u64 {
        self.page_index
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Same page size, different page. The sibling has not observed any paginator.
    pub fn with_page(&self, page_index: u64) -> Self {
        Self::new(page_index, self.page_size)
    }

    /// Records the state of a view built for this request.
    pub fn update_paginator<T>(&mut self, view: &Paginated<T>) {
        self.paginator = Some(PageState {
            nb_results: view.nb_results(),
            nb_pages: view.nb_pages(),
            current_page: view.current_page(),
        });
    }

    pub fn paginator(&self) -> Option<PageState> {
        self.paginator
    }
}
