use serde::Serialize;
use utoipa::ToSchema;

use super::request::PaginationError;

/// A page of results plus the state needed to navigate around it.
///
/// Page numbers are one-based. There is always at least one page, even for
/// an empty result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    items: Vec<T>,
    nb_results: u64,
    max_per_page: u64,
    current_page: u64,
}

impl<T> Paginated<T> {
    /// Wraps a page that was already cut by its source (e.g. a LIMIT/OFFSET query).
    ///
    /// Fails when `current_page` lies outside `1..=nb_pages`.
    pub fn from_parts(
        items: Vec<T>,
        nb_results: u64,
        current_page: u64,
        max_per_page: u64,
    ) -> Result<Self, PaginationError> {
        let view = Self {
            items,
            nb_results,
            max_per_page: max_per_page.max(1),
            current_page,
        };
        if current_page == 0 || current_page > view.nb_pages() {
            return Err(PaginationError::PageOutOfRange {
                page: current_page.saturating_sub(1),
                last: view.nb_pages() - 1,
            });
        }
        Ok(view)
    }

    /// Cuts `current_page` out of a fully materialized collection.
    pub fn from_vec(all: Vec<T>, max_per_page: u64, current_page: u64) -> Result<Self, PaginationError> {
        let view = Self::from_parts(Vec::new(), all.len() as u64, current_page, max_per_page)?;
        Ok(view.cut_from(all))
    }

    /// Replaces the items with this view's page of `all`.
    pub(crate) fn cut_from(mut self, all: Vec<T>) -> Self {
        let offset = (self.current_page - 1).saturating_mul(self.max_per_page);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.max_per_page).unwrap_or(usize::MAX);
        self.items = all.into_iter().skip(offset).take(take).collect();
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn nb_results(&self) -> u64 {
        self.nb_results
    }

    pub fn max_per_page(&self) -> u64 {
        self.max_per_page
    }

    pub fn nb_pages(&self) -> u64 {
        self.nb_results.div_ceil(self.max_per_page).max(1)
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn previous_page(&self) -> Option<u64> {
        self.has_previous_page().then(|| self.current_page - 1)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.nb_pages()
    }

    pub fn next_page(&self) -> Option<u64> {
        self.has_next_page().then(|| self.current_page + 1)
    }
}

/// JSON body of a listing endpoint. `page` is zero-based like the `page` query parameter.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T: Clone> From<&Paginated<T>> for PaginatedResponse<T> {
    fn from(view: &Paginated<T>) -> Self {
        Self {
            data: view.items().to_vec(),
            total_items: view.nb_results(),
            total_pages: view.nb_pages(),
            page: view.current_page() - 1,
            page_size: view.max_per_page(),
        }
    }
}
