use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;

use super::headers::{COUNT_HEADER, FIRST_HEADER, LAST_HEADER, NEXT_HEADER, PREVIOUS_HEADER};
use super::request::{PaginationError, SearchFilterRequest};
use super::url::UrlBuilder;
use super::view::Paginated;

/// Whatever a listing handler produced, before it is turned into a page.
pub enum ListingResult<T> {
    /// Already paginated by its source.
    Page(Paginated<T>),
    Items(Vec<T>),
    /// Lazily produced items, materialized on first use.
    Iter(Box<dyn Iterator<Item = T> + Send>),
    /// Not a list; never decorated.
    Single(T),
}

impl<T> ListingResult<T> {
    pub fn stream<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        ListingResult::Iter(Box::new(items.into_iter()))
    }

    pub fn view(&self) -> Option<&Paginated<T>> {
        match self {
            ListingResult::Page(view) => Some(view),
            _ => None,
        }
    }

    /// Turns list-shaped results into a view in place.
    ///
    /// Raw collections are cut with the request's page size at the request's
    /// page, and the request is told about the view it produced. Results that
    /// are already paginated leave the request untouched. When the requested
    /// page lies past the end of a raw collection the items are kept as they
    /// were and the request is not informed.
    pub fn normalize(
        &mut self,
        filter: &mut SearchFilterRequest,
    ) -> Result<Option<&Paginated<T>>, PaginationError> {
        let items = match std::mem::replace(self, ListingResult::Items(Vec::new())) {
            ListingResult::Items(items) => items,
            ListingResult::Iter(iter) => iter.collect(),
            other => {
                *self = other;
                return Ok(self.view());
            }
        };

        let page = filter.page_index().saturating_add(1);
        let view = match Paginated::from_parts(Vec::new(), items.len() as u64, page, filter.page_size()) {
            Ok(view) => view.cut_from(items),
            Err(e) => {
                *self = ListingResult::Items(items);
                return Err(e);
            }
        };
        filter.update_paginator(&view);
        *self = ListingResult::Page(view);
        Ok(self.view())
    }
}

impl<T> From<Vec<T>> for ListingResult<T> {
    fn from(items: Vec<T>) -> Self {
        ListingResult::Items(items)
    }
}

impl<T> From<Paginated<T>> for ListingResult<T> {
    fn from(view: Paginated<T>) -> Self {
        ListingResult::Page(view)
    }
}

/// Attaches `x-pagination-*` headers to listing responses.
#[derive(Debug, Clone)]
pub struct ResponseDecorator<U> {
    urls: U,
}

impl<U: UrlBuilder> ResponseDecorator<U> {
    pub fn new(urls: U) -> Self {
        Self { urls }
    }

    pub fn decorate<T>(
        &self,
        resource: &str,
        result: &mut ListingResult<T>,
        filter: &mut SearchFilterRequest,
        mut response: Response,
    ) -> Response {
        let view = match result.normalize(filter) {
            Ok(Some(view)) => view,
            Ok(None) => {
                tracing::debug!(resource, "result is not a list, leaving response untouched");
                return response;
            }
            Err(e) => {
                tracing::warn!(resource, error = %e, "requested page does not exist, leaving response untouched");
                return response;
            }
        };

        let headers = self.pagination_headers(resource, view, filter);
        tracing::debug!(
            resource,
            nb_results = view.nb_results(),
            nb_pages = view.nb_pages(),
            headers = headers.len(),
            "decorated listing response"
        );
        for (name, value) in headers {
            if let Some(name) = name {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }

    /// Header values for `view`.
    ///
    /// The view counts pages from one and URLs count them from zero, so every
    /// page number read from the view is shifted down by one. `first` is
    /// always page 0; the view's current page is not consulted. Each URL
    /// points at a sibling of `filter` that keeps its page size.
    pub fn pagination_headers<T>(
        &self,
        resource: &str,
        view: &Paginated<T>,
        filter: &SearchFilterRequest,
    ) -> HeaderMap {
        let url = |page: u64| {
            let sibling = filter.with_page(page);
            self.urls.listing_url(resource, sibling.page_index(), sibling.page_size())
        };

        let mut headers = HeaderMap::new();
        insert_url(&mut headers, FIRST_HEADER, url(0));
        insert_url(&mut headers, LAST_HEADER, url(view.nb_pages().saturating_sub(1)));
        headers.insert(COUNT_HEADER, HeaderValue::from(view.nb_results()));

        if let Some(previous) = view.previous_page() {
            insert_url(&mut headers, PREVIOUS_HEADER, url(previous.saturating_sub(1)));
        }
        if let Some(next) = view.next_page() {
            insert_url(&mut headers, NEXT_HEADER, url(next.saturating_sub(1)));
        }
        headers
    }
}

fn insert_url(headers: &mut HeaderMap, name: HeaderName, url: String) {
    match HeaderValue::try_from(url) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(e) => tracing::warn!(header = %name, error = %e, "pagination url is not a valid header value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    fn decorator() -> ResponseDecorator<impl UrlBuilder> {
        ResponseDecorator::new(|resource: &str, page: u64, size: u64| {
            format!("/{resource}?page={page}&limit={size}")
        })
    }

    fn header<'a>(response: &'a Response, name: &HeaderName) -> Option<&'a str> {
        response.headers().get(name).and_then(|value| value.to_str().ok())
    }

    fn empty_response() -> Response {
        Response::new(Body::empty())
    }

    #[test]
    fn raw_collection_on_first_page() {
        let mut result = ListingResult::from((0..25).collect::<Vec<u32>>());
        let mut filter = SearchFilterRequest::new(0, 10);

        let response = decorator().decorate("files", &mut result, &mut filter, empty_response());

        assert_eq!(header(&response, &COUNT_HEADER), Some("25"));
        assert_eq!(header(&response, &FIRST_HEADER), Some("/files?page=0&limit=10"));
        assert_eq!(header(&response, &LAST_HEADER), Some("/files?page=2&limit=10"));
        assert_eq!(header(&response, &NEXT_HEADER), Some("/files?page=1&limit=10"));
        assert_eq!(header(&response, &PREVIOUS_HEADER), None);
    }

    #[test]
    fn raw_collection_informs_the_request() {
        let mut result = ListingResult::from((0..25).collect::<Vec<u32>>());
        let mut filter = SearchFilterRequest::new(1, 10);

        decorator().decorate("files", &mut result, &mut filter, empty_response());

        let state = filter.paginator().unwrap();
        assert_eq!((state.nb_results, state.nb_pages, state.current_page), (25, 3, 2));
        let view = result.view().unwrap();
        assert_eq!(view.items().first(), Some(&10));
    }

    #[test]
    fn middle_page_links_both_ways() {
        let mut result = ListingResult::from((0..25).collect::<Vec<u32>>());
        let mut filter = SearchFilterRequest::new(1, 10);

        let response = decorator().decorate("files", &mut result, &mut filter, empty_response());

        assert_eq!(header(&response, &PREVIOUS_HEADER), Some("/files?page=0&limit=10"));
        assert_eq!(header(&response, &NEXT_HEADER), Some("/files?page=2&limit=10"));
    }

    #[test]
    fn streamed_results_are_materialized() {
        let mut result = ListingResult::stream((0..7u32).map(|n| n * 2));
        let mut filter = SearchFilterRequest::new(0, 5);

        let response = decorator().decorate("numbers", &mut result, &mut filter, empty_response());

        assert_eq!(header(&response, &COUNT_HEADER), Some("7"));
        assert_eq!(header(&response, &LAST_HEADER), Some("/numbers?page=1&limit=5"));
        assert_eq!(result.view().unwrap().items(), &[0, 2, 4, 6, 8]);
        assert!(filter.paginator().is_some());
    }

    #[test]
    fn paginated_view_on_last_page_has_no_next() {
        let mut result = ListingResult::from(Paginated::from_parts(vec![1, 2, 3], 23, 3, 10).unwrap());
        let mut filter = SearchFilterRequest::new(2, 10);

        let response = decorator().decorate("files", &mut result, &mut filter, empty_response());

        assert_eq!(header(&response, &NEXT_HEADER), None);
        assert_eq!(header(&response, &PREVIOUS_HEADER), Some("/files?page=1&limit=10"));
        assert_eq!(header(&response, &FIRST_HEADER), Some("/files?page=0&limit=10"));
        assert_eq!(header(&response, &LAST_HEADER), Some("/files?page=2&limit=10"));
        assert_eq!(header(&response, &COUNT_HEADER), Some("23"));
        // already paginated, so the request is not informed
        assert_eq!(filter.paginator(), None);
    }

    #[test]
    fn paginated_view_on_first_page_has_no_previous() {
        let mut result = ListingResult::from(Paginated::from_parts(vec![1, 2], 12, 1, 2).unwrap());
        let mut filter = SearchFilterRequest::new(0, 2);

        let response = decorator().decorate("files", &mut result, &mut filter, empty_response());

        assert_eq!(header(&response, &PREVIOUS_HEADER), None);
        assert_eq!(header(&response, &NEXT_HEADER), Some("/files?page=1&limit=2"));
        assert_eq!(header(&response, &LAST_HEADER), Some("/files?page=5&limit=2"));
    }

    #[test]
    fn urls_use_the_requested_page_size() {
        // the source cut pages of 5, the request asked for 20
        let mut result = ListingResult::from(Paginated::from_parts(vec![0; 5], 30, 2, 5).unwrap());
        let mut filter = SearchFilterRequest::new(1, 20);

        let response = decorator().decorate("files", &mut result, &mut filter, empty_response());

        assert_eq!(header(&response, &LAST_HEADER), Some("/files?page=5&limit=20"));
        assert_eq!(header(&response, &NEXT_HEADER), Some("/files?page=2&limit=20"));
    }

    #[test]
    fn empty_collection_points_last_at_page_zero() {
        let mut result: ListingResult<u32> = ListingResult::from(Vec::new());
        let mut filter = SearchFilterRequest::new(0, 10);

        let response = decorator().decorate("files", &mut result, &mut filter, empty_response());

        assert_eq!(header(&response, &COUNT_HEADER), Some("0"));
        assert_eq!(header(&response, &FIRST_HEADER), Some("/files?page=0&limit=10"));
        assert_eq!(header(&response, &LAST_HEADER), Some("/files?page=0&limit=10"));
        assert_eq!(header(&response, &PREVIOUS_HEADER), None);
        assert_eq!(header(&response, &NEXT_HEADER), None);
    }

    #[tokio::test]
    async fn single_resources_are_left_alone() {
        let mut result = ListingResult::Single("one");
        let mut filter = SearchFilterRequest::new(0, 10);
        let mut original = Response::new(Body::from("payload"));
        *original.status_mut() = StatusCode::CREATED;
        original
            .headers_mut()
            .insert("x-custom", HeaderValue::from_static("kept"));

        let response = decorator().decorate("files", &mut result, &mut filter, original);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().len(), 1);
        assert_eq!(header(&response, &HeaderName::from_static("x-custom")), Some("kept"));
        assert_eq!(filter.paginator(), None);
        assert!(matches!(result, ListingResult::Single("one")));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"payload");
    }

    #[test]
    fn page_past_the_end_leaves_everything_untouched() {
        let mut result = ListingResult::from((0..25).collect::<Vec<u32>>());
        let mut filter = SearchFilterRequest::new(9, 10);

        let response = decorator().decorate("files", &mut result, &mut filter, empty_response());

        assert!(response.headers().is_empty());
        assert_eq!(filter.paginator(), None);
        assert!(matches!(&result, ListingResult::Items(items) if items.len() == 25));
    }

    #[test]
    fn normalize_reports_pages_past_the_end_of_a_stream() {
        let mut result = ListingResult::stream(0..7u32);
        let mut filter = SearchFilterRequest::new(2, 5);

        let err = result.normalize(&mut filter).unwrap_err();

        assert_eq!(err, PaginationError::PageOutOfRange { page: 2, last: 1 });
        assert!(matches!(&result, ListingResult::Items(items) if items.len() == 7));
    }

    #[test]
    fn decorating_twice_gives_the_same_headers() {
        let mut result = ListingResult::from((0..25).collect::<Vec<u32>>());
        let mut filter = SearchFilterRequest::new(0, 10);
        let decorator = decorator();

        let once = decorator.decorate("files", &mut result, &mut filter, empty_response());
        let once_headers = once.headers().clone();
        let twice = decorator.decorate("files", &mut result, &mut filter, once);

        assert_eq!(twice.headers(), &once_headers);
        assert_eq!(twice.headers().get_all(&COUNT_HEADER).iter().count(), 1);
    }
}
