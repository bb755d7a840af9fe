use url::Url;

/// Renders the canonical listing URL of a resource at a given page.
pub trait UrlBuilder: Send + Sync {
    fn listing_url(&self, resource: &str, page: u64, page_size: u64) -> String;
}

impl<F> UrlBuilder for F
where
    F: Fn(&str, u64, u64) -> String + Send + Sync,
{
    fn listing_url(&self, resource: &str, page: u64, page_size: u64) -> String {
        self(resource, page, page_size)
    }
}

/// `<base>/<resource>?page=<page>&limit=<page_size>`
#[derive(Debug, Clone)]
pub struct BaseUrlBuilder {
    base: Url,
}

impl BaseUrlBuilder {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl UrlBuilder for BaseUrlBuilder {
    fn listing_url(&self, resource: &str, page: u64, page_size: u64) -> String {
        let mut url = self.base.clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments
                    .pop_if_empty()
                    .extend(resource.split('/').filter(|segment| !segment.is_empty()));
            }
            Err(()) => tracing::warn!(base = %self.base, resource, "base url cannot carry a path, resource dropped"),
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &page_size.to_string());
        url.to_string()
    }
}
