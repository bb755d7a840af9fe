use axum::http::HeaderName;

pub const COUNT_HEADER: HeaderName = HeaderName::from_static("x-pagination-count");
pub const PREVIOUS_HEADER: HeaderName = HeaderName::from_static("x-pagination-previous");
pub const NEXT_HEADER: HeaderName = HeaderName::from_static("x-pagination-next");
pub const FIRST_HEADER: HeaderName = HeaderName::from_static("x-pagination-first");
pub const LAST_HEADER: HeaderName = HeaderName::from_static("x-pagination-last");

/// Reusable OpenAPI header definition a pagination header points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderComponent {
    Count,
    Url,
}

impl HeaderComponent {
    pub const ALL: [HeaderComponent; 2] = [HeaderComponent::Count, HeaderComponent::Url];

    /// Key under `components.headers`.
    pub fn name(self) -> &'static str {
        match self {
            HeaderComponent::Count => "Count",
            HeaderComponent::Url => "Url",
        }
    }

    pub fn reference(self) -> String {
        format!("#/components/headers/{}", self.name())
    }

    pub fn description(self) -> &'static str {
        match self {
            HeaderComponent::Count => "Number of results",
            HeaderComponent::Url => "pagination url",
        }
    }
}

/// Every header emitted on a listing response, with the definition that documents it.
pub const PAGINATION_HEADERS: [(HeaderName, HeaderComponent); 5] = [
    (COUNT_HEADER, HeaderComponent::Count),
    (PREVIOUS_HEADER, HeaderComponent::Url),
    (NEXT_HEADER, HeaderComponent::Url),
    (FIRST_HEADER, HeaderComponent::Url),
    (LAST_HEADER, HeaderComponent::Url),
];
