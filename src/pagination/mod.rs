//! Pagination state, listing URLs and the response headers derived from them.

pub mod decorator;
pub mod headers;
pub mod request;
pub mod url;
pub mod view;

pub use decorator::{ListingResult, ResponseDecorator};
pub use headers::{HeaderComponent, PAGINATION_HEADERS};
pub use request::{PageLimits, PageState, Pagination, PaginationError, SearchFilterRequest};
pub use url::{BaseUrlBuilder, UrlBuilder};
pub use view::{Paginated, PaginatedResponse};
