use axum::response::Response;

use crate::openapi::{patch_document, ApiDocument};
use crate::pagination::{ListingResult, ResponseDecorator, SearchFilterRequest, UrlBuilder};

/// A listing response on its way out, together with what produced it.
pub struct ResponseEvent<'a, T> {
    pub resource: &'a str,
    pub result: &'a mut ListingResult<T>,
    pub filter: &'a mut SearchFilterRequest,
    pub response: Response,
}

/// Extension points the host calls while building the API description and responses.
pub trait LifecycleHooks: Send + Sync {
    fn on_api_description_built(&self, doc: ApiDocument) -> ApiDocument {
        doc
    }

    fn on_response_built<T>(&self, event: ResponseEvent<'_, T>) -> Response {
        event.response
    }
}

pub struct PaginationPlugin<U> {
    decorator: ResponseDecorator<U>,
}

impl<U: UrlBuilder> PaginationPlugin<U> {
    pub fn new(urls: U) -> Self {
        Self {
            decorator: ResponseDecorator::new(urls),
        }
    }
}

impl<U: UrlBuilder> LifecycleHooks for PaginationPlugin<U> {
    fn on_api_description_built(&self, doc: ApiDocument) -> ApiDocument {
        patch_document(doc)
    }

    fn on_response_built<T>(&self, event: ResponseEvent<'_, T>) -> Response {
        let ResponseEvent {
            resource,
            result,
            filter,
            response,
        } = event;
        self.decorator.decorate(resource, result, filter, response)
    }
}
