use serde_json::json;

use super::document::{ApiDocument, Components, Header, Operation, RefOr, Reference, Response};
use crate::pagination::headers::{HeaderComponent, PAGINATION_HEADERS};

/// Paths containing this placeholder fetch a single resource and are not paginated.
/// Any other path parameter name still counts as a listing.
const SINGLE_RESOURCE_PLACEHOLDER: &str = "{id}";

/// Documents the pagination headers on every listing GET operation.
///
/// Returns `doc` unchanged when no operation qualifies.
pub fn patch_document(doc: ApiDocument) -> ApiDocument {
    let ApiDocument {
        paths,
        components,
        extra,
    } = doc;

    let mut patched = false;
    let paths = paths
        .into_iter()
        .map(|(url, mut item)| {
            if url.contains(SINGLE_RESOURCE_PLACEHOLDER) {
                return (url, item);
            }
            if let Some(get) = item.get.take() {
                let (get, changed) = patch_operation(get);
                if changed {
                    tracing::debug!(path = %url, "documented pagination headers");
                    patched = true;
                }
                item = item.with_get(get);
            }
            (url, item)
        })
        .collect();

    if !patched {
        return ApiDocument {
            paths,
            components,
            extra,
        };
    }

    ApiDocument {
        paths,
        components: None,
        extra,
    }
    .with_components(register_headers(components.unwrap_or_default()))
}

fn patch_operation(mut operation: Operation) -> (Operation, bool) {
    let mut patched = false;
    let responses = std::mem::take(&mut operation.responses)
        .into_iter()
        .map(|(status, response)| match response {
            RefOr::Item(response) => {
                patched = true;
                (status, RefOr::Item(with_pagination_headers(response)))
            }
            reference => (status, reference),
        })
        .collect();

    (Operation { responses, ..operation }, patched)
}

fn with_pagination_headers(response: Response) -> Response {
    PAGINATION_HEADERS
        .into_iter()
        .fold(response, |response, (name, component)| {
            response.with_header(name.as_str(), RefOr::Ref(Reference::new(component.reference())))
        })
}

fn register_headers(components: Components) -> Components {
    HeaderComponent::ALL
        .into_iter()
        .fold(components, |components, component| {
            components.with_header(component.name(), RefOr::Item(definition(component)))
        })
}

fn definition(component: HeaderComponent) -> Header {
    let schema = match component {
        HeaderComponent::Count => json!({ "type": "integer" }),
        HeaderComponent::Url => json!({ "type": "string", "format": "url" }),
    };
    Header::new(component.description(), schema)
}
