//! The slice of an OpenAPI 3 document the pagination patcher walks.
//!
//! Only the nodes on the path `paths -> get -> responses -> headers` and
//! `components.headers` are typed. Everything else is carried verbatim in
//! `extra`, so converting a document in and out of this model does not drop
//! fields the patcher never looks at.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub type Extra = Map<String, Value>;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to encode OpenAPI document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode OpenAPI document: {0}")]
    Decode(#[source] serde_json::Error),
}

/// `$ref` pointer to a reusable component. OpenAPI 3.1 allows `summary`
/// and `description` next to it; those land in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub location: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Reference {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref(Reference),
    Item(T),
}

impl<T> RefOr<T> {
    pub fn is_ref(&self) -> bool {
        matches!(self, RefOr::Ref(_))
    }

    pub fn as_item(&self) -> Option<&T> {
        match self {
            RefOr::Item(item) => Some(item),
            RefOr::Ref(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ApiDocument {
    pub fn from_json(value: Value) -> Result<Self, DocumentError> {
        serde_json::from_value(value).map_err(DocumentError::Decode)
    }

    pub fn to_json(&self) -> Result<Value, DocumentError> {
        serde_json::to_value(self).map_err(DocumentError::Encode)
    }

    pub fn with_path(mut self, url: impl Into<String>, item: PathItem) -> Self {
        self.paths.insert(url.into(), item);
        self
    }

    pub fn with_components(mut self, components: Components) -> Self {
        self.components = Some(components);
        self
    }
}

impl TryFrom<&utoipa::openapi::OpenApi> for ApiDocument {
    type Error = DocumentError;

    fn try_from(doc: &utoipa::openapi::OpenApi) -> Result<Self, Self::Error> {
        let value = serde_json::to_value(doc).map_err(DocumentError::Encode)?;
        Self::from_json(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl PathItem {
    pub fn with_get(mut self, operation: Operation) -> Self {
        self.get = Some(operation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub responses: BTreeMap<String, RefOr<Response>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Operation {
    pub fn with_response(mut self, status: impl Into<String>, response: RefOr<Response>) -> Self {
        self.responses.insert(status.into(), response);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, RefOr<Header>>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Adds or replaces one header, creating the header map if needed.
    pub fn with_header(mut self, name: impl Into<String>, header: RefOr<Header>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), header);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Header {
    pub fn new(description: impl Into<String>, schema: Value) -> Self {
        Self {
            description: Some(description.into()),
            schema: Some(schema),
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, RefOr<Header>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Components {
    pub fn with_header(mut self, name: impl Into<String>, header: RefOr<Header>) -> Self {
        self.headers.insert(name.into(), header);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn references_and_inline_responses_are_told_apart() {
        let doc = ApiDocument::from_json(json!({
            "openapi": "3.1.0",
            "paths": {
                "/files": {
                    "get": {
                        "responses": {
                            "200": { "description": "ok", "content": {} },
                            "404": { "$ref": "#/components/responses/NotFound" }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let get = doc.paths["/files"].get.as_ref().unwrap();
        assert!(get.responses["404"].is_ref());
        let ok = get.responses["200"].as_item().unwrap();
        assert_eq!(ok.description, "ok");
        assert!(ok.extra.contains_key("content"));
        assert_eq!(ok.headers, None);
    }

    #[test]
    fn untouched_fields_survive_a_round_trip() {
        let source = json!({
            "openapi": "3.1.0",
            "info": { "title": "demo", "version": "1" },
            "paths": {
                "/files": {
                    "summary": "files",
                    "post": { "responses": {} },
                    "get": {
                        "operationId": "list_files",
                        "responses": {
                            "200": {
                                "description": "ok",
                                "headers": { "x-rate": { "schema": { "type": "integer" } } }
                            }
                        }
                    }
                }
            },
            "components": { "schemas": { "File": { "type": "object" } } }
        });

        let doc = ApiDocument::from_json(source.clone()).unwrap();
        assert_eq!(doc.to_json().unwrap(), source);
    }

    #[test]
    fn reference_siblings_survive_a_round_trip() {
        let source = json!({
            "paths": {
                "/files": {
                    "get": {
                        "responses": {
                            "404": {
                                "$ref": "#/components/responses/NotFound",
                                "summary": "missing",
                                "description": "No file with that id"
                            }
                        }
                    }
                }
            }
        });

        let doc = ApiDocument::from_json(source.clone()).unwrap();
        let RefOr::Ref(reference) = &doc.paths["/files"].get.as_ref().unwrap().responses["404"] else {
            panic!("404 should stay a reference");
        };
        assert_eq!(reference.location, "#/components/responses/NotFound");
        assert_eq!(reference.extra["description"], "No file with that id");
        assert_eq!(doc.to_json().unwrap(), source);
    }

    #[test]
    fn with_header_creates_missing_map() {
        let response = Response::new("ok")
            .with_header("x-one", RefOr::Ref(Reference::new("#/components/headers/Url")));
        let headers = response.headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert!(headers["x-one"].is_ref());
    }
}
