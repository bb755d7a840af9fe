pub mod document;
pub mod patcher;

pub use document::{ApiDocument, Components, DocumentError, Header, Operation, PathItem, RefOr, Reference, Response};
pub use patcher::patch_document;
