//! Pagination metadata for collection-listing endpoints.
//!
//! Two independent transforms share the five `x-pagination-*` header names:
//! - [`openapi::patch_document`] documents the headers on every listing GET
//!   operation of an OpenAPI description;
//! - [`pagination::ResponseDecorator`] computes the headers for an actual
//!   listing response.
//!
//! [`plugin::PaginationPlugin`] wires both into a host through
//! [`plugin::LifecycleHooks`]; [`routes`] is a small axum service built on top.

pub mod config;
pub mod error;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod plugin;
pub mod routes;
