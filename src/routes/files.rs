use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use uuid::Uuid;

use super::{listing_response, AppState};
use crate::error::AppError;
use crate::models::FileRecord;
use crate::pagination::{ListingResult, PaginatedResponse, Pagination, SearchFilterRequest};

// GET /files
#[utoipa::path(
    get,
    path = "/files",
    params(
        Pagination
    ),
    responses(
        (status = 200, description = "Page of files", body = PaginatedResponse<FileRecord>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "Page out of range")
    ),
    tag = "Files"
)]
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<Pagination>,
) -> Result<Response, AppError> {
    let filter = SearchFilterRequest::from_query(&query, state.page_limits)?;
    tracing::info!(page = filter.page_index(), limit = filter.page_size(), "list files");

    let files = state.catalog.files().to_vec();
    listing_response(&state, "files", ListingResult::from(files), filter)
}

// GET /files/{id}
#[utoipa::path(
    get,
    path = "/files/{id}",
    params(
        ("id" = Uuid, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File details", body = FileRecord),
        (status = 404, description = "File not found")
    ),
    tag = "Files"
)]
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let file = state
        .catalog
        .file(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("File {} not found", id)))?;

    // single resources go through the same hooks; they come back undecorated
    let filter = SearchFilterRequest::new(0, state.page_limits.default_size);
    listing_response(&state, "files", ListingResult::Single(file), filter)
}
