use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use uuid::Uuid;

use super::{listing_response, AppState};
use crate::error::AppError;
use crate::models::{Catalog, FileRecord, Project};
use crate::pagination::{ListingResult, Paginated, PaginatedResponse, Pagination, SearchFilterRequest};

// GET /projects
#[utoipa::path(
    get,
    path = "/projects",
    params(
        Pagination
    ),
    responses(
        (status = 200, description = "Page of projects", body = PaginatedResponse<Project>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "Page out of range")
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<Pagination>,
) -> Result<Response, AppError> {
    let filter = SearchFilterRequest::from_query(&query, state.page_limits)?;
    tracing::info!(page = filter.page_index(), limit = filter.page_size(), "list projects");

    // Cut the page up front, the way a LIMIT/OFFSET query would.
    let projects = state.catalog.projects();
    let offset = filter.page_index().saturating_mul(filter.page_size());
    let page: Vec<Project> = projects
        .iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(filter.page_size()).unwrap_or(usize::MAX))
        .cloned()
        .collect();
    let view = Paginated::from_parts(
        page,
        projects.len() as u64,
        filter.page_index().saturating_add(1),
        filter.page_size(),
    )?;

    listing_response(&state, "projects", ListingResult::from(view), filter)
}

// GET /projects/{project_id}/files
#[utoipa::path(
    get,
    path = "/projects/{project_id}/files",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        Pagination
    ),
    responses(
        (status = 200, description = "Page of files in the project", body = PaginatedResponse<FileRecord>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "Project or page not found")
    ),
    tag = "Projects"
)]
pub async fn list_project_files(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<Pagination>,
) -> Result<Response, AppError> {
    let filter = SearchFilterRequest::from_query(&query, state.page_limits)?;
    if state.catalog.project(project_id).is_none() {
        return Err(AppError::NotFound(format!("Project {} not found", project_id)));
    }
    tracing::info!(%project_id, page = filter.page_index(), limit = filter.page_size(), "list project files");

    let files = Catalog::stream_files_in_project(Arc::clone(&state.catalog), project_id);
    let resource = format!("projects/{}/files", project_id);
    listing_response(&state, &resource, ListingResult::stream(files), filter)
}
