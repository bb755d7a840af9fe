mod files;
mod home;
mod projects;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::error::AppError;
use crate::models::Catalog;
use crate::openapi::{ApiDocument, DocumentError};
use crate::pagination::{BaseUrlBuilder, ListingResult, PageLimits, PaginatedResponse, SearchFilterRequest};
use crate::plugin::{LifecycleHooks, PaginationPlugin, ResponseEvent};

#[derive(OpenApi)]
#[openapi(
    paths(
        home::root,
        files::list_files,
        files::get_file,
        projects::list_projects,
        projects::list_project_files,
    ),
    components(
        schemas(
            crate::models::FileRecord,
            crate::models::Project,
        )
    ),
    tags(
        (name = "General", description = "General API information"),
        (name = "Files", description = "Paginated file listings"),
        (name = "Projects", description = "Paginated project listings")
    ),
    info(
        title = "Pagination Kit API",
        version = "0.1.0",
        description = "Listing endpoints that advertise x-pagination-* navigation headers",
    )
)]
struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub plugin: Arc<PaginationPlugin<BaseUrlBuilder>>,
    pub page_limits: PageLimits,
}

impl AppState {
    pub fn new(config: &Config, catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            plugin: Arc::new(PaginationPlugin::new(BaseUrlBuilder::new(config.public_url.clone()))),
            page_limits: config.page_limits(),
        }
    }
}

/// The API description exactly as the handlers declare it.
pub fn raw_openapi_document() -> Result<ApiDocument, DocumentError> {
    ApiDocument::try_from(&ApiDoc::openapi())
}

/// The API description after every plugin hook has seen it.
pub fn openapi_document<H: LifecycleHooks>(hooks: &H) -> Result<ApiDocument, DocumentError> {
    Ok(hooks.on_api_description_built(raw_openapi_document()?))
}

pub fn create_routes(state: AppState) -> Result<Router, DocumentError> {
    let document = openapi_document(state.plugin.as_ref())?.to_json()?;

    // Swagger UI (stateless)
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .external_url_unchecked("/api-docs/openapi.json", document)
        .into();

    let app_routes = Router::new()
        .route("/", get(home::root))
        .route("/files", get(files::list_files))
        .route("/files/{id}", get(files::get_file))
        .route("/projects", get(projects::list_projects))
        .route("/projects/{project_id}/files", get(projects::list_project_files))
        .with_state(state);

    Ok(Router::new()
        .merge(swagger_router)
        .merge(app_routes)
        .layer(TraceLayer::new_for_http()))
}

/// Renders `result` and hands the response to the plugin hooks.
fn listing_response<T: Serialize + Clone>(
    state: &AppState,
    resource: &str,
    mut result: ListingResult<T>,
    mut filter: SearchFilterRequest,
) -> Result<Response, AppError> {
    let response = match result.normalize(&mut filter)? {
        Some(view) => Json(PaginatedResponse::from(view)).into_response(),
        None => match &result {
            ListingResult::Single(item) => Json(item).into_response(),
            _ => StatusCode::NO_CONTENT.into_response(),
        },
    };

    Ok(state.plugin.on_response_built(ResponseEvent {
        resource,
        result: &mut result,
        filter: &mut filter,
        response,
    }))
}
