use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Permission;
use crate::registry::ObjectView;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::auth::Operator;
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTleRequest {
    /// One element set, two lines or three with a name line.
    pub tle: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    pub tracked: usize,
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "Tracked objects in catalog order", body = Vec<ObjectView>)
    ),
    tag = "catalog"
)]
pub async fn list(State(state): State<AppState>) -> Json<Vec<ObjectView>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.objects())
}

#[utoipa::path(
    post,
    path = "/api/catalog",
    request_body = AddTleRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Object registered", body = ObjectView),
        (status = 400, description = "Malformed element set", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn add(
    State(state): State<AppState>,
    operator: Operator,
    Json(request): Json<AddTleRequest>,
) -> ApiResult<Json<ObjectView>> {
    operator.require(Permission::ManageCatalog)?;

    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.add_tle(&request.tle)?))
}

#[utoipa::path(
    post,
    path = "/api/catalog/reload",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Catalog reloaded", body = ReloadResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 500, description = "Folder could not be read", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn reload(
    State(state): State<AppState>,
    operator: Operator,
) -> ApiResult<Json<ReloadResponse>> {
    operator.require(Permission::ManageCatalog)?;

    // Folder scan and SGP4 initialization happen before the tracker is locked.
    let loader = state.tle_loader.clone();
    let entries = tokio::task::spawn_blocking(move || loader.load_all())
        .await
        .map_err(|e| ApiError::Internal {
            error: "catalog_error",
            message: e.to_string(),
        })??;

    let tracker = state.tracker.lock().await;
    let tracked = tracker.install_catalog(entries);
    log::info!("Catalog reloaded by {}", operator.name);
    Ok(Json(ReloadResponse { tracked }))
}
