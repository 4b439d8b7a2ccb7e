use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::Permission;
use crate::observer::ObserverLocation;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::auth::Operator;
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetObserverRequest {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_m: f64,
}

#[utoipa::path(
    get,
    path = "/api/observer",
    responses(
        (status = 200, description = "Current observer location", body = ObserverLocation)
    ),
    tag = "observer"
)]
pub async fn get_observer(State(state): State<AppState>) -> Json<ObserverLocation> {
    let tracker = state.tracker.lock().await;
    Json(tracker.observer())
}

#[utoipa::path(
    put,
    path = "/api/observer",
    request_body = SetObserverRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Normalized observer location", body = ObserverLocation),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "observer"
)]
pub async fn set_observer(
    State(state): State<AppState>,
    operator: Operator,
    Json(request): Json<SetObserverRequest>,
) -> ApiResult<Json<ObserverLocation>> {
    operator.require(Permission::SetObserver)?;

    let tracker = state.tracker.lock().await;
    let observer = tracker.set_observer(
        request.latitude_deg,
        request.longitude_deg,
        request.altitude_m,
    )?;
    log::info!("Observer updated by {}", operator.name);
    Ok(Json(observer))
}
