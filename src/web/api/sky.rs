use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::registry::ObjectView;
use crate::sky::{compass_point, project, PointingGuidance, SkyPoint};
use crate::tracker::TrackerStatus;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewQuery {
    /// Plot radius in canvas units; defaults to 1 for normalized output.
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GuidanceQuery {
    /// Current device heading, degrees clockwise from north.
    pub heading: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkyMarker {
    pub name: String,
    pub is_active: bool,
    pub signal_strength: f64,
    pub bars_active: u8,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub direction: String,
    pub position: SkyPoint,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkyViewResponse {
    pub radius: f64,
    pub markers: Vec<SkyMarker>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuidanceResponse {
    pub target: ObjectView,
    pub guidance: PointingGuidance,
}

#[utoipa::path(
    get,
    path = "/api/sky/status",
    responses(
        (status = 200, description = "Tracker status", body = TrackerStatus)
    ),
    tag = "sky"
)]
pub async fn status(State(state): State<AppState>) -> Json<TrackerStatus> {
    let tracker = state.tracker.lock().await;
    Json(tracker.status())
}

#[utoipa::path(
    get,
    path = "/api/sky/visible",
    responses(
        (status = 200, description = "Visible objects, strongest first", body = Vec<ObjectView>)
    ),
    tag = "sky"
)]
pub async fn visible(State(state): State<AppState>) -> Json<Vec<ObjectView>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.visible())
}

#[utoipa::path(
    get,
    path = "/api/sky/best",
    responses(
        (status = 200, description = "Active selection, or null when nothing is visible", body = ObjectView)
    ),
    tag = "sky"
)]
pub async fn best(State(state): State<AppState>) -> Json<Option<ObjectView>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.best())
}

#[utoipa::path(
    get,
    path = "/api/sky/view",
    params(ViewQuery),
    responses(
        (status = 200, description = "Projected markers for visible objects", body = SkyViewResponse),
        (status = 400, description = "Invalid radius", body = ErrorResponse)
    ),
    tag = "sky"
)]
pub async fn view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<SkyViewResponse>> {
    let radius = query.radius.unwrap_or(1.0);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ApiError::Validation("radius must be positive".into()));
    }

    let visible = state.tracker.lock().await.visible();
    let markers = visible
        .into_iter()
        .filter_map(|object| {
            let fix = object.topocentric?;
            Some(SkyMarker {
                position: project(fix.azimuth_deg, fix.elevation_deg, radius),
                direction: compass_point(fix.azimuth_deg).to_string(),
                azimuth_deg: fix.azimuth_deg,
                elevation_deg: fix.elevation_deg,
                name: object.name,
                is_active: object.is_active,
                signal_strength: object.signal_strength,
                bars_active: object.bars_active,
            })
        })
        .collect();

    Ok(Json(SkyViewResponse { radius, markers }))
}

#[utoipa::path(
    get,
    path = "/api/sky/guidance",
    params(GuidanceQuery),
    responses(
        (status = 200, description = "Pointing guidance to the best object", body = GuidanceResponse),
        (status = 404, description = "No object visible", body = ErrorResponse)
    ),
    tag = "sky"
)]
pub async fn guidance(
    State(state): State<AppState>,
    Query(query): Query<GuidanceQuery>,
) -> ApiResult<Json<GuidanceResponse>> {
    let target = state
        .tracker
        .lock()
        .await
        .best()
        .ok_or(ApiError::NotFound("no_visible_object"))?;
    let fix = target
        .topocentric
        .ok_or(ApiError::NotFound("no_visible_object"))?;

    Ok(Json(GuidanceResponse {
        guidance: PointingGuidance::evaluate(query.heading, fix.azimuth_deg),
        target,
    }))
}
