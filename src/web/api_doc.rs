use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use super::api::catalog::{AddTleRequest, ReloadResponse};
use super::api::error::ErrorResponse;
use super::api::observer::SetObserverRequest;
use super::api::sky::{GuidanceResponse, SkyMarker, SkyViewResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::sky::status,
        super::api::sky::visible,
        super::api::sky::best,
        super::api::sky::view,
        super::api::sky::guidance,
        super::api::observer::get_observer,
        super::api::observer::set_observer,
        super::api::catalog::list,
        super::api::catalog::add,
        super::api::catalog::reload,
    ),
    components(
        schemas(
            SkyMarker,
            SkyViewResponse,
            GuidanceResponse,
            SetObserverRequest,
            AddTleRequest,
            ReloadResponse,
            ErrorResponse,
            crate::tracker::TrackerStatus,
            crate::registry::ObjectView,
            crate::registry::ObjectState,
            crate::observer::ObserverLocation,
            crate::signal::SignalQuality,
            crate::sky::PointingGuidance,
            crate::sky::Alignment,
            crate::sky::SkyPoint,
            crate::frames::TopocentricFix,
            crate::frames::Geodetic,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Skywatch API",
        description = "Live visibility and signal estimates for tracked satellites",
        version = "0.1.0"
    ),
    tags(
        (name = "sky", description = "Visible objects and sky plot"),
        (name = "observer", description = "Observer location"),
        (name = "catalog", description = "Tracked object catalog")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
