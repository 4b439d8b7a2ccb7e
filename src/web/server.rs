use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::TleLoader;
use crate::config::Config;
use crate::observer::ObserverLocation;
use crate::propagation::{GmstClock, Sgp4Propagator};
use crate::registry::Registry;
use crate::tracker::Tracker;

use super::api::catalog as catalog_handlers;
use super::api::observer as observer_handlers;
use super::api::sky as sky_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Sky
        .route("/api/sky/status", get(sky_handlers::status))
        .route("/api/sky/visible", get(sky_handlers::visible))
        .route("/api/sky/best", get(sky_handlers::best))
        .route("/api/sky/view", get(sky_handlers::view))
        .route("/api/sky/guidance", get(sky_handlers::guidance))
        // Observer
        .route(
            "/api/observer",
            get(observer_handlers::get_observer).put(observer_handlers::set_observer),
        )
        // Catalog
        .route(
            "/api/catalog",
            get(catalog_handlers::list).post(catalog_handlers::add),
        )
        .route("/api/catalog/reload", post(catalog_handlers::reload))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let observer = config.observer.location().unwrap_or_else(|e| {
        log::warn!("Invalid observer in config, using 0, 0: {}", e);
        ObserverLocation::default()
    });

    let mut tracker = Tracker::new(observer, Registry::new(Sgp4Propagator, GmstClock));
    let tle_loader = TleLoader::new(config.catalog.tle_folder.clone());
    if let Err(e) = tracker.reload_catalog(&tle_loader) {
        log::warn!("Failed to load TLE catalog: {}", e);
    }
    if let Err(e) = tracker.start(config.tracker.tick_interval) {
        log::warn!("Failed to start tracker: {}", e);
    }

    let state = AppState {
        config: Arc::new(config),
        tracker: Arc::new(Mutex::new(tracker)),
        tle_loader: Arc::new(tle_loader),
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
