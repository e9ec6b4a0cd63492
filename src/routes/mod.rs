// Route definitions

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::AppState;

// Declare submodules for different route groups
mod api;
mod financing;

pub use api::ListingQuery;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        .route("/vehicles", get(api::list_vehicles))
        .route("/vehicles/export", get(api::export_vehicles))
        .route("/vehicles/:slug", get(api::get_vehicle))
        .route("/facets", get(api::get_facets))
        .route("/financing/calculate", post(financing::calculate))
        .route("/financing/terms", get(financing::get_terms))
        .with_state(app_state);

    Router::new()
        .route("/health", get(healthcheck))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}

async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
