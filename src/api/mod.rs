pub mod relay;

use crate::AppState;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn relay_router(app_state: AppState) -> Router {
    Router::new()
        .route("/send_command", post(relay::send_command))
        .route(
            "/health",
            get(|| async {
                (
                    StatusCode::OK,
                    Json(serde_json::json!({ "status": "healthy" })),
                )
            }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
