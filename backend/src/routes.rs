use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, AppState, Config};

pub fn create_router(state: AppState) -> Router {
    let cors_layer = create_cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        // Cards
        .route(
            "/api/meet/card",
            get(handlers::get_card)
                .post(handlers::upsert_card)
                .patch(handlers::update_card),
        )
        .route("/api/meet/browse", get(handlers::browse_cards))
        // Request / match workflow
        .route("/api/meet/like", post(handlers::like_user))
        .route("/api/meet/requests/{id}/accept", post(handlers::accept_request))
        .route("/api/meet/requests/{id}/reject", post(handlers::reject_request))
        .route("/api/meet/inbox", get(handlers::get_inbox))
        // Side channels
        .route("/api/meet/pass", post(handlers::pass_user))
        .route("/api/meet/block", post(handlers::block_user))
        .route("/api/meet/report", post(handlers::report_user))
        .route("/api/meet/follow", post(handlers::follow_user))
        .route("/api/meet/follow/{to_user_id}", delete(handlers::unfollow_user))
        .layer(cors_layer)
        .with_state(state)
}

fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .flatten()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        // Default to permissive for development
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

async fn health_check() -> &'static str {
    "OK"
}
