// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{attempt, leaderboard},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Builds the CORS layer from the configured origins, skipping any that are
/// not valid header values.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * Public leaderboard reads, authenticated "my standing" and attempt submission.
/// * Global middleware (Trace, CORS).
/// * Injects global state (attempt store, config).
pub fn create_router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let protected = Router::new()
        .route("/api/leaderboard/me", get(leaderboard::get_my_standing))
        .route("/api/attempts", post(attempt::submit_attempt))
        .layer(auth);

    Router::new()
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_origins)),
        )
        .with_state(state)
}
