pub mod auth;
pub mod platforms;
pub mod profiles;
pub mod stats;

use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::routes::auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public routes, token-guarded routes,
/// and the Swagger document.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    // Routes reachable without a token
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/platforms", get(platforms::list))
        .route("/api/profiles/all", get(profiles::all))
        .route("/api/profiles/:id", get(profiles::by_id))
        .route("/api/github/stats/:username", get(stats::github_by_username))
        .route("/api/leetcode/stats/:username", get(stats::leetcode_by_username))
        .route("/api/hackerrank/stats/:username", get(stats::hackerrank_by_username))
        .route("/api/medium/articles/:username", get(stats::medium_by_username))
        .route("/api/linkedin/profile/:username", get(stats::linkedin_by_username))
        .route("/api/twitter/tweets/:username", get(stats::twitter_by_username));

    // Routes that require a logged-in user
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/profiles", post(profiles::upsert).get(profiles::mine).delete(profiles::delete))
        .route("/api/profiles/summary", get(profiles::summary))
        .route("/api/profiles/platform", post(profiles::add_platform))
        .route("/api/profiles/platform/:id", delete(profiles::remove_platform))
        .route("/api/github/stats", get(stats::github_mine))
        .route("/api/leetcode/stats", get(stats::leetcode_mine))
        .route("/api/hackerrank/stats", get(stats::hackerrank_mine))
        .route("/api/medium/articles", get(stats::medium_mine))
        .route("/api/linkedin/profile", get(stats::linkedin_mine))
        .route("/api/twitter/tweets", get(stats::twitter_mine))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_user));

    public
        .merge(protected)
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
