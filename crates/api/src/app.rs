use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, security_headers_middleware,
    trace_id, RateLimiterState,
};
use crate::routes::{events, fighters, groups, health, invites, leaderboard, predictions};
use shared::jwt::JwtVerifier;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt_verifier: Arc<JwtVerifier>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let jwt_verifier = Arc::new(JwtVerifier::with_leeway(
        &config.auth.jwt_secret,
        config.auth.leeway_secs,
    ));

    // Rate limiting is disabled when the per-minute quota is zero
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        jwt_verifier,
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // API routes (v1). Auth happens per-handler through the UserAuth
    // extractor; rate limiting keys off the bearer token subject.
    let api_routes = Router::new()
        // Event routes
        .route("/api/v1/events", get(events::list_events))
        .route("/api/v1/events/:slug", get(events::get_event))
        // Fighter routes
        .route("/api/v1/fighters", get(fighters::list_fighters))
        .route("/api/v1/fighters/:slug", get(fighters::get_fighter))
        // Prediction routes
        .route(
            "/api/v1/predictions",
            put(predictions::save_prediction).get(predictions::event_predictions),
        )
        .route("/api/v1/me/stats", get(predictions::my_stats))
        .route("/api/v1/me/predictions", get(predictions::my_predictions))
        // Leaderboard routes
        .route("/api/v1/leaderboard", get(leaderboard::global_leaderboard))
        // Group routes
        .route(
            "/api/v1/groups",
            post(groups::create_group).get(groups::list_groups),
        )
        .route(
            "/api/v1/groups/:group_id",
            get(groups::get_group)
                .patch(groups::rename_group)
                .delete(groups::delete_group),
        )
        .route(
            "/api/v1/groups/:group_id/standings",
            get(groups::group_standings),
        )
        .route("/api/v1/groups/:group_id/banner", get(groups::group_banner))
        .route(
            "/api/v1/groups/:group_id/members/:profile_id/promote",
            post(groups::promote_member),
        )
        .route(
            "/api/v1/groups/:group_id/members/:profile_id",
            delete(groups::remove_member),
        )
        // Invite routes
        .route("/api/v1/groups/:group_id/invite", get(invites::get_invite))
        .route("/api/v1/invites/redeem", post(invites::redeem_invite))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Public routes (no authentication, no rate limiting)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
