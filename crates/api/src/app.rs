use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use domain::services::{
    DiscoveryService, InvitationService, MatchService, RosterService, Stores, UserService,
};
use domain::MatchLocks;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{health, invitations, matches, users};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present when backed by PostgreSQL; used by readiness and pool metrics.
    pub pool: Option<PgPool>,
    pub matches: MatchService,
    pub roster: RosterService,
    pub invitations: InvitationService,
    pub discovery: DiscoveryService,
    pub users: UserService,
}

impl AppState {
    /// Wires every service to the same stores and match lock registry.
    pub fn new(config: Config, stores: Stores, pool: Option<PgPool>) -> Self {
        let locks = Arc::new(MatchLocks::new());
        let defaults = config.discovery.defaults();

        Self {
            config: Arc::new(config),
            pool,
            matches: MatchService::new(stores.clone(), locks.clone()),
            roster: RosterService::new(stores.clone(), locks.clone()),
            invitations: InvitationService::new(stores.clone(), locks),
            discovery: DiscoveryService::new(stores.clone(), defaults),
            users: UserService::new(stores),
        }
    }
}

pub fn create_app(config: Config, stores: Stores, pool: Option<PgPool>) -> Router {
    let state = AppState::new(config, stores, pool);
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty()
        || config.security.cors_origins.iter().any(|o| o == "*")
    {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
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

    let match_routes = Router::new()
        .route("/api/v1/matches", post(matches::create_match))
        .route("/api/v1/matches/search", get(matches::search_matches))
        .route(
            "/api/v1/matches/:match_id",
            get(matches::get_match)
                .put(matches::update_match)
                .delete(matches::delete_match),
        )
        .route("/api/v1/matches/:match_id/join", post(matches::join_match))
        .route(
            "/api/v1/matches/:match_id/participation",
            delete(matches::leave_match),
        )
        .route(
            "/api/v1/matches/:match_id/participants",
            get(matches::list_participants),
        )
        .route(
            "/api/v1/matches/:match_id/participants/:participation_id/:action",
            post(matches::manage_participant),
        )
        .route(
            "/api/v1/matches/:match_id/invitations",
            post(invitations::invite_player),
        );

    let invitation_routes = Router::new()
        .route("/api/v1/invitations", get(invitations::list_invitations))
        .route(
            "/api/v1/invitations/:invitation_id/respond",
            post(invitations::respond_invitation),
        );

    let user_routes = Router::new()
        .route("/api/v1/users/available", get(users::available_players))
        .route(
            "/api/v1/users/:user_id",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/api/v1/users/:user_id/calendar", get(users::calendar))
        .route(
            "/api/v1/users/:user_id/availability",
            put(users::set_availability),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(match_routes)
        .merge(invitation_routes)
        .merge(user_routes)
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
