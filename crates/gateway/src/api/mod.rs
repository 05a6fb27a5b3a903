pub mod agents;
pub mod auth;
pub mod error;
pub mod health;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
///
/// Routes are split into **public** (health and the `/auth` flow) and
/// **protected** (`/api`, gated behind the session-token middleware).
///
/// `state` is needed to wire up the auth middleware at build time.
pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/callback", get(auth::callback));

    let protected = Router::new()
        .route("/api/groups", get(agents::list_groups))
        .route("/api/agents", get(agents::list_agents))
        .route("/api/agents/:group", get(agents::agents_for_group))
        .route("/api/agent/:id", get(agents::get_agent))
        .route("/api/me/agents", get(agents::my_agents))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_session,
        ));

    public.merge(protected)
}
