//! Catalog endpoints under `/api`. All of them sit behind
//! [`require_session`](super::auth::require_session).

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use ua_domain::identity::Identity;

use super::error::ApiError;
use crate::state::AppState;

/// GET /api/groups
pub async fn list_groups(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "groups": state.queries.list_groups(),
    }))
}

/// GET /api/agents: the full catalog.
pub async fn list_agents(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "agents": state.queries.list_all(),
    }))
}

/// GET /api/agents/:group accepts a slug or a plain group name.
pub async fn agents_for_group(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let listing = state.queries.list_agents_for_slug(&group)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "group": listing.group,
        "agents": listing.agents,
    })))
}

/// GET /api/agent/:id
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let agent = state.queries.get_agent(&id)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "agent": agent,
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct MyAgentsQuery {
    /// Drop multi-agent records, as the dashboard does.
    #[serde(default)]
    pub single_topic: bool,
}

/// GET /api/me/agents: what the caller's identity may see.
pub async fn my_agents(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<MyAgentsQuery>,
) -> Json<serde_json::Value> {
    let mut agents = state.queries.list_agents_for_identity(&identity);
    if query.single_topic {
        agents.retain(|a| !a.is_multi_agent);
    }
    Json(serde_json::json!({
        "success": true,
        "team": identity.team,
        "isAdmin": identity.is_admin,
        "agents": agents,
    }))
}
