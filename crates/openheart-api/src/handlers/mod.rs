//! Reaction handlers
//!
//! One GET and one POST handler serve every mounted endpoint; the routing
//! layer attaches the endpoint name as a request extension so each request
//! carries its own context explicitly.

use axum::{
    extract::{Extension, Path, State},
    Json,
};

use openheart_core::value_objects::ReactionMap;
use openheart_service::RouteValues;

use crate::response::ApiResult;
use crate::state::AppState;

/// The registered endpoint a route was mounted for.
#[derive(Debug, Clone)]
pub struct EndpointName(pub String);

/// Get the reaction map for a resource
///
/// GET {url_prefix}{rule}
pub async fn reactions(
    State(state): State<AppState>,
    Extension(endpoint): Extension<EndpointName>,
    Path(values): Path<RouteValues>,
) -> ApiResult<Json<ReactionMap>> {
    let map = state.service().reactions_for(&endpoint.0, &values).await?;
    Ok(Json(map))
}

/// Add a reaction to a resource
///
/// POST {post_url_prefix}{rule} with the raw reaction text as the body.
/// Answers with the updated map, or 418 when the body is rejected.
pub async fn react(
    State(state): State<AppState>,
    Extension(endpoint): Extension<EndpointName>,
    Path(values): Path<RouteValues>,
    raw: String,
) -> ApiResult<Json<ReactionMap>> {
    let map = state
        .service()
        .react_to(&raw, &endpoint.0, &values)
        .await?;
    Ok(Json(map))
}
