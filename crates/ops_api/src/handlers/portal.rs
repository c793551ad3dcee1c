//! External NGO portal surface. Every route here requires an authenticated
//! session and an `x-ngo-id` header naming the NGO the caller acts for; the
//! hosted backend's row-level security remains the real boundary, this layer
//! just scopes queries.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use ops_core::models::WorkItem;
use ops_service::forms::SubmitFormOutcome;

use crate::handlers::forms::SubmitFormRequest;
use crate::handlers::map_error;
use crate::session::{require_portal, resolve_session};
use crate::AppState;

fn require_ngo(headers: &HeaderMap) -> Result<Uuid, (StatusCode, String)> {
    headers
        .get("x-ngo-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or((
            StatusCode::FORBIDDEN,
            "portal access requires an NGO context".to_string(),
        ))
}

/// Only externally-visible work items for the caller's NGO.
pub async fn list_work_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WorkItem>>, (StatusCode, String)> {
    require_portal(&resolve_session(&headers, &state))?;
    let ngo_id = require_ngo(&headers)?;
    state
        .service
        .list_portal_work_items(ngo_id)
        .await
        .map(Json)
        .map_err(map_error)
}

/// Portal form submission. The submission is always attributed to the
/// caller's NGO, whatever the request body says.
pub async fn submit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitFormRequest>,
) -> Result<(StatusCode, Json<SubmitFormOutcome>), (StatusCode, String)> {
    let actor = require_portal(&resolve_session(&headers, &state))?;
    let ngo_id = require_ngo(&headers)?;
    state
        .service
        .submit_form(id, body.payload, Some(ngo_id), Some(actor))
        .await
        .map(|outcome| (StatusCode::CREATED, Json(outcome)))
        .map_err(map_error)
}
