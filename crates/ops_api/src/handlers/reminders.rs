use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use ops_core::models::Reminder;

use crate::handlers::map_error;
use crate::session::{require_staff, resolve_session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleReminderRequest {
    pub work_item_id: Option<Uuid>,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub remind_at: OffsetDateTime,
}

/// Reminders that have come due for the caller; seen ones drop out.
pub async fn due_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Reminder>>, (StatusCode, String)> {
    let user = require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .due_reminders(user)
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn schedule_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ScheduleReminderRequest>,
) -> Result<(StatusCode, Json<Reminder>), (StatusCode, String)> {
    let user = require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .schedule_reminder(body.work_item_id, user, &body.message, body.remind_at)
        .await
        .map(|reminder| (StatusCode::CREATED, Json(reminder)))
        .map_err(map_error)
}

pub async fn mark_seen(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Reminder>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .mark_reminder_seen(id)
        .await
        .map(Json)
        .map_err(map_error)
}
