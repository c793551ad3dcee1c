use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use ops_core::models::{AuditEntry, Comment, DocumentRecord, WorkItem};
use ops_core::status::{EvidenceStatus, Module, Priority, WorkItemStatus};
use ops_service::work_items::{CreateWorkItemParams, MyQueue};

use crate::handlers::map_error;
use crate::session::{require_staff, resolve_session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateWorkItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub module: Module,
    pub priority: Option<Priority>,
    pub item_type: Option<String>,
    pub ngo_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub owner_user_id: Option<Uuid>,
    pub approver_user_id: Option<Uuid>,
    pub due_date: Option<Date>,
    #[serde(default)]
    pub evidence_required: bool,
    #[serde(default)]
    pub approval_required: bool,
    #[serde(default)]
    pub external_visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: WorkItemStatus,
}

#[derive(Debug, Deserialize)]
pub struct ReassignRequest {
    pub owner_user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct EvidenceReviewRequest {
    pub evidence_status: EvidenceStatus,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

pub async fn list_work_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WorkItem>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .list_work_items()
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn create_work_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateWorkItemRequest>,
) -> Result<(StatusCode, Json<WorkItem>), (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    let params = CreateWorkItemParams {
        title: body.title,
        description: body.description,
        module: body.module,
        priority: body.priority,
        item_type: body.item_type,
        ngo_id: body.ngo_id,
        department_id: body.department_id,
        owner_user_id: body.owner_user_id,
        approver_user_id: body.approver_user_id,
        due_date: body.due_date,
        evidence_required: body.evidence_required,
        approval_required: body.approval_required,
        external_visible: body.external_visible,
    };
    state
        .service
        .create_work_item(params, Some(actor))
        .await
        .map(|item| (StatusCode::CREATED, Json(item)))
        .map_err(map_error)
}

pub async fn get_work_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkItem>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .get_work_item(id)
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn transition_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<WorkItem>, (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .transition_status(id, body.status, Some(actor))
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn reassign_owner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<ReassignRequest>,
) -> Result<Json<WorkItem>, (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .reassign_owner(id, body.owner_user_id, Some(actor))
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn review_evidence(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<EvidenceReviewRequest>,
) -> Result<Json<WorkItem>, (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .set_evidence_status(id, body.evidence_status, Some(actor))
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn list_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .list_comments(id)
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>), (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .add_comment(id, Some(actor), &body.body)
        .await
        .map(|comment| (StatusCode::CREATED, Json(comment)))
        .map_err(map_error)
}

pub async fn list_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DocumentRecord>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .list_documents(id)
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn audit_trail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AuditEntry>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .audit_trail("work_item", id)
        .await
        .map(Json)
        .map_err(map_error)
}

/// My Queue: items the caller owns plus items waiting on their sign-off.
pub async fn my_queue(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MyQueue>, (StatusCode, String)> {
    let user = require_staff(&resolve_session(&headers, &state))?;
    state.service.my_queue(user).await.map(Json).map_err(map_error)
}

/// Missing Items: open items whose required evidence has not arrived.
pub async fn missing_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WorkItem>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .missing_items()
        .await
        .map(Json)
        .map_err(map_error)
}
