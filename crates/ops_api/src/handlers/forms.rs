use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use ops_core::mapping::TemplateMapping;
use ops_core::models::{FieldDef, FormSubmission, FormTemplate};
use ops_core::status::Module;
use ops_service::forms::{SaveTemplateParams, SubmitFormOutcome};

use crate::handlers::map_error;
use crate::session::{require_staff, resolve_session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveTemplateRequest {
    pub name: String,
    pub module: Module,
    pub schema: Vec<FieldDef>,
    #[serde(default)]
    pub mapping: TemplateMapping,
}

#[derive(Debug, Deserialize)]
pub struct SubmitFormRequest {
    pub payload: Map<String, Value>,
    pub ngo_id: Option<Uuid>,
}

pub async fn list_templates(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<FormTemplate>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .list_templates()
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn save_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SaveTemplateRequest>,
) -> Result<(StatusCode, Json<FormTemplate>), (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    let params = SaveTemplateParams {
        name: body.name,
        module: body.module,
        schema: body.schema,
        mapping: body.mapping,
    };
    state
        .service
        .save_template(params, Some(actor))
        .await
        .map(|template| (StatusCode::CREATED, Json(template)))
        .map_err(map_error)
}

pub async fn get_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<FormTemplate>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .get_template(id)
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn list_submissions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FormSubmission>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .list_submissions(id)
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn get_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<FormSubmission>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .get_submission(id)
        .await
        .map(Json)
        .map_err(map_error)
}

/// Staff-side submission, e.g. filling a form on behalf of an NGO over the
/// phone. The mapping engine decides whether a work item comes out of it.
pub async fn submit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<SubmitFormRequest>,
) -> Result<(StatusCode, Json<SubmitFormOutcome>), (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .submit_form(id, body.payload, body.ngo_id, Some(actor))
        .await
        .map(|outcome| (StatusCode::CREATED, Json(outcome)))
        .map_err(map_error)
}
