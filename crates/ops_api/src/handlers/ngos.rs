use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ops_core::bundles::BundleSummary;
use ops_core::models::{Contact, Ngo};
use ops_core::status::NgoStatus;
use ops_db::repository::{BundleChange, NewNgo, NgoPatch};

use crate::handlers::map_error;
use crate::session::{require_staff, resolve_session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateNgoRequest {
    pub legal_name: String,
    pub common_name: String,
    pub bundle: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub status: Option<NgoStatus>,
    pub fiscal_type: Option<String>,
    pub notes: Option<String>,
    pub coordinator_user_id: Option<Uuid>,
    pub admin_user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNgoRequest {
    pub legal_name: Option<String>,
    pub common_name: Option<String>,
    pub bundle: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub status: Option<NgoStatus>,
    pub fiscal_type: Option<String>,
    pub notes: Option<String>,
    pub coordinator_user_id: Option<Uuid>,
    pub admin_user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct BundleUpdateRequest {
    pub rename: Option<String>,
    pub region: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BundleUpdateResponse {
    pub members_updated: u64,
}

pub async fn list_ngos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Ngo>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state.service.list_ngos().await.map(Json).map_err(map_error)
}

pub async fn create_ngo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateNgoRequest>,
) -> Result<(StatusCode, Json<Ngo>), (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    let params = NewNgo {
        id: Uuid::new_v4(),
        legal_name: body.legal_name,
        common_name: body.common_name,
        bundle: body.bundle,
        country: body.country,
        state: body.state,
        city: body.city,
        status: body.status.unwrap_or(NgoStatus::Prospect),
        fiscal_type: body.fiscal_type,
        notes: body.notes,
        coordinator_user_id: body.coordinator_user_id,
        admin_user_id: body.admin_user_id,
    };
    state
        .service
        .create_ngo(params, Some(actor))
        .await
        .map(|ngo| (StatusCode::CREATED, Json(ngo)))
        .map_err(map_error)
}

pub async fn get_ngo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Ngo>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state.service.get_ngo(id).await.map(Json).map_err(map_error)
}

pub async fn update_ngo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNgoRequest>,
) -> Result<Json<Ngo>, (StatusCode, String)> {
    let actor = require_staff(&resolve_session(&headers, &state))?;
    let patch = NgoPatch {
        legal_name: body.legal_name,
        common_name: body.common_name,
        bundle: body.bundle,
        country: body.country,
        state: body.state,
        city: body.city,
        status: body.status,
        fiscal_type: body.fiscal_type,
        notes: body.notes,
        coordinator_user_id: body.coordinator_user_id,
        admin_user_id: body.admin_user_id,
    };
    state
        .service
        .update_ngo(id, patch, Some(actor))
        .await
        .map(Json)
        .map_err(map_error)
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

pub async fn list_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Contact>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .list_contacts(id)
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn add_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<Contact>), (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .add_contact(
            id,
            &body.name,
            body.email.as_deref(),
            body.phone.as_deref(),
            body.role.as_deref(),
        )
        .await
        .map(|contact| (StatusCode::CREATED, Json(contact)))
        .map_err(map_error)
}

pub async fn list_bundles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<BundleSummary>>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    state
        .service
        .list_bundles()
        .await
        .map(Json)
        .map_err(map_error)
}

pub async fn update_bundle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
    Json(body): Json<BundleUpdateRequest>,
) -> Result<Json<BundleUpdateResponse>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    let change = BundleChange {
        rename: body.rename,
        region: body.region,
        notes: body.notes,
    };
    state
        .service
        .update_bundle(&name, change)
        .await
        .map(|members_updated| Json(BundleUpdateResponse { members_updated }))
        .map_err(map_error)
}
