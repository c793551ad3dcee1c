use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use ops_core::reports::DEFAULT_TRAILING_MONTHS;
use ops_service::reports::OverviewReport;

use crate::handlers::map_error;
use crate::session::{require_staff, resolve_session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OverviewQuery {
    pub months: Option<u32>,
}

pub async fn overview(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OverviewQuery>,
) -> Result<Json<OverviewReport>, (StatusCode, String)> {
    require_staff(&resolve_session(&headers, &state))?;
    let months = query.months.unwrap_or(DEFAULT_TRAILING_MONTHS);
    state
        .service
        .overview(months)
        .await
        .map(Json)
        .map_err(map_error)
}
