use axum::http::StatusCode;

use ops_db::Error;

pub mod forms;
pub mod ngos;
pub mod portal;
pub mod reminders;
pub mod reports;
pub mod work_items;

pub async fn health_check() -> &'static str {
    "ok"
}

/// Failures surface to the caller with the raw backend message intact; the
/// client shows it as-is and the user retries the action.
pub(crate) fn map_error(err: Error) -> (StatusCode, String) {
    let status = match &err {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Validation(_) | Error::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Database(_) => {
            tracing::error!("backend failure: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}
