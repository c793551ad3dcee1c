//! Session resolution from request headers. The hosted backend's row-level
//! security stays authoritative; this layer only decides which surface
//! (staff vs portal) a caller may reach.

use axum::http::{HeaderMap, StatusCode};
use uuid::Uuid;

use ops_core::session::{Role, SessionContext};

use crate::AppState;

pub fn resolve_session(headers: &HeaderMap, state: &AppState) -> SessionContext {
    let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) else {
        return SessionContext::anonymous();
    };
    if key != state.api_key {
        return SessionContext::failed("invalid API key");
    }

    let user_id = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok());
    let role = headers
        .get("x-role")
        .and_then(|v| v.to_str().ok())
        .map(|r| match r {
            "admin" => Role::Admin,
            "external_ngo" => Role::ExternalNgo,
            _ => Role::Staff,
        });

    match (user_id, role) {
        (Some(user_id), Some(role)) => SessionContext::authenticated(user_id, role),
        _ => SessionContext::anonymous(),
    }
}

/// Staff surface gate: the external_ngo role is confined to /portal.
pub fn require_staff(session: &SessionContext) -> Result<Uuid, (StatusCode, String)> {
    if !session.can_access_staff() {
        return Err((
            StatusCode::FORBIDDEN,
            "staff access required".to_string(),
        ));
    }
    session
        .user_id()
        .ok_or((StatusCode::FORBIDDEN, "staff access required".to_string()))
}

pub fn require_portal(session: &SessionContext) -> Result<Uuid, (StatusCode, String)> {
    if !session.can_access_portal() {
        return Err((
            StatusCode::FORBIDDEN,
            "portal access requires an authenticated session".to_string(),
        ));
    }
    session.user_id().ok_or((
        StatusCode::FORBIDDEN,
        "portal access requires an authenticated session".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ops_service::OpsService;
    use sqlx::postgres::PgPoolOptions;

    fn state() -> AppState {
        // Lazy pool: no connection is made until a query runs.
        let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/unused");
        AppState {
            service: OpsService::new(pool.expect("lazy pool")),
            api_key: "public-key".to_string(),
        }
    }

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(k.as_bytes()).unwrap(),
                v.parse().unwrap(),
            );
        }
        map
    }

    #[tokio::test]
    async fn missing_key_is_anonymous() {
        let session = resolve_session(&HeaderMap::new(), &state());
        assert_eq!(session, SessionContext::anonymous());
    }

    #[tokio::test]
    async fn wrong_key_is_an_error_state() {
        let session = resolve_session(&headers(&[("x-api-key", "nope")]), &state());
        assert!(!session.can_access_portal());
        assert!(matches!(
            session.state,
            ops_core::session::SessionState::Error { .. }
        ));
    }

    #[tokio::test]
    async fn external_ngo_session_fails_the_staff_gate() {
        let user = Uuid::new_v4();
        let session = resolve_session(
            &headers(&[
                ("x-api-key", "public-key"),
                ("x-user-id", &user.to_string()),
                ("x-role", "external_ngo"),
            ]),
            &state(),
        );
        assert!(require_staff(&session).is_err());
        assert_eq!(require_portal(&session).unwrap(), user);
    }

    #[tokio::test]
    async fn staff_session_passes_both_gates() {
        let user = Uuid::new_v4();
        let session = resolve_session(
            &headers(&[
                ("x-api-key", "public-key"),
                ("x-user-id", &user.to_string()),
                ("x-role", "staff"),
            ]),
            &state(),
        );
        assert_eq!(require_staff(&session).unwrap(), user);
        assert_eq!(require_portal(&session).unwrap(), user);
    }
}
