//! Explicit session context with a testable lifecycle, passed by value into
//! whatever needs it. No ambient global state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Staff,
    Admin,
    /// Confined to the external portal surface.
    ExternalNgo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated { user_id: Uuid, role: Role },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub state: SessionState,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    pub fn authenticating() -> Self {
        Self {
            state: SessionState::Authenticating,
        }
    }

    pub fn authenticated(user_id: Uuid, role: Role) -> Self {
        Self {
            state: SessionState::Authenticated { user_id, role },
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            state: SessionState::Error {
                message: message.into(),
            },
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match &self.state {
            SessionState::Authenticated { user_id, .. } => Some(*user_id),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match &self.state {
            SessionState::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Staff area: any authenticated role except external NGO users.
    pub fn can_access_staff(&self) -> bool {
        matches!(self.role(), Some(Role::Staff) | Some(Role::Admin))
    }

    /// Portal area: any authenticated session.
    pub fn can_access_portal(&self) -> bool {
        self.role().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_ngo_is_confined_to_portal() {
        let session = SessionContext::authenticated(Uuid::new_v4(), Role::ExternalNgo);
        assert!(!session.can_access_staff());
        assert!(session.can_access_portal());
    }

    #[test]
    fn staff_reaches_both_surfaces() {
        let session = SessionContext::authenticated(Uuid::new_v4(), Role::Staff);
        assert!(session.can_access_staff());
        assert!(session.can_access_portal());
    }

    #[test]
    fn non_authenticated_states_reach_nothing() {
        for session in [
            SessionContext::anonymous(),
            SessionContext::authenticating(),
            SessionContext::failed("invalid key"),
        ] {
            assert!(!session.can_access_staff());
            assert!(!session.can_access_portal());
            assert!(session.user_id().is_none());
        }
    }
}
