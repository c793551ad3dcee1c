use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::status::NgoStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ngo {
    pub id: Uuid,
    pub legal_name: String,
    pub common_name: String,
    /// Derived grouping tag; NGOs sharing a bundle string form a Bundle.
    pub bundle: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub status: NgoStatus,
    pub fiscal_type: Option<String>,
    pub notes: Option<String>,
    pub coordinator_user_id: Option<Uuid>,
    pub admin_user_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
