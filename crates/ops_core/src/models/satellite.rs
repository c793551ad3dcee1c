use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Supporting documentation attached to a work item. Append-only; the
/// review state lives on the work item's evidence_status, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub work_item_id: Option<Uuid>,
    pub ngo_id: Option<Uuid>,
    pub title: String,
    pub path: String,
    pub checksum: Option<String>,
    pub uploaded_by_user_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub work_item_id: Uuid,
    pub author_user_id: Option<Uuid>,
    pub body: String,
    pub created_at: OffsetDateTime,
}

/// Append-only mutation trail written alongside every mutating operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub entity: String,
    pub entity_id: Uuid,
    pub action: String,
    pub actor_user_id: Option<Uuid>,
    pub detail: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Scheduled,
    Seen,
}

/// The only mutable satellite: scheduled -> seen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub work_item_id: Option<Uuid>,
    pub user_id: Uuid,
    pub message: String,
    pub remind_at: OffsetDateTime,
    pub status: ReminderStatus,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub ngo_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub created_at: OffsetDateTime,
}
