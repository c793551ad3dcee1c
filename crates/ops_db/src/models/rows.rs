use serde_json::Value;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use ops_core::models::{
    AuditEntry, Comment, Contact, DocumentRecord, FormSubmission, FormTemplate, Ngo, Reminder,
    ReminderStatus, WorkItem,
};
use ops_core::status::{EvidenceStatus, Module, NgoStatus, Priority, WorkItemStatus};

use crate::error::Error;

fn decode<T>(entity: &str, id: Uuid, value: &str) -> Result<T, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| Error::Database(format!("{entity} {id}: {e}")))
}

#[derive(Debug, Clone, FromRow)]
pub struct WorkItemRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub module: String,
    pub status: String,
    pub priority: String,
    pub item_type: Option<String>,
    pub ngo_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub owner_user_id: Option<Uuid>,
    pub created_by_user_id: Option<Uuid>,
    pub approver_user_id: Option<Uuid>,
    pub due_date: Option<Date>,
    pub completed_at: Option<OffsetDateTime>,
    pub evidence_required: bool,
    pub evidence_status: String,
    pub approval_required: bool,
    pub external_visible: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<WorkItemRow> for WorkItem {
    type Error = Error;

    fn try_from(row: WorkItemRow) -> Result<Self, Error> {
        Ok(WorkItem {
            module: decode::<Module>("work item", row.id, &row.module)?,
            status: decode::<WorkItemStatus>("work item", row.id, &row.status)?,
            priority: decode::<Priority>("work item", row.id, &row.priority)?,
            evidence_status: decode::<EvidenceStatus>("work item", row.id, &row.evidence_status)?,
            id: row.id,
            title: row.title,
            description: row.description,
            item_type: row.item_type,
            ngo_id: row.ngo_id,
            department_id: row.department_id,
            owner_user_id: row.owner_user_id,
            created_by_user_id: row.created_by_user_id,
            approver_user_id: row.approver_user_id,
            due_date: row.due_date,
            completed_at: row.completed_at,
            evidence_required: row.evidence_required,
            approval_required: row.approval_required,
            external_visible: row.external_visible,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct NgoRow {
    pub id: Uuid,
    pub legal_name: String,
    pub common_name: String,
    pub bundle: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub status: String,
    pub fiscal_type: Option<String>,
    pub notes: Option<String>,
    pub coordinator_user_id: Option<Uuid>,
    pub admin_user_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<NgoRow> for Ngo {
    type Error = Error;

    fn try_from(row: NgoRow) -> Result<Self, Error> {
        Ok(Ngo {
            status: decode::<NgoStatus>("NGO", row.id, &row.status)?,
            id: row.id,
            legal_name: row.legal_name,
            common_name: row.common_name,
            bundle: row.bundle,
            country: row.country,
            state: row.state,
            city: row.city,
            fiscal_type: row.fiscal_type,
            notes: row.notes,
            coordinator_user_id: row.coordinator_user_id,
            admin_user_id: row.admin_user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FormTemplateRow {
    pub id: Uuid,
    pub name: String,
    pub module: String,
    pub schema_json: Value,
    pub mapping_json: Value,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<FormTemplateRow> for FormTemplate {
    type Error = Error;

    fn try_from(row: FormTemplateRow) -> Result<Self, Error> {
        let schema = serde_json::from_value(row.schema_json)
            .map_err(|e| Error::Database(format!("template {}: bad schema_json: {e}", row.id)))?;
        let mapping = serde_json::from_value(row.mapping_json)
            .map_err(|e| Error::Database(format!("template {}: bad mapping_json: {e}", row.id)))?;
        Ok(FormTemplate {
            module: decode::<Module>("template", row.id, &row.module)?,
            id: row.id,
            name: row.name,
            schema,
            mapping,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FormSubmissionRow {
    pub id: Uuid,
    pub form_template_id: Uuid,
    pub ngo_id: Option<Uuid>,
    pub work_item_id: Option<Uuid>,
    pub payload_json: Value,
    pub status: String,
    pub submitted_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<FormSubmissionRow> for FormSubmission {
    type Error = Error;

    fn try_from(row: FormSubmissionRow) -> Result<Self, Error> {
        let payload = match row.payload_json {
            Value::Object(map) => map,
            other => {
                return Err(Error::Database(format!(
                    "submission {}: payload_json is not an object: {other}",
                    row.id
                )))
            }
        };
        let status = serde_json::from_value(Value::String(row.status.clone()))
            .map_err(|_| Error::Database(format!("submission {}: bad status '{}'", row.id, row.status)))?;
        Ok(FormSubmission {
            id: row.id,
            form_template_id: row.form_template_id,
            ngo_id: row.ngo_id,
            work_item_id: row.work_item_id,
            payload,
            status,
            submitted_at: row.submitted_at,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub work_item_id: Option<Uuid>,
    pub ngo_id: Option<Uuid>,
    pub title: String,
    pub path: String,
    pub checksum: Option<String>,
    pub uploaded_by_user_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        DocumentRecord {
            id: row.id,
            work_item_id: row.work_item_id,
            ngo_id: row.ngo_id,
            title: row.title,
            path: row.path,
            checksum: row.checksum,
            uploaded_by_user_id: row.uploaded_by_user_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub work_item_id: Uuid,
    pub author_user_id: Option<Uuid>,
    pub body: String,
    pub created_at: OffsetDateTime,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            work_item_id: row.work_item_id,
            author_user_id: row.author_user_id,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AuditRow {
    pub id: Uuid,
    pub entity: String,
    pub entity_id: Uuid,
    pub action: String,
    pub actor_user_id: Option<Uuid>,
    pub detail: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<AuditRow> for AuditEntry {
    fn from(row: AuditRow) -> Self {
        AuditEntry {
            id: row.id,
            entity: row.entity,
            entity_id: row.entity_id,
            action: row.action,
            actor_user_id: row.actor_user_id,
            detail: row.detail,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ReminderRow {
    pub id: Uuid,
    pub work_item_id: Option<Uuid>,
    pub user_id: Uuid,
    pub message: String,
    pub remind_at: OffsetDateTime,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<ReminderRow> for Reminder {
    type Error = Error;

    fn try_from(row: ReminderRow) -> Result<Self, Error> {
        let status = match row.status.as_str() {
            "scheduled" => ReminderStatus::Scheduled,
            "seen" => ReminderStatus::Seen,
            other => {
                return Err(Error::Database(format!(
                    "reminder {}: bad status '{other}'",
                    row.id
                )))
            }
        };
        Ok(Reminder {
            id: row.id,
            work_item_id: row.work_item_id,
            user_id: row.user_id,
            message: row.message,
            remind_at: row.remind_at,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ContactRow {
    pub id: Uuid,
    pub ngo_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            ngo_id: row.ngo_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            role: row.role,
            created_at: row.created_at,
        }
    }
}
