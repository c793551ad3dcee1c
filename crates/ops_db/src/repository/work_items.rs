use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use ops_core::mapping::WorkItemPatch;
use ops_core::models::WorkItem;
use ops_core::status::{EvidenceStatus, Module, Priority, WorkItemStatus};

use crate::error::{Error, Result};
use crate::models::WorkItemRow;

const COLUMNS: &str = "id, title, description, module, status, priority, item_type, ngo_id, \
                       department_id, owner_user_id, created_by_user_id, approver_user_id, \
                       due_date, completed_at, evidence_required, evidence_status, \
                       approval_required, external_visible, created_at, updated_at";

/// Everything needed to insert a work item row. The service layer builds this
/// from a mapping-engine draft or a direct user action.
#[derive(Debug, Clone)]
pub struct NewWorkItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub module: Module,
    pub status: WorkItemStatus,
    pub priority: Priority,
    pub item_type: Option<String>,
    pub ngo_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub owner_user_id: Option<Uuid>,
    pub created_by_user_id: Option<Uuid>,
    pub approver_user_id: Option<Uuid>,
    pub due_date: Option<Date>,
    pub evidence_required: bool,
    pub approval_required: bool,
    pub external_visible: bool,
}

pub struct WorkItemRepository {
    pool: PgPool,
}

impl WorkItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, item: &NewWorkItem) -> Result<WorkItem> {
        let row = sqlx::query_as::<_, WorkItemRow>(&format!(
            r#"
            INSERT INTO work_items
                (id, title, description, module, status, priority, item_type, ngo_id,
                 department_id, owner_user_id, created_by_user_id, approver_user_id,
                 due_date, evidence_required, approval_required, external_visible)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.module.as_str())
        .bind(item.status.as_str())
        .bind(item.priority.as_str())
        .bind(&item.item_type)
        .bind(item.ngo_id)
        .bind(item.department_id)
        .bind(item.owner_user_id)
        .bind(item.created_by_user_id)
        .bind(item.approver_user_id)
        .bind(item.due_date)
        .bind(item.evidence_required)
        .bind(item.approval_required)
        .bind(item.external_visible)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Applies a partial update; `None` fields keep their current value.
    pub async fn update(&self, id: Uuid, patch: &WorkItemPatch) -> Result<WorkItem> {
        let row = sqlx::query_as::<_, WorkItemRow>(&format!(
            r#"
            UPDATE work_items SET
                title          = COALESCE($2, title),
                description    = COALESCE($3, description),
                module         = COALESCE($4, module),
                priority       = COALESCE($5, priority),
                item_type      = COALESCE($6, item_type),
                department_id  = COALESCE($7, department_id),
                owner_user_id  = COALESCE($8, owner_user_id),
                due_date       = COALESCE($9, due_date),
                updated_at     = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.module.map(Module::as_str))
        .bind(patch.priority.map(Priority::as_str))
        .bind(&patch.item_type)
        .bind(patch.department_id)
        .bind(patch.owner_user_id)
        .bind(patch.due_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work item {id}")))?;

        row.try_into()
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: WorkItemStatus,
        completed_at: Option<OffsetDateTime>,
    ) -> Result<WorkItem> {
        let row = sqlx::query_as::<_, WorkItemRow>(&format!(
            r#"
            UPDATE work_items
            SET status = $2, completed_at = COALESCE($3, completed_at), updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work item {id}")))?;

        row.try_into()
    }

    pub async fn set_evidence_status(&self, id: Uuid, status: EvidenceStatus) -> Result<WorkItem> {
        let row = sqlx::query_as::<_, WorkItemRow>(&format!(
            r#"
            UPDATE work_items SET evidence_status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work item {id}")))?;

        row.try_into()
    }

    pub async fn assign_owner(&self, id: Uuid, owner_user_id: Option<Uuid>) -> Result<WorkItem> {
        let row = sqlx::query_as::<_, WorkItemRow>(&format!(
            r#"
            UPDATE work_items SET owner_user_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner_user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work item {id}")))?;

        row.try_into()
    }

    pub async fn fetch(&self, id: Uuid) -> Result<WorkItem> {
        let row = sqlx::query_as::<_, WorkItemRow>(&format!(
            "SELECT {COLUMNS} FROM work_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("work item {id}")))?;

        row.try_into()
    }

    pub async fn list_all(&self) -> Result<Vec<WorkItem>> {
        let rows = sqlx::query_as::<_, WorkItemRow>(&format!(
            "SELECT {COLUMNS} FROM work_items ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    pub async fn list_open(&self) -> Result<Vec<WorkItem>> {
        let rows = sqlx::query_as::<_, WorkItemRow>(&format!(
            r#"
            SELECT {COLUMNS} FROM work_items
            WHERE status NOT IN ('complete', 'canceled')
            ORDER BY due_date ASC NULLS LAST, created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    pub async fn list_for_owner(&self, owner_user_id: Uuid) -> Result<Vec<WorkItem>> {
        let rows = sqlx::query_as::<_, WorkItemRow>(&format!(
            "SELECT {COLUMNS} FROM work_items WHERE owner_user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    pub async fn list_for_approver(&self, approver_user_id: Uuid) -> Result<Vec<WorkItem>> {
        let rows = sqlx::query_as::<_, WorkItemRow>(&format!(
            "SELECT {COLUMNS} FROM work_items WHERE approver_user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(approver_user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// NGO-scoped listing; the portal surface only ever sees
    /// externally-visible items.
    pub async fn list_for_ngo(&self, ngo_id: Uuid, external_only: bool) -> Result<Vec<WorkItem>> {
        let sql = if external_only {
            format!(
                "SELECT {COLUMNS} FROM work_items \
                 WHERE ngo_id = $1 AND external_visible = TRUE ORDER BY created_at DESC"
            )
        } else {
            format!("SELECT {COLUMNS} FROM work_items WHERE ngo_id = $1 ORDER BY created_at DESC")
        };
        let rows = sqlx::query_as::<_, WorkItemRow>(&sql)
            .bind(ngo_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
