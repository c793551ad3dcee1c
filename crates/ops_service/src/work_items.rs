use serde::Serialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use ops_core::models::WorkItem;
use ops_core::status::{EvidenceStatus, Module, Priority, WorkItemStatus};
use ops_db::error::{Error, Result};
use ops_db::repository::{AuditRepository, NewWorkItem, WorkItemRepository};

use crate::OpsService;

#[derive(Debug)]
pub struct CreateWorkItemParams {
    pub title: String,
    pub description: Option<String>,
    pub module: Module,
    pub priority: Option<Priority>,
    pub item_type: Option<String>,
    pub ngo_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub owner_user_id: Option<Uuid>,
    pub approver_user_id: Option<Uuid>,
    pub due_date: Option<Date>,
    pub evidence_required: bool,
    pub approval_required: bool,
    pub external_visible: bool,
}

/// The "My Queue" view: items a user owns plus items waiting on their
/// sign-off.
#[derive(Debug, Serialize)]
pub struct MyQueue {
    pub assigned: Vec<WorkItem>,
    pub waiting_on_me: Vec<WorkItem>,
}

impl OpsService {
    pub async fn create_work_item(
        &self,
        params: CreateWorkItemParams,
        actor: Option<Uuid>,
    ) -> Result<WorkItem> {
        let repo = WorkItemRepository::new(self.pool.clone());
        let item = repo
            .insert(&NewWorkItem {
                id: Uuid::new_v4(),
                title: params.title,
                description: params.description,
                module: params.module,
                status: WorkItemStatus::NotStarted,
                priority: params.priority.unwrap_or(Priority::Medium),
                item_type: params.item_type,
                ngo_id: params.ngo_id,
                department_id: params.department_id,
                owner_user_id: params.owner_user_id,
                created_by_user_id: actor,
                approver_user_id: params.approver_user_id,
                due_date: params.due_date,
                evidence_required: params.evidence_required,
                approval_required: params.approval_required,
                external_visible: params.external_visible,
            })
            .await?;

        AuditRepository::new(self.pool.clone())
            .record("work_item", item.id, "created", actor, None)
            .await?;

        Ok(item)
    }

    /// Status changes go through the transition table; an illegal move is a
    /// business-rule rejection, not a silent overwrite.
    pub async fn transition_status(
        &self,
        id: Uuid,
        next: WorkItemStatus,
        actor: Option<Uuid>,
    ) -> Result<WorkItem> {
        let repo = WorkItemRepository::new(self.pool.clone());
        let current = repo.fetch(id).await?;

        if !current.status.can_transition_to(next) {
            return Err(Error::BusinessRule(format!(
                "illegal status transition {} -> {}",
                current.status, next
            )));
        }

        let completed_at = (next == WorkItemStatus::Complete).then(OffsetDateTime::now_utc);
        let updated = repo.set_status(id, next, completed_at).await?;

        AuditRepository::new(self.pool.clone())
            .record(
                "work_item",
                id,
                "status_changed",
                actor,
                Some(format!("{} -> {}", current.status, next)),
            )
            .await?;

        Ok(updated)
    }

    pub async fn reassign_owner(
        &self,
        id: Uuid,
        owner_user_id: Option<Uuid>,
        actor: Option<Uuid>,
    ) -> Result<WorkItem> {
        let repo = WorkItemRepository::new(self.pool.clone());
        let updated = repo.assign_owner(id, owner_user_id).await?;

        AuditRepository::new(self.pool.clone())
            .record(
                "work_item",
                id,
                "owner_reassigned",
                actor,
                owner_user_id.map(|u| u.to_string()),
            )
            .await?;

        Ok(updated)
    }

    /// Evidence review moves independently of the main status.
    pub async fn set_evidence_status(
        &self,
        id: Uuid,
        status: EvidenceStatus,
        actor: Option<Uuid>,
    ) -> Result<WorkItem> {
        let repo = WorkItemRepository::new(self.pool.clone());
        let current = repo.fetch(id).await?;

        if !current.evidence_required {
            return Err(Error::BusinessRule(format!(
                "work item {id} does not require evidence"
            )));
        }

        let updated = repo.set_evidence_status(id, status).await?;

        AuditRepository::new(self.pool.clone())
            .record(
                "work_item",
                id,
                "evidence_status_changed",
                actor,
                Some(status.as_str().to_string()),
            )
            .await?;

        Ok(updated)
    }

    pub async fn get_work_item(&self, id: Uuid) -> Result<WorkItem> {
        WorkItemRepository::new(self.pool.clone()).fetch(id).await
    }

    pub async fn list_work_items(&self) -> Result<Vec<WorkItem>> {
        WorkItemRepository::new(self.pool.clone()).list_all().await
    }

    /// Portal listing: only externally-visible items for the NGO.
    pub async fn list_portal_work_items(&self, ngo_id: Uuid) -> Result<Vec<WorkItem>> {
        WorkItemRepository::new(self.pool.clone())
            .list_for_ngo(ngo_id, true)
            .await
    }

    pub async fn my_queue(&self, user_id: Uuid) -> Result<MyQueue> {
        let repo = WorkItemRepository::new(self.pool.clone());
        let assigned = repo.list_for_owner(user_id).await?;
        let waiting_on_me = repo
            .list_for_approver(user_id)
            .await?
            .into_iter()
            .filter(|item| item.is_waiting_on(user_id))
            .collect();

        Ok(MyQueue {
            assigned,
            waiting_on_me,
        })
    }

    /// The "Missing Items" view: open items whose required evidence has not
    /// arrived.
    pub async fn missing_items(&self) -> Result<Vec<WorkItem>> {
        let open = WorkItemRepository::new(self.pool.clone()).list_open().await?;
        Ok(open
            .into_iter()
            .filter(WorkItem::is_missing_evidence)
            .collect())
    }
}
