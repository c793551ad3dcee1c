use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::status::{EvidenceStatus, Module, Priority, WorkItemStatus};

/// A trackable task/request unit routed through status, approval and
/// evidence workflows. Never hard-deleted; cancellation is a status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
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
    pub completed_at: Option<OffsetDateTime>,
    pub evidence_required: bool,
    pub evidence_status: EvidenceStatus,
    pub approval_required: bool,
    pub external_visible: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// How many days ahead "due soon" looks.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

impl WorkItem {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Open with a due date strictly in the past.
    pub fn is_overdue(&self, today: Date) -> bool {
        self.is_open() && self.due_date.is_some_and(|due| due < today)
    }

    /// Open and due within the next seven days (today inclusive).
    pub fn is_due_soon(&self, today: Date) -> bool {
        self.is_open()
            && self.due_date.is_some_and(|due| {
                due >= today && due <= today + Duration::days(DUE_SOON_WINDOW_DAYS)
            })
    }

    /// Status-independent ownership check.
    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.owner_user_id == Some(user_id)
    }

    /// An item sits in a user's approval queue when it needs their sign-off:
    /// either the approval itself, or evidence that has been uploaded and is
    /// awaiting their review.
    pub fn is_waiting_on(&self, user_id: Uuid) -> bool {
        if self.approver_user_id != Some(user_id) {
            return false;
        }
        let approval_pending = self.approval_required && self.is_open();
        let evidence_pending = self.evidence_required
            && matches!(
                self.evidence_status,
                EvidenceStatus::Uploaded | EvidenceStatus::UnderReview
            );
        approval_pending || evidence_pending
    }

    /// Missing-evidence flag used by the NGO health snapshot.
    pub fn is_missing_evidence(&self) -> bool {
        self.is_open() && self.evidence_required && self.evidence_status == EvidenceStatus::Missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn item() -> WorkItem {
        WorkItem {
            id: Uuid::new_v4(),
            title: "Renew insurance".to_string(),
            description: None,
            module: Module::Operations,
            status: WorkItemStatus::InProgress,
            priority: Priority::Medium,
            item_type: None,
            ngo_id: None,
            department_id: None,
            owner_user_id: None,
            created_by_user_id: None,
            approver_user_id: None,
            due_date: None,
            completed_at: None,
            evidence_required: false,
            evidence_status: EvidenceStatus::Missing,
            approval_required: false,
            external_visible: false,
            created_at: datetime!(2025-06-01 09:00 UTC),
            updated_at: datetime!(2025-06-01 09:00 UTC),
        }
    }

    #[test]
    fn overdue_requires_open_status() {
        let today = date!(2025 - 06 - 10);
        let mut it = item();
        it.due_date = Some(date!(2025 - 06 - 09));
        assert!(it.is_overdue(today));

        it.status = WorkItemStatus::Complete;
        assert!(!it.is_overdue(today));
    }

    #[test]
    fn due_soon_window_is_seven_days() {
        let today = date!(2025 - 06 - 10);
        let mut it = item();

        it.due_date = Some(date!(2025 - 06 - 17));
        assert!(it.is_due_soon(today));

        it.due_date = Some(date!(2025 - 06 - 18));
        assert!(!it.is_due_soon(today));

        // A past due date is overdue, not due soon.
        it.due_date = Some(date!(2025 - 06 - 09));
        assert!(!it.is_due_soon(today));
    }

    #[test]
    fn waiting_on_covers_approvals_and_uploaded_evidence() {
        let approver = Uuid::new_v4();
        let mut it = item();
        it.approver_user_id = Some(approver);

        // Neither flag set: nothing to wait on.
        assert!(!it.is_waiting_on(approver));

        it.approval_required = true;
        assert!(it.is_waiting_on(approver));
        assert!(!it.is_waiting_on(Uuid::new_v4()));

        // Closed items drop out of the approval queue...
        it.status = WorkItemStatus::Canceled;
        assert!(!it.is_waiting_on(approver));

        // ...unless evidence review is still pending.
        it.approval_required = false;
        it.status = WorkItemStatus::InProgress;
        it.evidence_required = true;
        it.evidence_status = EvidenceStatus::Uploaded;
        assert!(it.is_waiting_on(approver));

        it.evidence_status = EvidenceStatus::Approved;
        assert!(!it.is_waiting_on(approver));
    }

    #[test]
    fn assignment_ignores_status() {
        let owner = Uuid::new_v4();
        let mut it = item();
        it.owner_user_id = Some(owner);
        it.status = WorkItemStatus::Canceled;
        assert!(it.is_assigned_to(owner));
    }
}
