use time::OffsetDateTime;
use uuid::Uuid;

use ops_core::models::{AuditEntry, Comment, Contact, Reminder};
use ops_db::error::Result;
use ops_db::repository::{AuditRepository, CommentRepository, ContactRepository, ReminderRepository};

use crate::OpsService;

impl OpsService {
    pub async fn add_comment(
        &self,
        work_item_id: Uuid,
        author: Option<Uuid>,
        body: &str,
    ) -> Result<Comment> {
        CommentRepository::new(self.pool.clone())
            .insert(work_item_id, author, body)
            .await
    }

    pub async fn list_comments(&self, work_item_id: Uuid) -> Result<Vec<Comment>> {
        CommentRepository::new(self.pool.clone())
            .list_for_work_item(work_item_id)
            .await
    }

    pub async fn schedule_reminder(
        &self,
        work_item_id: Option<Uuid>,
        user_id: Uuid,
        message: &str,
        remind_at: OffsetDateTime,
    ) -> Result<Reminder> {
        ReminderRepository::new(self.pool.clone())
            .schedule(work_item_id, user_id, message, remind_at)
            .await
    }

    pub async fn mark_reminder_seen(&self, id: Uuid) -> Result<Reminder> {
        ReminderRepository::new(self.pool.clone()).mark_seen(id).await
    }

    pub async fn due_reminders(&self, user_id: Uuid) -> Result<Vec<Reminder>> {
        ReminderRepository::new(self.pool.clone())
            .list_due_for_user(user_id, OffsetDateTime::now_utc())
            .await
    }

    pub async fn add_contact(
        &self,
        ngo_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        role: Option<&str>,
    ) -> Result<Contact> {
        ContactRepository::new(self.pool.clone())
            .insert(ngo_id, name, email, phone, role)
            .await
    }

    pub async fn list_contacts(&self, ngo_id: Uuid) -> Result<Vec<Contact>> {
        ContactRepository::new(self.pool.clone()).list_for_ngo(ngo_id).await
    }

    pub async fn audit_trail(&self, entity: &str, entity_id: Uuid) -> Result<Vec<AuditEntry>> {
        AuditRepository::new(self.pool.clone())
            .list_for_entity(entity, entity_id)
            .await
    }
}
