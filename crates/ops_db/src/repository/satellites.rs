//! Satellite entities keyed by work_item_id/ngo_id. Append-only except the
//! reminder scheduled -> seen transition.

use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use ops_core::models::{AuditEntry, Comment, Contact, DocumentRecord, Reminder};

use crate::error::{Error, Result};
use crate::models::{AuditRow, CommentRow, ContactRow, DocumentRow, ReminderRow};

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub id: Uuid,
    pub work_item_id: Option<Uuid>,
    pub ngo_id: Option<Uuid>,
    pub title: String,
    pub path: String,
    pub checksum: Option<String>,
    pub uploaded_by_user_id: Option<Uuid>,
}

pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, doc: &NewDocument) -> Result<DocumentRecord> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents
                (id, work_item_id, ngo_id, title, path, checksum, uploaded_by_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, work_item_id, ngo_id, title, path, checksum, uploaded_by_user_id, created_at
            "#,
        )
        .bind(doc.id)
        .bind(doc.work_item_id)
        .bind(doc.ngo_id)
        .bind(&doc.title)
        .bind(&doc.path)
        .bind(&doc.checksum)
        .bind(doc.uploaded_by_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list_for_work_item(&self, work_item_id: Uuid) -> Result<Vec<DocumentRecord>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, work_item_id, ngo_id, title, path, checksum, uploaded_by_user_id, created_at \
             FROM documents WHERE work_item_id = $1 ORDER BY created_at DESC",
        )
        .bind(work_item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        work_item_id: Uuid,
        author_user_id: Option<Uuid>,
        body: &str,
    ) -> Result<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (id, work_item_id, author_user_id, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, work_item_id, author_user_id, body, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(work_item_id)
        .bind(author_user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list_for_work_item(&self, work_item_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, work_item_id, author_user_id, body, created_at \
             FROM comments WHERE work_item_id = $1 ORDER BY created_at ASC",
        )
        .bind(work_item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Written alongside every mutating operation; never updated or deleted.
    pub async fn record(
        &self,
        entity: &str,
        entity_id: Uuid,
        action: &str,
        actor_user_id: Option<Uuid>,
        detail: Option<String>,
    ) -> Result<AuditEntry> {
        let row = sqlx::query_as::<_, AuditRow>(
            r#"
            INSERT INTO audit_log (id, entity, entity_id, action, actor_user_id, detail)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, entity, entity_id, action, actor_user_id, detail, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entity)
        .bind(entity_id)
        .bind(action)
        .bind(actor_user_id)
        .bind(detail)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list_for_entity(&self, entity: &str, entity_id: Uuid) -> Result<Vec<AuditEntry>> {
        let rows = sqlx::query_as::<_, AuditRow>(
            "SELECT id, entity, entity_id, action, actor_user_id, detail, created_at \
             FROM audit_log WHERE entity = $1 AND entity_id = $2 ORDER BY created_at ASC",
        )
        .bind(entity)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn schedule(
        &self,
        work_item_id: Option<Uuid>,
        user_id: Uuid,
        message: &str,
        remind_at: OffsetDateTime,
    ) -> Result<Reminder> {
        let row = sqlx::query_as::<_, ReminderRow>(
            r#"
            INSERT INTO reminders (id, work_item_id, user_id, message, remind_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, work_item_id, user_id, message, remind_at, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(work_item_id)
        .bind(user_id)
        .bind(message)
        .bind(remind_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// The one mutable satellite transition: scheduled -> seen.
    pub async fn mark_seen(&self, id: Uuid) -> Result<Reminder> {
        let row = sqlx::query_as::<_, ReminderRow>(
            r#"
            UPDATE reminders SET status = 'seen'
            WHERE id = $1
            RETURNING id, work_item_id, user_id, message, remind_at, status, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("reminder {id}")))?;

        row.try_into()
    }

    pub async fn list_due_for_user(
        &self,
        user_id: Uuid,
        now: OffsetDateTime,
    ) -> Result<Vec<Reminder>> {
        let rows = sqlx::query_as::<_, ReminderRow>(
            "SELECT id, work_item_id, user_id, message, remind_at, status, created_at \
             FROM reminders WHERE user_id = $1 AND status = 'scheduled' AND remind_at <= $2 \
             ORDER BY remind_at ASC",
        )
        .bind(user_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        ngo_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        role: Option<&str>,
    ) -> Result<Contact> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contacts (id, ngo_id, name, email, phone, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, ngo_id, name, email, phone, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ngo_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list_for_ngo(&self, ngo_id: Uuid) -> Result<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT id, ngo_id, name, email, phone, role, created_at \
             FROM contacts WHERE ngo_id = $1 ORDER BY name ASC",
        )
        .bind(ngo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
