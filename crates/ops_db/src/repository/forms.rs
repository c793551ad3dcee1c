use serde_json::{Map, Value};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use ops_core::mapping::TemplateMapping;
use ops_core::models::{FieldDef, FormSubmission, FormTemplate, SubmissionStatus};
use ops_core::status::Module;

use crate::error::{Error, Result};
use crate::models::{FormSubmissionRow, FormTemplateRow};

const TEMPLATE_COLUMNS: &str = "id, name, module, schema_json, mapping_json, created_at, updated_at";
const SUBMISSION_COLUMNS: &str =
    "id, form_template_id, ngo_id, work_item_id, payload_json, status, submitted_at, created_at";

#[derive(Debug, Clone)]
pub struct NewFormTemplate {
    pub id: Uuid,
    pub name: String,
    pub module: Module,
    pub schema: Vec<FieldDef>,
    pub mapping: TemplateMapping,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub id: Uuid,
    pub form_template_id: Uuid,
    pub ngo_id: Option<Uuid>,
    pub work_item_id: Option<Uuid>,
    pub payload: Map<String, Value>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<OffsetDateTime>,
}

pub struct FormRepository {
    pool: PgPool,
}

impl FormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_template(&self, template: &NewFormTemplate) -> Result<FormTemplate> {
        let schema_json = serde_json::to_value(&template.schema)
            .map_err(|e| Error::Validation(format!("unserializable schema: {e}")))?;
        let mapping_json = serde_json::to_value(&template.mapping)
            .map_err(|e| Error::Validation(format!("unserializable mapping: {e}")))?;

        let row = sqlx::query_as::<_, FormTemplateRow>(&format!(
            r#"
            INSERT INTO form_templates (id, name, module, schema_json, mapping_json)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TEMPLATE_COLUMNS}
            "#
        ))
        .bind(template.id)
        .bind(&template.name)
        .bind(template.module.as_str())
        .bind(schema_json)
        .bind(mapping_json)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn fetch_template(&self, id: Uuid) -> Result<FormTemplate> {
        let row = sqlx::query_as::<_, FormTemplateRow>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM form_templates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("form template {id}")))?;

        row.try_into()
    }

    pub async fn list_templates(&self) -> Result<Vec<FormTemplate>> {
        let rows = sqlx::query_as::<_, FormTemplateRow>(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM form_templates ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    pub async fn insert_submission(&self, submission: &NewSubmission) -> Result<FormSubmission> {
        let row = sqlx::query_as::<_, FormSubmissionRow>(&format!(
            r#"
            INSERT INTO form_submissions
                (id, form_template_id, ngo_id, work_item_id, payload_json, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(submission.id)
        .bind(submission.form_template_id)
        .bind(submission.ngo_id)
        .bind(submission.work_item_id)
        .bind(Value::Object(submission.payload.clone()))
        .bind(submission.status.as_str())
        .bind(submission.submitted_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn fetch_submission(&self, id: Uuid) -> Result<FormSubmission> {
        let row = sqlx::query_as::<_, FormSubmissionRow>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM form_submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("form submission {id}")))?;

        row.try_into()
    }

    pub async fn list_submissions_for_template(
        &self,
        form_template_id: Uuid,
    ) -> Result<Vec<FormSubmission>> {
        let rows = sqlx::query_as::<_, FormSubmissionRow>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM form_submissions \
             WHERE form_template_id = $1 ORDER BY created_at DESC"
        ))
        .bind(form_template_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
