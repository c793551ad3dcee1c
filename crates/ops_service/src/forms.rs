use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use ops_core::mapping::{TemplateMapping, WorkItemDraft};
use ops_core::models::{FieldDef, FormSubmission, FormTemplate, SubmissionStatus, WorkItem};
use ops_core::status::{Priority, WorkItemStatus};
use ops_core::validation::{standard_template_validator, Severity};
use ops_core::{build_work_item_plan, WorkItemPlan};
use ops_db::error::{Error, Result};
use ops_db::repository::{
    AuditRepository, FormRepository, NewFormTemplate, NewSubmission, NewWorkItem,
    WorkItemRepository,
};

use crate::OpsService;

#[derive(Debug)]
pub struct SaveTemplateParams {
    pub name: String,
    pub module: ops_core::status::Module,
    pub schema: Vec<FieldDef>,
    pub mapping: TemplateMapping,
}

#[derive(Debug, Serialize)]
pub struct SubmitFormOutcome {
    pub submission: FormSubmission,
    /// Present when the mapping engine created or updated a work item.
    pub work_item: Option<WorkItem>,
}

impl OpsService {
    /// Templates are validated at save time; a mapping misconfiguration is
    /// rejected here instead of surfacing at submission time.
    pub async fn save_template(
        &self,
        params: SaveTemplateParams,
        actor: Option<Uuid>,
    ) -> Result<FormTemplate> {
        let now = OffsetDateTime::now_utc();
        let candidate = FormTemplate {
            id: Uuid::new_v4(),
            name: params.name,
            module: params.module,
            schema: params.schema,
            mapping: params.mapping,
            created_at: now,
            updated_at: now,
        };

        let issues = standard_template_validator().run(&candidate);
        let mut blocking = Vec::new();
        for issue in issues {
            match issue.severity {
                Severity::High => blocking.push(format!("{}: {}", issue.code, issue.message)),
                Severity::Warning => {
                    tracing::warn!(template = %candidate.name, code = %issue.code, "{}", issue.message)
                }
            }
        }
        if !blocking.is_empty() {
            return Err(Error::Validation(blocking.join("; ")));
        }

        let template = FormRepository::new(self.pool.clone())
            .insert_template(&NewFormTemplate {
                id: candidate.id,
                name: candidate.name,
                module: candidate.module,
                schema: candidate.schema,
                mapping: candidate.mapping,
            })
            .await?;

        AuditRepository::new(self.pool.clone())
            .record("form_template", template.id, "created", actor, None)
            .await?;

        Ok(template)
    }

    pub async fn get_template(&self, id: Uuid) -> Result<FormTemplate> {
        FormRepository::new(self.pool.clone()).fetch_template(id).await
    }

    pub async fn list_templates(&self) -> Result<Vec<FormTemplate>> {
        FormRepository::new(self.pool.clone()).list_templates().await
    }

    pub async fn get_submission(&self, id: Uuid) -> Result<FormSubmission> {
        FormRepository::new(self.pool.clone()).fetch_submission(id).await
    }

    pub async fn list_submissions(&self, template_id: Uuid) -> Result<Vec<FormSubmission>> {
        FormRepository::new(self.pool.clone())
            .list_submissions_for_template(template_id)
            .await
    }

    /// Runs the mapping engine over a submitted payload, executes the plan,
    /// then persists the submission linked to whatever work item resulted.
    pub async fn submit_form(
        &self,
        template_id: Uuid,
        payload: Map<String, Value>,
        ngo_id: Option<Uuid>,
        actor: Option<Uuid>,
    ) -> Result<SubmitFormOutcome> {
        let forms = FormRepository::new(self.pool.clone());
        let items = WorkItemRepository::new(self.pool.clone());
        let audit = AuditRepository::new(self.pool.clone());

        let template = forms.fetch_template(template_id).await?;
        let plan = build_work_item_plan(&template, &payload, ngo_id);

        let work_item = match plan {
            WorkItemPlan::Skip => None,
            WorkItemPlan::Create(draft) => {
                let item = items.insert(&new_item_from_draft(draft, actor)).await?;
                audit
                    .record("work_item", item.id, "created_from_form", actor, None)
                    .await?;
                Some(item)
            }
            WorkItemPlan::Update {
                work_item_id,
                patch,
            } => {
                let item = items.update(work_item_id, &patch).await?;
                audit
                    .record("work_item", item.id, "updated_from_form", actor, None)
                    .await?;
                Some(item)
            }
        };

        let submission = forms
            .insert_submission(&NewSubmission {
                id: Uuid::new_v4(),
                form_template_id: template.id,
                ngo_id,
                work_item_id: work_item.as_ref().map(|item| item.id),
                payload,
                status: SubmissionStatus::Submitted,
                submitted_at: Some(OffsetDateTime::now_utc()),
            })
            .await?;

        audit
            .record("form_submission", submission.id, "submitted", actor, None)
            .await?;

        Ok(SubmitFormOutcome {
            submission,
            work_item,
        })
    }
}

/// Items born from a form start at not_started; evidence/approval flags are
/// a staff decision made afterwards, not part of the mapping vocabulary.
fn new_item_from_draft(draft: WorkItemDraft, actor: Option<Uuid>) -> NewWorkItem {
    NewWorkItem {
        id: Uuid::new_v4(),
        title: draft.title,
        description: draft.description,
        module: draft.module,
        status: WorkItemStatus::NotStarted,
        priority: draft.priority.unwrap_or(Priority::Medium),
        item_type: draft.item_type,
        ngo_id: draft.ngo_id,
        department_id: draft.department_id,
        owner_user_id: draft.owner_user_id,
        created_by_user_id: actor,
        approver_user_id: None,
        due_date: draft.due_date,
        evidence_required: false,
        approval_required: false,
        external_visible: false,
    }
}
