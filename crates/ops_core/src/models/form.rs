use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::mapping::TemplateMapping;
use crate::status::Module;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    Select,
    Checkbox,
    File,
}

/// One ordered field definition inside a template's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Schema and mapping are immutable once submissions exist against the
/// template; there is no versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormTemplate {
    pub id: Uuid,
    pub name: String,
    pub module: Module,
    pub schema: Vec<FieldDef>,
    pub mapping: TemplateMapping,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl FormTemplate {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.schema.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Draft,
    Submitted,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: Uuid,
    pub form_template_id: Uuid,
    pub ngo_id: Option<Uuid>,
    /// Set by the mapping engine's caller once the plan has been executed.
    pub work_item_id: Option<Uuid>,
    pub payload: Map<String, Value>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}
