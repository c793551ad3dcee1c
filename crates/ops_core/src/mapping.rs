//! Translates a submitted form payload plus a template's declarative mapping
//! into a plan to create or update a work item. Pure, no I/O; the caller owns
//! every database write.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;
use uuid::Uuid;

use crate::models::FormTemplate;
use crate::status::{Module, Priority};

/// Work-item columns a mapping may target.
pub const TARGET_FIELDS: &[&str] = &[
    "title",
    "description",
    "department_id",
    "owner_user_id",
    "due_date",
    "item_type",
    "priority",
];

const DATE_FORMAT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingAction {
    Create,
    Update,
    /// Leave work items alone entirely. "skip" is accepted as a synonym.
    #[serde(alias = "skip")]
    None,
}

/// Top-level mapping document stored on a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item: Option<WorkItemMapping>,
}

/// Declarative field-to-work-item mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkItemMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<MappingAction>,
    /// Payload key holding the id of the work item to update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_field: Option<String>,
    /// Literal target id embedded in the template itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_item_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<Module>,
    /// target column -> payload key
    #[serde(default)]
    pub field_map: BTreeMap<String, String>,
    /// target column -> static value
    #[serde(default)]
    pub defaults: Map<String, Value>,
}

/// Field values for a work item the caller should create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemDraft {
    pub title: String,
    pub description: Option<String>,
    pub module: Module,
    pub priority: Option<Priority>,
    pub item_type: Option<String>,
    pub ngo_id: Option<Uuid>,
    pub department_id: Option<Uuid>,
    pub owner_user_id: Option<Uuid>,
    pub due_date: Option<Date>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub module: Option<Module>,
    pub priority: Option<Priority>,
    pub item_type: Option<String>,
    pub department_id: Option<Uuid>,
    pub owner_user_id: Option<Uuid>,
    pub due_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WorkItemPlan {
    Skip,
    Create(WorkItemDraft),
    Update {
        work_item_id: Uuid,
        patch: WorkItemPatch,
    },
}

/// Decide whether a submission creates a work item, updates one, or leaves
/// work items alone, and produce the field values for that operation.
/// Deterministic: identical inputs always yield the identical plan.
pub fn build_work_item_plan(
    template: &FormTemplate,
    payload: &Map<String, Value>,
    ngo_id: Option<Uuid>,
) -> WorkItemPlan {
    let mapping = template.mapping.work_item.clone().unwrap_or_default();

    if mapping.action == Some(MappingAction::None) {
        return WorkItemPlan::Skip;
    }

    // Explicit action wins; otherwise update iff an id resolved. An update
    // with no resolvable id is a misconfigured template and degrades to
    // create rather than failing the submission.
    let update_target = match mapping.action {
        Some(MappingAction::Create) => None,
        _ => resolve_target_id(&mapping, payload),
    };

    let module = mapping.module.unwrap_or(template.module);
    let title = resolve(&mapping, payload, "title").and_then(value_as_string);
    let description = resolve(&mapping, payload, "description").and_then(value_as_string);
    let priority = resolve(&mapping, payload, "priority")
        .and_then(value_as_string)
        .and_then(|s| s.to_lowercase().parse().ok());
    let item_type = resolve(&mapping, payload, "item_type").and_then(value_as_string);
    let department_id =
        resolve(&mapping, payload, "department_id").and_then(|v| value_as_uuid(&v));
    let owner_user_id =
        resolve(&mapping, payload, "owner_user_id").and_then(|v| value_as_uuid(&v));
    let due_date = resolve(&mapping, payload, "due_date").and_then(value_as_date);

    match update_target {
        Some(work_item_id) => WorkItemPlan::Update {
            work_item_id,
            patch: WorkItemPatch {
                title,
                description,
                module: Some(module),
                priority,
                item_type,
                department_id,
                owner_user_id,
                due_date,
            },
        },
        None => WorkItemPlan::Create(WorkItemDraft {
            // Blank titles fall back to the template's display name.
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| template.name.clone()),
            description,
            module,
            priority,
            item_type,
            ngo_id,
            department_id,
            owner_user_id,
            due_date,
        }),
    }
}

/// Target id precedence: payload at the declared id_field, then the payload's
/// literal `work_item_id` key, then an id embedded in the mapping config.
fn resolve_target_id(mapping: &WorkItemMapping, payload: &Map<String, Value>) -> Option<Uuid> {
    mapping
        .id_field
        .as_deref()
        .and_then(|key| payload.get(key))
        .and_then(value_as_uuid)
        .or_else(|| payload.get("work_item_id").and_then(value_as_uuid))
        .or(mapping.work_item_id)
}

/// Payload key names tried in order when the mapping has no explicit entry
/// for a target.
fn fallback_keys(target: &str) -> &'static [&'static str] {
    match target {
        "title" => &["title", "summary", "name"],
        "description" => &["description", "details", "notes"],
        "department_id" => &["department_id", "department"],
        "owner_user_id" => &["owner_user_id", "owner"],
        "due_date" => &["due_date", "deadline"],
        "item_type" => &["type", "item_type"],
        "priority" => &["priority"],
        _ => &[],
    }
}

/// Value precedence: explicit field_map entry, then fallback payload keys in
/// order, then a static default. First present non-null value wins.
fn resolve(
    mapping: &WorkItemMapping,
    payload: &Map<String, Value>,
    target: &str,
) -> Option<Value> {
    if let Some(key) = mapping.field_map.get(target) {
        if let Some(value) = present(payload.get(key)) {
            return Some(value.clone());
        }
    }
    for key in fallback_keys(target) {
        if let Some(value) = present(payload.get(*key)) {
            return Some(value.clone());
        }
    }
    present(mapping.defaults.get(target)).cloned()
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn value_as_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_uuid(value: &Value) -> Option<Uuid> {
    value.as_str().and_then(|s| Uuid::parse_str(s).ok())
}

fn value_as_date(value: Value) -> Option<Date> {
    value
        .as_str()
        .and_then(|s| Date::parse(s, DATE_FORMAT).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::{date, datetime};

    fn template(mapping: TemplateMapping) -> FormTemplate {
        FormTemplate {
            id: Uuid::new_v4(),
            name: "Monthly NGO Check-in".to_string(),
            module: Module::Operations,
            schema: vec![],
            mapping,
            created_at: datetime!(2025-01-01 00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn action_none_skips_regardless_of_payload() {
        let tpl = template(TemplateMapping {
            work_item: Some(WorkItemMapping {
                action: Some(MappingAction::None),
                ..Default::default()
            }),
        });
        let body = payload(json!({"title": "anything", "work_item_id": Uuid::new_v4()}));
        assert_eq!(build_work_item_plan(&tpl, &body, None), WorkItemPlan::Skip);
    }

    #[test]
    fn skip_is_an_accepted_synonym_for_none() {
        let mapping: TemplateMapping =
            serde_json::from_value(json!({"work_item": {"action": "skip"}})).unwrap();
        let tpl = template(mapping);
        assert_eq!(
            build_work_item_plan(&tpl, &Map::new(), None),
            WorkItemPlan::Skip
        );
    }

    #[test]
    fn id_field_value_forces_update() {
        let target = Uuid::new_v4();
        let tpl = template(TemplateMapping {
            work_item: Some(WorkItemMapping {
                id_field: Some("item_ref".to_string()),
                ..Default::default()
            }),
        });
        let body = payload(json!({"item_ref": target.to_string(), "title": "Follow up"}));

        match build_work_item_plan(&tpl, &body, None) {
            WorkItemPlan::Update { work_item_id, patch } => {
                assert_eq!(work_item_id, target);
                assert_eq!(patch.title.as_deref(), Some("Follow up"));
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn explicit_create_overrides_a_resolved_id() {
        let tpl = template(TemplateMapping {
            work_item: Some(WorkItemMapping {
                action: Some(MappingAction::Create),
                ..Default::default()
            }),
        });
        let body = payload(json!({"work_item_id": Uuid::new_v4().to_string(), "title": "New"}));
        assert!(matches!(
            build_work_item_plan(&tpl, &body, None),
            WorkItemPlan::Create(_)
        ));
    }

    #[test]
    fn update_without_resolvable_id_falls_back_to_create() {
        let tpl = template(TemplateMapping {
            work_item: Some(WorkItemMapping {
                action: Some(MappingAction::Update),
                ..Default::default()
            }),
        });
        assert!(matches!(
            build_work_item_plan(&tpl, &Map::new(), None),
            WorkItemPlan::Create(_)
        ));
    }

    #[test]
    fn title_falls_back_to_template_name() {
        let tpl = template(TemplateMapping::default());
        let body = payload(json!({"documentType": "Bank statement"}));
        match build_work_item_plan(&tpl, &body, None) {
            WorkItemPlan::Create(draft) => {
                assert_eq!(draft.title, "Monthly NGO Check-in");
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn blank_mapped_title_also_falls_back() {
        let tpl = template(TemplateMapping::default());
        let body = payload(json!({"title": "   "}));
        match build_work_item_plan(&tpl, &body, None) {
            WorkItemPlan::Create(draft) => assert_eq!(draft.title, "Monthly NGO Check-in"),
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn explicit_field_map_wins_over_same_named_fallback_key() {
        let mut field_map = BTreeMap::new();
        field_map.insert("title".to_string(), "subject".to_string());
        let tpl = template(TemplateMapping {
            work_item: Some(WorkItemMapping {
                field_map,
                ..Default::default()
            }),
        });
        let body = payload(json!({"subject": "A", "title": "B"}));
        match build_work_item_plan(&tpl, &body, None) {
            WorkItemPlan::Create(draft) => assert_eq!(draft.title, "A"),
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn defaults_apply_when_payload_has_nothing() {
        let mut defaults = Map::new();
        defaults.insert("priority".to_string(), json!("high"));
        defaults.insert("description".to_string(), json!("Filed from portal"));
        let tpl = template(TemplateMapping {
            work_item: Some(WorkItemMapping {
                defaults,
                ..Default::default()
            }),
        });
        match build_work_item_plan(&tpl, &Map::new(), None) {
            WorkItemPlan::Create(draft) => {
                assert_eq!(draft.priority, Some(Priority::High));
                assert_eq!(draft.description.as_deref(), Some("Filed from portal"));
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn module_override_beats_template_module() {
        let tpl = template(TemplateMapping {
            work_item: Some(WorkItemMapping {
                module: Some(Module::Finance),
                ..Default::default()
            }),
        });
        match build_work_item_plan(&tpl, &Map::new(), None) {
            WorkItemPlan::Create(draft) => assert_eq!(draft.module, Module::Finance),
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn due_date_and_ngo_flow_through() {
        let ngo = Uuid::new_v4();
        let tpl = template(TemplateMapping::default());
        let body = payload(json!({"due_date": "2025-01-01"}));
        match build_work_item_plan(&tpl, &body, Some(ngo)) {
            WorkItemPlan::Create(draft) => {
                assert_eq!(draft.due_date, Some(date!(2025 - 01 - 01)));
                assert_eq!(draft.ngo_id, Some(ngo));
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn garbage_values_become_absent_not_errors() {
        let tpl = template(TemplateMapping::default());
        let body = payload(json!({
            "due_date": "next tuesday",
            "priority": "urgent!!",
            "owner_user_id": "not-a-uuid"
        }));
        match build_work_item_plan(&tpl, &body, None) {
            WorkItemPlan::Create(draft) => {
                assert_eq!(draft.due_date, None);
                assert_eq!(draft.priority, None);
                assert_eq!(draft.owner_user_id, None);
            }
            other => panic!("expected create, got {other:?}"),
        }
    }
}
