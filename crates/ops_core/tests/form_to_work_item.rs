//! End-to-end scenario: an external partner submits a "Document Request"
//! form and the plan it yields is exactly what the submission pipeline would
//! execute.

use ops_core::mapping::{TemplateMapping, WorkItemMapping};
use ops_core::models::{FieldDef, FieldType, FormTemplate};
use ops_core::status::{Module, Priority};
use ops_core::{build_work_item_plan, WorkItemPlan};
use serde_json::json;
use time::macros::{date, datetime};
use uuid::Uuid;

fn document_request_template() -> FormTemplate {
    let mapping: TemplateMapping = serde_json::from_value(json!({
        "work_item": {
            "field_map": { "item_type": "documentType" },
            "defaults": { "priority": "medium" }
        }
    }))
    .unwrap();

    FormTemplate {
        id: Uuid::new_v4(),
        name: "Document Request".to_string(),
        module: Module::Compliance,
        schema: vec![
            FieldDef {
                name: "documentType".to_string(),
                field_type: FieldType::Select,
                label: "Document type".to_string(),
                required: true,
                options: vec!["Bank statement".to_string(), "Board minutes".to_string()],
            },
            FieldDef {
                name: "due_date".to_string(),
                field_type: FieldType::Date,
                label: "Needed by".to_string(),
                required: false,
                options: vec![],
            },
        ],
        mapping,
        created_at: datetime!(2024-11-01 00:00 UTC),
        updated_at: datetime!(2024-11-01 00:00 UTC),
    }
}

#[test]
fn document_request_submission_plans_a_create() {
    let template = document_request_template();
    let ngo_id = Uuid::new_v4();
    let payload = json!({
        "documentType": "Bank statement",
        "due_date": "2025-01-01"
    });

    let plan = build_work_item_plan(&template, payload.as_object().unwrap(), Some(ngo_id));

    let WorkItemPlan::Create(draft) = plan else {
        panic!("expected a create plan, got {plan:?}");
    };

    // No title/summary/name in the payload, so the template name carries.
    assert_eq!(draft.title, "Document Request");
    assert_eq!(draft.module, Module::Compliance);
    assert_eq!(draft.due_date, Some(date!(2025 - 01 - 01)));
    assert_eq!(draft.item_type.as_deref(), Some("Bank statement"));
    assert_eq!(draft.priority, Some(Priority::Medium));
    assert_eq!(draft.ngo_id, Some(ngo_id));
}

#[test]
fn resubmission_with_item_reference_plans_an_update() {
    let mut template = document_request_template();
    template.mapping.work_item = Some(WorkItemMapping {
        id_field: Some("request_ref".to_string()),
        ..template.mapping.work_item.take().unwrap()
    });

    let existing = Uuid::new_v4();
    let payload = json!({
        "request_ref": existing.to_string(),
        "documentType": "Board minutes"
    });

    let plan = build_work_item_plan(&template, payload.as_object().unwrap(), None);

    let WorkItemPlan::Update { work_item_id, patch } = plan else {
        panic!("expected an update plan, got {plan:?}");
    };
    assert_eq!(work_item_id, existing);
    assert_eq!(patch.item_type.as_deref(), Some("Board minutes"));
    // Nothing in the payload touches the title on update.
    assert_eq!(patch.title, None);
}

#[test]
fn identical_inputs_yield_identical_plans() {
    let template = document_request_template();
    let payload = json!({"documentType": "Bank statement", "due_date": "2025-01-01"});
    let body = payload.as_object().unwrap();

    let first = build_work_item_plan(&template, body, None);
    let second = build_work_item_plan(&template, body, None);
    assert_eq!(first, second);
}
