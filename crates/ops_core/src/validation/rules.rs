use std::collections::HashSet;

use crate::mapping::{MappingAction, WorkItemMapping, TARGET_FIELDS};
use crate::models::{FieldType, FormTemplate};
use crate::validation::{Severity, TemplateRule, ValidationIssue};

fn work_item_mapping(template: &FormTemplate) -> Option<&WorkItemMapping> {
    template.mapping.work_item.as_ref()
}

fn schema_has_field(template: &FormTemplate, name: &str) -> bool {
    template.schema.iter().any(|f| f.name == name)
}

// =========================================================================
// RULE: TPL-001
// "field_map targets must be known work-item columns"
// =========================================================================
pub struct RuleMapTargetsKnown;

impl TemplateRule for RuleMapTargetsKnown {
    fn rule_id(&self) -> &str {
        "TPL-001"
    }

    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Some(mapping) = work_item_mapping(template) {
            for target in mapping.field_map.keys() {
                if !TARGET_FIELDS.contains(&target.as_str()) {
                    issues.push(ValidationIssue {
                        code: self.rule_id().to_string(),
                        severity: Severity::High,
                        message: format!("field_map targets unknown work-item column '{target}'"),
                        field: Some(target.clone()),
                    });
                }
            }
        }
        issues
    }
}

// =========================================================================
// RULE: TPL-002
// "field_map source keys must exist in the template schema"
// =========================================================================
pub struct RuleMapSourcesExist;

impl TemplateRule for RuleMapSourcesExist {
    fn rule_id(&self) -> &str {
        "TPL-002"
    }

    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Some(mapping) = work_item_mapping(template) {
            for (target, source) in &mapping.field_map {
                if !schema_has_field(template, source) {
                    issues.push(ValidationIssue {
                        code: self.rule_id().to_string(),
                        severity: Severity::High,
                        message: format!(
                            "field_map for '{target}' reads payload key '{source}' which is not a schema field"
                        ),
                        field: Some(source.clone()),
                    });
                }
            }
        }
        issues
    }
}

// =========================================================================
// RULE: TPL-003
// "id_field must exist in the template schema"
// =========================================================================
pub struct RuleIdFieldExists;

impl TemplateRule for RuleIdFieldExists {
    fn rule_id(&self) -> &str {
        "TPL-003"
    }

    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Some(mapping) = work_item_mapping(template) {
            if let Some(id_field) = &mapping.id_field {
                if !schema_has_field(template, id_field) {
                    issues.push(ValidationIssue {
                        code: self.rule_id().to_string(),
                        severity: Severity::High,
                        message: format!("id_field '{id_field}' is not a schema field"),
                        field: Some(id_field.clone()),
                    });
                }
            }
        }
        issues
    }
}

// =========================================================================
// RULE: TPL-004
// "defaults keys must be known work-item columns"
// =========================================================================
pub struct RuleDefaultsKnown;

impl TemplateRule for RuleDefaultsKnown {
    fn rule_id(&self) -> &str {
        "TPL-004"
    }

    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Some(mapping) = work_item_mapping(template) {
            for target in mapping.defaults.keys() {
                if !TARGET_FIELDS.contains(&target.as_str()) {
                    issues.push(ValidationIssue {
                        code: self.rule_id().to_string(),
                        severity: Severity::High,
                        message: format!("defaults contains unknown work-item column '{target}'"),
                        field: Some(target.clone()),
                    });
                }
            }
        }
        issues
    }
}

// =========================================================================
// RULE: TPL-005
// "an explicit update action needs some way to find its target"
// The engine degrades to create at submission time; flag it at save time.
// =========================================================================
pub struct RuleUpdateNeedsId;

impl TemplateRule for RuleUpdateNeedsId {
    fn rule_id(&self) -> &str {
        "TPL-005"
    }

    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Some(mapping) = work_item_mapping(template) {
            if mapping.action == Some(MappingAction::Update)
                && mapping.id_field.is_none()
                && mapping.work_item_id.is_none()
            {
                issues.push(ValidationIssue {
                    code: self.rule_id().to_string(),
                    severity: Severity::Warning,
                    message: "action is 'update' but neither id_field nor work_item_id is set; \
                              submissions will fall back to create"
                        .to_string(),
                    field: None,
                });
            }
        }
        issues
    }
}

// =========================================================================
// RULE: TPL-006
// "schema field names must be unique"
// =========================================================================
pub struct RuleUniqueFieldNames;

impl TemplateRule for RuleUniqueFieldNames {
    fn rule_id(&self) -> &str {
        "TPL-006"
    }

    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        for field in &template.schema {
            if !seen.insert(field.name.as_str()) {
                issues.push(ValidationIssue {
                    code: self.rule_id().to_string(),
                    severity: Severity::High,
                    message: format!("duplicate schema field name '{}'", field.name),
                    field: Some(field.name.clone()),
                });
            }
        }
        issues
    }
}

// =========================================================================
// RULE: TPL-007
// "select fields must declare options"
// =========================================================================
pub struct RuleSelectHasOptions;

impl TemplateRule for RuleSelectHasOptions {
    fn rule_id(&self) -> &str {
        "TPL-007"
    }

    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for field in &template.schema {
            if field.field_type == FieldType::Select && field.options.is_empty() {
                issues.push(ValidationIssue {
                    code: self.rule_id().to_string(),
                    severity: Severity::High,
                    message: format!("select field '{}' has no options", field.name),
                    field: Some(field.name.clone()),
                });
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::TemplateMapping;
    use crate::status::Module;
    use crate::validation::standard_template_validator;
    use serde_json::json;
    use std::collections::BTreeMap;
    use time::macros::datetime;
    use uuid::Uuid;

    fn template(schema: Vec<crate::models::FieldDef>, mapping: TemplateMapping) -> FormTemplate {
        FormTemplate {
            id: Uuid::new_v4(),
            name: "Document Request".to_string(),
            module: Module::Compliance,
            schema,
            mapping,
            created_at: datetime!(2025-01-01 00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    fn text_field(name: &str) -> crate::models::FieldDef {
        crate::models::FieldDef {
            name: name.to_string(),
            field_type: FieldType::Text,
            label: name.to_string(),
            required: false,
            options: vec![],
        }
    }

    #[test]
    fn clean_template_passes_the_standard_validator() {
        let mut field_map = BTreeMap::new();
        field_map.insert("title".to_string(), "subject".to_string());
        let tpl = template(
            vec![text_field("subject"), text_field("details")],
            TemplateMapping {
                work_item: Some(WorkItemMapping {
                    field_map,
                    ..Default::default()
                }),
            },
        );
        assert!(standard_template_validator().run(&tpl).is_empty());
    }

    #[test]
    fn unknown_target_column_is_a_high_issue() {
        let mut field_map = BTreeMap::new();
        field_map.insert("assignee".to_string(), "subject".to_string());
        let tpl = template(
            vec![text_field("subject")],
            TemplateMapping {
                work_item: Some(WorkItemMapping {
                    field_map,
                    ..Default::default()
                }),
            },
        );
        let issues = RuleMapTargetsKnown.check(&tpl);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].code, "TPL-001");
    }

    #[test]
    fn field_map_source_must_be_in_schema() {
        let mut field_map = BTreeMap::new();
        field_map.insert("title".to_string(), "missing_key".to_string());
        let tpl = template(
            vec![text_field("subject")],
            TemplateMapping {
                work_item: Some(WorkItemMapping {
                    field_map,
                    ..Default::default()
                }),
            },
        );
        assert_eq!(RuleMapSourcesExist.check(&tpl).len(), 1);
    }

    #[test]
    fn update_without_id_source_is_a_warning_only() {
        let tpl = template(
            vec![text_field("subject")],
            TemplateMapping {
                work_item: Some(WorkItemMapping {
                    action: Some(MappingAction::Update),
                    ..Default::default()
                }),
            },
        );
        let issues = RuleUpdateNeedsId.check(&tpl);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let tpl = template(
            vec![text_field("subject"), text_field("subject")],
            TemplateMapping::default(),
        );
        assert_eq!(RuleUniqueFieldNames.check(&tpl).len(), 1);
    }

    #[test]
    fn unknown_defaults_key_is_flagged() {
        let mut defaults = serde_json::Map::new();
        defaults.insert("severity".to_string(), json!("high"));
        let tpl = template(
            vec![],
            TemplateMapping {
                work_item: Some(WorkItemMapping {
                    defaults,
                    ..Default::default()
                }),
            },
        );
        assert_eq!(RuleDefaultsKnown.check(&tpl).len(), 1);
    }
}
