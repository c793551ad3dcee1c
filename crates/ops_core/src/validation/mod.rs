//! Template save-time validation. Mapping misconfigurations are caught here,
//! when the template is saved, instead of surfacing as silently-dropped
//! fields at submission time.

use serde::Serialize;

use crate::models::FormTemplate;

pub mod rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks the template save.
    High,
    /// Logged, save proceeds.
    Warning,
}

#[derive(Debug, Serialize, Clone)]
pub struct ValidationIssue {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    /// Which field/target the issue points at, when there is one.
    pub field: Option<String>,
}

// The contract every rule must fulfill
pub trait TemplateRule {
    fn check(&self, template: &FormTemplate) -> Vec<ValidationIssue>;
    fn rule_id(&self) -> &str;
}

// The engine that holds the registry of all rules
pub struct ValidationEngine {
    rules: Vec<Box<dyn TemplateRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<R: TemplateRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(&self, template: &FormTemplate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let mut rule_issues = rule.check(template);
            issues.append(&mut rule_issues);
        }
        issues
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The registry applied to every template save.
pub fn standard_template_validator() -> ValidationEngine {
    ValidationEngine::new()
        .add_rule(rules::RuleMapTargetsKnown)
        .add_rule(rules::RuleMapSourcesExist)
        .add_rule(rules::RuleIdFieldExists)
        .add_rule(rules::RuleDefaultsKnown)
        .add_rule(rules::RuleUpdateNeedsId)
        .add_rule(rules::RuleUniqueFieldNames)
        .add_rule(rules::RuleSelectHasOptions)
}
