use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::FieldSpec;
use crate::spec::rule::LogicRule;

/// Top-level form definition: fields plus the logic attached to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSpec {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<LogicRule>,
}

impl FormSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_rules(mut self, rules: Vec<LogicRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Show-fields rules in declaration order.
    pub fn show_rules(&self) -> impl Iterator<Item = &LogicRule> {
        self.rules.iter().filter(|rule| rule.is_show_fields())
    }

    /// Prevent-submit rules in declaration order.
    pub fn prevent_rules(&self) -> impl Iterator<Item = &LogicRule> {
        self.rules.iter().filter(|rule| rule.is_prevent_submit())
    }
}
