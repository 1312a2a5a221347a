use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::Answer;
use crate::lookup::LogicLookup;
use crate::prevent::resolve_blocking_rule_with;
use crate::spec::form::FormSpec;
use crate::visibility::visible_with_lookup;

/// Problem with one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub field_id: String,
    pub message: String,
    pub code: String,
}

/// Prevent-submit rule that rejected the submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BlockedBy {
    pub rule_id: String,
    pub message: String,
}

/// Outcome of checking a full submission against the form logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<BlockedBy>,
}

/// Checks a submission the way a server does before accepting it.
///
/// Non-blank answers on hidden fields, answers for undeclared fields and a
/// matching prevent-submit rule all make the submission invalid.
pub fn validate_submission(form: &FormSpec, answers: &[Answer]) -> ValidationResult {
    let lookup = LogicLookup::new(form, answers);
    let visible = visible_with_lookup(form, &lookup);

    let mut errors = Vec::new();
    let mut unknown: BTreeSet<String> = BTreeSet::new();
    for answer in answers {
        if !lookup.has_field(&answer.field_id) {
            unknown.insert(answer.field_id.clone());
            continue;
        }
        if !visible.contains(&answer.field_id) && !answer.value.is_blank() {
            errors.push(ValidationError {
                field_id: answer.field_id.clone(),
                message: "attempted to submit response on a hidden field".into(),
                code: "hidden_field_response".into(),
            });
        }
    }

    let blocked_by = resolve_blocking_rule_with(answers, form, &visible).map(|rule| BlockedBy {
        rule_id: rule.id.clone(),
        message: rule.block_message().unwrap_or_default().to_string(),
    });

    ValidationResult {
        valid: errors.is_empty() && unknown.is_empty() && blocked_by.is_none(),
        errors,
        unknown_fields: unknown.into_iter().collect(),
        blocked_by,
    }
}
