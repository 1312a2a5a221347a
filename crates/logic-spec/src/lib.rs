#![allow(missing_docs)]

pub mod answers;
pub mod condition;
pub mod lookup;
pub mod prevent;
pub mod report;
pub mod schema;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use answers::{
    Answer, AnswerError, AnswerValue, OTHERS_ANSWER_PREFIX, OTHERS_LABEL,
    RADIO_OTHERS_INPUT_VALUE, Scalar, SelectionSet, answers_from_value,
};
pub use condition::{conditions_hold, is_condition_satisfied};
pub use lookup::{LogicLookup, VisibleFieldIds};
pub use prevent::{resolve_blocking_rule, resolve_blocking_rule_with};
pub use report::{EvaluationReport, ReportStatus, build_report, render_json, render_text};
pub use schema::{answers_schema, form_schema};
pub use spec::{
    Comparison, Condition, FieldId, FieldSpec, FieldType, FormSpec, LogicRule, RuleEffect,
};
pub use validate::{BlockedBy, ValidationError, ValidationResult, validate_submission};
pub use visibility::{
    GroupedLogic, VisibilityMap, group_rules_by_target, resolve_visible_fields, visibility_map,
};
