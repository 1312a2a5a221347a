use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::{Scalar, SelectionSet};
use crate::spec::field::FieldId;

/// Comparison applied to the referenced field's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Comparison {
    Equal { value: Scalar },
    LessOrEqual { value: Scalar },
    GreaterOrEqual { value: Scalar },
    /// The scalar answer is one of `values`.
    AnyOfScalar { values: Vec<Scalar> },
    /// The selection answer is exactly one of `sets`.
    AnyOfSet { sets: Vec<SelectionSet> },
}

/// One atomic check against another field's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    /// Field whose answer gates this condition.
    pub field: FieldId,
    #[serde(flatten)]
    pub comparison: Comparison,
}

impl Condition {
    pub fn new(field: impl Into<FieldId>, comparison: Comparison) -> Self {
        Self {
            field: field.into(),
            comparison,
        }
    }

    pub fn equal(field: impl Into<FieldId>, value: impl Into<Scalar>) -> Self {
        Self::new(
            field,
            Comparison::Equal {
                value: value.into(),
            },
        )
    }

    pub fn less_or_equal(field: impl Into<FieldId>, value: impl Into<Scalar>) -> Self {
        Self::new(
            field,
            Comparison::LessOrEqual {
                value: value.into(),
            },
        )
    }

    pub fn greater_or_equal(field: impl Into<FieldId>, value: impl Into<Scalar>) -> Self {
        Self::new(
            field,
            Comparison::GreaterOrEqual {
                value: value.into(),
            },
        )
    }

    pub fn any_of_scalar<I, V>(field: impl Into<FieldId>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Self::new(
            field,
            Comparison::AnyOfScalar {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn any_of_set(field: impl Into<FieldId>, sets: Vec<SelectionSet>) -> Self {
        Self::new(field, Comparison::AnyOfSet { sets })
    }
}

/// What a rule does once all of its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleEffect {
    ShowFields { show: Vec<FieldId> },
    PreventSubmit { message: String },
}

/// A form-author defined logic rule. Conditions are AND-ed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogicRule {
    pub id: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(flatten)]
    pub effect: RuleEffect,
}

impl LogicRule {
    pub fn show_fields<I, S>(id: impl Into<String>, conditions: Vec<Condition>, show: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        Self {
            id: id.into(),
            conditions,
            effect: RuleEffect::ShowFields {
                show: show.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn prevent_submit(
        id: impl Into<String>,
        conditions: Vec<Condition>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            conditions,
            effect: RuleEffect::PreventSubmit {
                message: message.into(),
            },
        }
    }

    /// Fields revealed by this rule; empty for prevent-submit rules.
    pub fn targets(&self) -> &[FieldId] {
        match &self.effect {
            RuleEffect::ShowFields { show } => show,
            RuleEffect::PreventSubmit { .. } => &[],
        }
    }

    /// Message shown when this rule blocks submission.
    pub fn block_message(&self) -> Option<&str> {
        match &self.effect {
            RuleEffect::PreventSubmit { message } => Some(message),
            RuleEffect::ShowFields { .. } => None,
        }
    }

    pub fn is_show_fields(&self) -> bool {
        matches!(self.effect, RuleEffect::ShowFields { .. })
    }

    pub fn is_prevent_submit(&self) -> bool {
        matches!(self.effect, RuleEffect::PreventSubmit { .. })
    }
}
