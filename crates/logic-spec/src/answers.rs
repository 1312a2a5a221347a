use std::borrow::Cow;
use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::spec::field::FieldId;

/// Label a condition uses to designate the radio "Others" choice.
pub const OTHERS_LABEL: &str = "Others";

/// Value a client sends for a radio field while its "Others" choice is picked.
pub const RADIO_OTHERS_INPUT_VALUE: &str = "!!FORM_LOGIC_RADIO_OTHERS_VALUE!!";

/// Prefix of a persisted radio answer that used the "Others" choice.
pub const OTHERS_ANSWER_PREFIX: &str = "Others: ";

/// A single string or number value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric reading of the value. Strings count when they parse to a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(value) => Some(*value).filter(|value| value.is_finite()),
            Scalar::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
            }
        }
    }

    /// Trimmed textual form used for exact equality.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Number(value) => Cow::Owned(value.to_string()),
            Scalar::Text(text) => Cow::Borrowed(text.trim()),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Number(value) => value.is_nan(),
            Scalar::Text(text) => text.trim().is_empty(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(f64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

/// Multi-choice answer: the chosen option labels plus the "Others" flag.
/// `options` is required; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SelectionSet {
    pub options: BTreeSet<String>,
    #[serde(default)]
    pub others: bool,
}

impl SelectionSet {
    pub fn new<I, S>(options: I, others: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            others,
        }
    }

    /// Copy with labels trimmed and blank labels dropped.
    pub fn normalized(&self) -> SelectionSet {
        SelectionSet {
            options: self
                .options
                .iter()
                .map(|option| option.trim())
                .filter(|option| !option.is_empty())
                .map(str::to_string)
                .collect(),
            others: self.others,
        }
    }

    pub fn is_blank(&self) -> bool {
        !self.others && self.options.iter().all(|option| option.trim().is_empty())
    }
}

/// The current value for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AnswerValue {
    Selection(SelectionSet),
    Scalar(Scalar),
}

impl AnswerValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            AnswerValue::Scalar(scalar) => Some(scalar),
            AnswerValue::Selection(_) => None,
        }
    }

    pub fn as_selection(&self) -> Option<&SelectionSet> {
        match self {
            AnswerValue::Selection(selection) => Some(selection),
            AnswerValue::Scalar(_) => None,
        }
    }

    /// Blank answers are treated as if the field had not been answered.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Scalar(scalar) => scalar.is_blank(),
            AnswerValue::Selection(selection) => selection.is_blank(),
        }
    }
}

impl From<Scalar> for AnswerValue {
    fn from(value: Scalar) -> Self {
        AnswerValue::Scalar(value)
    }
}

impl From<SelectionSet> for AnswerValue {
    fn from(value: SelectionSet) -> Self {
        AnswerValue::Selection(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Scalar(value.into())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Scalar(value.into())
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Scalar(value.into())
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        AnswerValue::Scalar(value.into())
    }
}

/// One field's answer as supplied by a client or a stored submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Answer {
    pub field_id: FieldId,
    pub value: AnswerValue,
    /// Upstream visibility hint. Visibility is always recomputed; this is never read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Answer {
    pub fn new(field_id: impl Into<FieldId>, value: impl Into<AnswerValue>) -> Self {
        Self {
            field_id: field_id.into(),
            value: value.into(),
            is_visible: None,
        }
    }

    pub fn with_visibility_hint(mut self, visible: bool) -> Self {
        self.is_visible = Some(visible);
        self
    }
}

#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("answers must be a JSON array or object, found {0}")]
    Shape(&'static str),
    #[error("invalid answer list: {0}")]
    List(#[source] serde_json::Error),
    #[error("invalid answer for field '{field}': {source}")]
    Value {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads answers from JSON.
///
/// Accepts either a list of `Answer` objects or an object keyed by field id.
/// `null` entries in the keyed form are skipped.
pub fn answers_from_value(value: &Value) -> Result<Vec<Answer>, AnswerError> {
    match value {
        Value::Array(_) => serde_json::from_value(value.clone()).map_err(AnswerError::List),
        Value::Object(map) => map
            .iter()
            .filter(|(_, raw)| !raw.is_null())
            .map(|(field_id, raw)| {
                serde_json::from_value::<AnswerValue>(raw.clone())
                    .map(|value| Answer::new(field_id.clone(), value))
                    .map_err(|source| AnswerError::Value {
                        field: field_id.clone(),
                        source,
                    })
            })
            .collect(),
        Value::Null => Ok(Vec::new()),
        Value::Bool(_) => Err(AnswerError::Shape("boolean")),
        Value::Number(_) => Err(AnswerError::Shape("number")),
        Value::String(_) => Err(AnswerError::Shape("string")),
    }
}
