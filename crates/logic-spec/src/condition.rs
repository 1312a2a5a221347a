//! Matching a single condition against the referenced field's answer.
//!
//! A condition only ever holds when the field it references is itself
//! visible and has a non-blank answer. Everything else about the comparison
//! is decided after that gate.

use crate::answers::{
    AnswerValue, OTHERS_ANSWER_PREFIX, OTHERS_LABEL, RADIO_OTHERS_INPUT_VALUE, Scalar,
    SelectionSet,
};
use crate::lookup::{LogicLookup, VisibleFieldIds};
use crate::spec::field::FieldSpec;
use crate::spec::rule::{Comparison, Condition};

/// Decides whether `condition` holds.
///
/// `field` is the referenced field definition (absent when the condition
/// points at an unknown id), `answer` its current value and
/// `referenced_visible` whether the fixed point has already made it visible.
pub fn is_condition_satisfied(
    condition: &Condition,
    field: Option<&FieldSpec>,
    answer: Option<&AnswerValue>,
    referenced_visible: bool,
) -> bool {
    if !referenced_visible {
        return false;
    }
    let Some(answer) = answer.filter(|answer| !answer.is_blank()) else {
        return false;
    };

    match &condition.comparison {
        Comparison::Equal { value } => {
            matches_any_scalar(field, answer, std::slice::from_ref(value))
        }
        Comparison::LessOrEqual { value } => {
            compare_numbers(answer, value, |left, right| left <= right)
        }
        Comparison::GreaterOrEqual { value } => {
            compare_numbers(answer, value, |left, right| left >= right)
        }
        Comparison::AnyOfScalar { values } => matches_any_scalar(field, answer, values),
        Comparison::AnyOfSet { sets } => matches_any_set(answer, sets),
    }
}

/// AND of every condition in a rule, evaluated against the current visible set.
pub fn conditions_hold(
    conditions: &[Condition],
    lookup: &LogicLookup<'_>,
    visible: &VisibleFieldIds,
) -> bool {
    conditions.iter().all(|condition| {
        is_condition_satisfied(
            condition,
            lookup.field(&condition.field),
            lookup.answer(&condition.field),
            visible.contains(condition.field.as_str()),
        )
    })
}

/// Equality between two scalars: numeric when both sides are numbers, text otherwise.
pub fn scalars_equal(left: &Scalar, right: &Scalar) -> bool {
    match (left.as_number(), right.as_number()) {
        (Some(left), Some(right)) => left == right,
        _ => left.text() == right.text(),
    }
}

fn compare_numbers(answer: &AnswerValue, expected: &Scalar, cmp: fn(f64, f64) -> bool) -> bool {
    let Some(actual) = answer.as_scalar().and_then(Scalar::as_number) else {
        return false;
    };
    expected
        .as_number()
        .is_some_and(|expected| cmp(actual, expected))
}

fn matches_any_scalar(field: Option<&FieldSpec>, answer: &AnswerValue, values: &[Scalar]) -> bool {
    let Some(actual) = answer.as_scalar() else {
        return false;
    };
    if field.is_some_and(FieldSpec::is_radio_with_others)
        && values.iter().any(|value| value.text() == OTHERS_LABEL)
        && is_others_answer(actual)
    {
        return true;
    }
    values.iter().any(|value| scalars_equal(value, actual))
}

/// Client sends the sentinel; stored submissions carry `Others: <text>`.
fn is_others_answer(actual: &Scalar) -> bool {
    match actual {
        Scalar::Text(text) => {
            let text = text.trim();
            text == RADIO_OTHERS_INPUT_VALUE || text.starts_with(OTHERS_ANSWER_PREFIX)
        }
        Scalar::Number(_) => false,
    }
}

fn matches_any_set(answer: &AnswerValue, sets: &[SelectionSet]) -> bool {
    let Some(actual) = answer.as_selection() else {
        return false;
    };
    let actual = actual.normalized();
    sets.iter().any(|set| set.normalized() == actual)
}
