use std::collections::{BTreeMap, BTreeSet};

use crate::answers::{Answer, AnswerValue};
use crate::spec::field::{FieldId, FieldSpec};
use crate::spec::form::FormSpec;

/// Field ids currently visible, in sorted order.
pub type VisibleFieldIds = BTreeSet<FieldId>;

/// Id-keyed views over one evaluation snapshot.
///
/// When an id repeats, the first occurrence wins for both fields and answers.
#[derive(Debug, Clone)]
pub struct LogicLookup<'a> {
    fields: BTreeMap<&'a str, &'a FieldSpec>,
    answers: BTreeMap<&'a str, &'a AnswerValue>,
}

impl<'a> LogicLookup<'a> {
    pub fn new(form: &'a FormSpec, answers: &'a [Answer]) -> Self {
        let mut field_map = BTreeMap::new();
        for field in &form.fields {
            field_map.entry(field.id.as_str()).or_insert(field);
        }
        let mut answer_map = BTreeMap::new();
        for answer in answers {
            answer_map
                .entry(answer.field_id.as_str())
                .or_insert(&answer.value);
        }
        Self {
            fields: field_map,
            answers: answer_map,
        }
    }

    pub fn field(&self, id: &str) -> Option<&'a FieldSpec> {
        self.fields.get(id).copied()
    }

    pub fn answer(&self, id: &str) -> Option<&'a AnswerValue> {
        self.answers.get(id).copied()
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }
}

/// Ids targeted by at least one show-fields rule.
pub fn targeted_field_ids(form: &FormSpec) -> BTreeSet<&str> {
    form.show_rules()
        .flat_map(|rule| rule.targets())
        .map(String::as_str)
        .collect()
}
