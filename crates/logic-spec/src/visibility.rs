use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::answers::Answer;
use crate::condition::conditions_hold;
use crate::lookup::{LogicLookup, VisibleFieldIds, targeted_field_ids};
use crate::spec::field::FieldId;
use crate::spec::form::FormSpec;
use crate::spec::rule::Condition;

/// Per-field visibility flag, keyed by field id.
pub type VisibilityMap = BTreeMap<FieldId, bool>;

/// Condition lists that can reveal a field, keyed by the field they reveal.
pub type GroupedLogic<'a> = BTreeMap<&'a str, Vec<&'a [Condition]>>;

/// Computes which fields are visible for the given answers.
///
/// Fields no show-fields rule targets start out visible. Rules are then
/// applied in repeated passes until a pass reveals nothing new. A rule only
/// fires when every condition holds against fields already visible, so
/// fields that can only reveal each other stay hidden.
pub fn resolve_visible_fields(answers: &[Answer], form: &FormSpec) -> VisibleFieldIds {
    let lookup = LogicLookup::new(form, answers);
    visible_with_lookup(form, &lookup)
}

pub(crate) fn visible_with_lookup(form: &FormSpec, lookup: &LogicLookup<'_>) -> VisibleFieldIds {
    let targeted = targeted_field_ids(form);
    let mut visible: VisibleFieldIds = form
        .fields
        .iter()
        .filter(|field| !targeted.contains(field.id.as_str()))
        .map(|field| field.id.clone())
        .collect();

    let mut passes = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        passes += 1;
        for rule in form.show_rules() {
            if !conditions_hold(&rule.conditions, lookup, &visible) {
                continue;
            }
            for target in rule.targets() {
                if lookup.has_field(target) && visible.insert(target.clone()) {
                    trace!(rule = %rule.id, field = %target, "rule revealed field");
                    changed = true;
                }
            }
        }
    }

    debug!(
        form = %form.id,
        passes,
        visible = visible.len(),
        total = form.fields.len(),
        "resolved visible fields"
    );
    visible
}

/// Expands a visible set into a flag for every declared field.
pub fn visibility_map(form: &FormSpec, visible: &VisibleFieldIds) -> VisibilityMap {
    form.fields
        .iter()
        .map(|field| (field.id.clone(), visible.contains(&field.id)))
        .collect()
}

/// Groups show-fields conditions by the declared field they reveal.
///
/// Targets that are not declared fields are left out. A field absent from
/// the result is unconditionally visible.
pub fn group_rules_by_target(form: &FormSpec) -> GroupedLogic<'_> {
    let mut grouped = GroupedLogic::new();
    for rule in form.show_rules() {
        for target in rule.targets() {
            if form.field(target).is_none() {
                continue;
            }
            grouped
                .entry(target.as_str())
                .or_default()
                .push(rule.conditions.as_slice());
        }
    }
    grouped
}
