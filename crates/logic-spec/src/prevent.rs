use tracing::debug;

use crate::answers::Answer;
use crate::condition::conditions_hold;
use crate::lookup::{LogicLookup, VisibleFieldIds};
use crate::spec::form::FormSpec;
use crate::spec::rule::LogicRule;
use crate::visibility::visible_with_lookup;

/// Returns the first prevent-submit rule, in declaration order, whose
/// conditions all hold. Visibility is computed from show-fields rules only.
pub fn resolve_blocking_rule<'f>(
    answers: &[Answer],
    form: &'f FormSpec,
) -> Option<&'f LogicRule> {
    let lookup = LogicLookup::new(form, answers);
    let visible = visible_with_lookup(form, &lookup);
    first_blocking(form, &lookup, &visible)
}

/// Same as [`resolve_blocking_rule`] for callers that already hold the visible set.
pub fn resolve_blocking_rule_with<'f>(
    answers: &[Answer],
    form: &'f FormSpec,
    visible: &VisibleFieldIds,
) -> Option<&'f LogicRule> {
    let lookup = LogicLookup::new(form, answers);
    first_blocking(form, &lookup, visible)
}

fn first_blocking<'f>(
    form: &'f FormSpec,
    lookup: &LogicLookup<'_>,
    visible: &VisibleFieldIds,
) -> Option<&'f LogicRule> {
    let rule = form
        .prevent_rules()
        .find(|rule| conditions_hold(&rule.conditions, lookup, visible));
    if let Some(rule) = rule {
        debug!(form = %form.id, rule = %rule.id, "submission blocked");
    }
    rule
}
