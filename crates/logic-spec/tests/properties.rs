use proptest::prelude::*;

use logic_spec::{
    Answer, Condition, FieldSpec, FieldType, FormSpec, LogicRule, resolve_blocking_rule,
    resolve_visible_fields,
};

const MAX_FIELDS: usize = 8;

type RawRule = (Vec<(usize, bool)>, Vec<usize>);

fn field_id(index: usize) -> String {
    format!("f{index}")
}

fn label(flag: bool) -> &'static str {
    if flag { "a" } else { "b" }
}

fn build_form(count: usize, rules: Vec<RawRule>, blockers: Vec<Vec<(usize, bool)>>) -> FormSpec {
    let fields = (0..count)
        .map(|index| FieldSpec::new(field_id(index), FieldType::ShortText))
        .collect();
    let to_conditions = |conditions: Vec<(usize, bool)>| {
        conditions
            .into_iter()
            .map(|(index, flag)| Condition::equal(field_id(index), label(flag)))
            .collect::<Vec<_>>()
    };
    let mut logic = rules
        .into_iter()
        .enumerate()
        .map(|(index, (conditions, targets))| {
            LogicRule::show_fields(
                format!("show-{index}"),
                to_conditions(conditions),
                targets.into_iter().map(field_id),
            )
        })
        .collect::<Vec<_>>();
    logic.extend(blockers.into_iter().enumerate().map(|(index, conditions)| {
        LogicRule::prevent_submit(
            format!("block-{index}"),
            to_conditions(conditions),
            format!("blocked by {index}"),
        )
    }));
    FormSpec::new("generated", "Generated")
        .with_fields(fields)
        .with_rules(logic)
}

fn form_strategy() -> impl Strategy<Value = FormSpec> {
    (2usize..=MAX_FIELDS).prop_flat_map(|count| {
        let conditions = prop::collection::vec((0..count, any::<bool>()), 0..3);
        let rule = (conditions.clone(), prop::collection::vec(0..count, 1..3));
        (
            prop::collection::vec(rule, 0..7),
            prop::collection::vec(conditions, 0..3),
        )
            .prop_map(move |(rules, blockers)| build_form(count, rules, blockers))
    })
}

fn raw_answers() -> impl Strategy<Value = Vec<Option<bool>>> {
    prop::collection::vec(prop::option::of(any::<bool>()), MAX_FIELDS)
}

fn to_answers(form: &FormSpec, raw: &[Option<bool>]) -> Vec<Answer> {
    form.fields
        .iter()
        .zip(raw)
        .filter_map(|(field, value)| value.map(|flag| Answer::new(field.id.clone(), label(flag))))
        .collect()
}

proptest! {
    #[test]
    fn resolution_is_idempotent(form in form_strategy(), raw in raw_answers()) {
        let answers = to_answers(&form, &raw);
        prop_assert_eq!(
            resolve_visible_fields(&answers, &form),
            resolve_visible_fields(&answers, &form)
        );
    }

    #[test]
    fn rule_order_does_not_change_visibility(form in form_strategy(), raw in raw_answers()) {
        let answers = to_answers(&form, &raw);
        let mut reversed = form.clone();
        reversed.rules.reverse();
        prop_assert_eq!(
            resolve_visible_fields(&answers, &form),
            resolve_visible_fields(&answers, &reversed)
        );
    }

    #[test]
    fn untargeted_fields_stay_visible(form in form_strategy(), raw in raw_answers()) {
        let answers = to_answers(&form, &raw);
        let visible = resolve_visible_fields(&answers, &form);
        for field in &form.fields {
            let targeted = form.show_rules().any(|rule| rule.targets().contains(&field.id));
            if !targeted {
                prop_assert!(visible.contains(&field.id));
            }
        }
        for id in &visible {
            prop_assert!(form.field(id).is_some());
        }
    }

    #[test]
    fn more_answers_never_hide_fields(
        form in form_strategy(),
        raw in raw_answers(),
        mask in prop::collection::vec(any::<bool>(), MAX_FIELDS),
    ) {
        let full = to_answers(&form, &raw);
        let partial_raw = raw
            .iter()
            .zip(&mask)
            .map(|(value, keep)| if *keep { *value } else { None })
            .collect::<Vec<_>>();
        let partial = to_answers(&form, &partial_raw);
        let visible_full = resolve_visible_fields(&full, &form);
        let visible_partial = resolve_visible_fields(&partial, &form);
        prop_assert!(visible_partial.is_subset(&visible_full));
    }

    #[test]
    fn visibility_hints_are_ignored(form in form_strategy(), raw in raw_answers(), hint in any::<bool>()) {
        let answers = to_answers(&form, &raw);
        let hinted = answers
            .iter()
            .cloned()
            .map(|answer| answer.with_visibility_hint(hint))
            .collect::<Vec<_>>();
        prop_assert_eq!(
            resolve_visible_fields(&answers, &form),
            resolve_visible_fields(&hinted, &form)
        );
        prop_assert_eq!(
            resolve_blocking_rule(&answers, &form).map(|rule| rule.id.clone()),
            resolve_blocking_rule(&hinted, &form).map(|rule| rule.id.clone())
        );
    }
}
