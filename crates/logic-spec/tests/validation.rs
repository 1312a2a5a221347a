use serde_json::json;

use logic_spec::{
    Answer, FormSpec, SelectionSet, answers_from_value, build_report, form_schema, render_json,
    render_text, validate_submission,
};

fn example_form() -> FormSpec {
    serde_json::from_str(include_str!("../tests/fixtures/example_form.json")).expect("deserialize")
}

#[test]
fn valid_submission_passes() {
    let form = example_form();
    let answers = vec![
        Answer::new("owner_name", "Ada"),
        Answer::new("has_pet", "Yes"),
        Answer::new("pet_type", "Dog"),
        Answer::new("pet_age", 3),
        Answer::new("vaccinated", "Yes"),
    ];
    let result = validate_submission(&form, &answers);
    assert!(result.valid, "{result:?}");
    assert!(result.errors.is_empty());
    assert!(result.blocked_by.is_none());
}

#[test]
fn answers_on_hidden_fields_are_reported() {
    let form = example_form();
    let answers = vec![
        Answer::new("has_pet", "No"),
        Answer::new("pet_type", "Dog"),
        Answer::new("pet_age", ""),
    ];
    let result = validate_submission(&form, &answers);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field_id, "pet_type");
    assert_eq!(result.errors[0].code, "hidden_field_response");
}

#[test]
fn unknown_fields_and_blocking_rules_are_reported() {
    let form = example_form();
    let answers = vec![
        Answer::new("has_pet", "Yes"),
        Answer::new("pet_type", "Cat"),
        Answer::new("pet_age", 2),
        Answer::new("vaccinated", "No"),
        Answer::new("favourite_toy", "ball"),
    ];
    let result = validate_submission(&form, &answers);
    assert!(!result.valid);
    assert_eq!(result.unknown_fields, vec!["favourite_toy"]);
    let blocked = result.blocked_by.expect("blocked");
    assert_eq!(blocked.rule_id, "block-unvaccinated");
    assert_eq!(blocked.message, "Unvaccinated pets cannot be registered.");
}

#[test]
fn validation_result_serializes_compactly() {
    let form = example_form();
    let result = validate_submission(&form, &[Answer::new("owner_name", "Ada")]);
    let value = serde_json::to_value(&result).expect("json");
    assert_eq!(value, json!({ "valid": true }));
}

#[test]
fn keyed_answers_drive_the_report() {
    let form = example_form();
    let answers = answers_from_value(&json!({
        "has_pet": "Yes",
        "pet_type": "Dog",
        "pet_age": 31,
        "pet_food": { "options": ["Raw meat"], "others": false }
    }))
    .expect("answers");
    let report = build_report(&form, &answers);

    let ui = render_json(&report);
    assert_eq!(ui["form_id"], "example-form");
    assert_eq!(ui["status"], "blocked");
    assert_eq!(ui["blocking_rule"]["id"], "block-too-old");
    let hidden = ui["hidden"].as_array().expect("hidden");
    assert!(hidden.is_empty(), "{hidden:?}");
    let fields = ui["fields"].as_array().expect("fields");
    assert_eq!(fields.len(), form.fields.len());
    assert_eq!(fields[3]["current_value"], 31.0);

    let text = render_text(&report);
    assert!(text.contains("Form: Pet registration (example-form)"));
    assert!(text.contains("Blocked by block-too-old"));
    assert!(text.contains("Hidden fields: none"));
    assert!(text.contains(" - pet_food (Food) = [Raw meat]"));
}

#[test]
fn report_lists_hidden_fields_in_form_order() {
    let form = example_form();
    let report = build_report(
        &form,
        &[Answer::new("pet_food", SelectionSet::new(["Kibble"], false))],
    );
    assert_eq!(
        report.hidden_ids().collect::<Vec<_>>(),
        vec!["pet_type", "pet_age", "vaccinated", "pet_food", "raw_diet_notes"]
    );
    let text = render_text(&report);
    assert!(text.contains("Status: submittable"));
    assert!(text.contains(
        "Hidden fields: pet_type, pet_age, vaccinated, pet_food, raw_diet_notes"
    ));
}

#[test]
fn form_schema_describes_rules() {
    let schema = form_schema();
    let text = schema.to_string();
    assert!(text.contains("prevent_submit"));
    assert!(text.contains("any_of_set"));
}
