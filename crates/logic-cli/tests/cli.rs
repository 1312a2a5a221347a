use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

const EXAMPLE_FORM: &str = include_str!("../../logic-spec/tests/fixtures/example_form.json");

fn workspace(answers: &str) -> TempDir {
    let temp = TempDir::new().expect("temp dir");
    temp.child("form.json")
        .write_str(EXAMPLE_FORM)
        .expect("write form");
    temp.child("answers.json")
        .write_str(answers)
        .expect("write answers");
    temp
}

fn form_logic() -> Command {
    Command::cargo_bin("form-logic").expect("binary")
}

#[test]
fn visible_lists_fields_in_form_order() {
    let temp = workspace(r#"{"has_pet": "Yes", "pet_type": "Dog"}"#);
    form_logic()
        .arg("visible")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .success()
        .stdout("owner_name\nhas_pet\npet_type\npet_age\npet_food\n");
}

#[test]
fn visible_json_without_answers() {
    let temp = workspace("{}");
    let output = form_logic()
        .args(["visible", "--format", "json", "--form"])
        .arg(temp.child("form.json").path())
        .output()
        .expect("run");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed["form_id"], "example-form");
    assert_eq!(parsed["visible"], serde_json::json!(["has_pet", "owner_name"]));
}

#[test]
fn blocking_reports_rule_message() {
    let temp = workspace(
        r#"[
            {"field_id": "has_pet", "value": "Yes"},
            {"field_id": "pet_type", "value": "Cat"},
            {"field_id": "pet_age", "value": 3},
            {"field_id": "vaccinated", "value": "No"}
        ]"#,
    );
    form_logic()
        .arg("blocking")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Blocked by block-unvaccinated: Unvaccinated pets cannot be registered.",
        ));
}

#[test]
fn blocking_reports_not_blocked() {
    let temp = workspace(r#"{"has_pet": "No"}"#);
    form_logic()
        .arg("blocking")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Not blocked"));
}

#[test]
fn check_rejects_hidden_field_answers() {
    let temp = workspace(r#"{"has_pet": "No", "pet_type": "Dog"}"#);
    form_logic()
        .arg("check")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Submission result: rejected"))
        .stdout(predicate::str::contains(
            "pet_type - attempted to submit response on a hidden field",
        ));
}

#[test]
fn check_rejects_object_answers_without_selection_shape() {
    let temp = workspace(r#"{"has_pet": "No", "pet_type": {"value": "Dog", "othersInput": "x"}}"#);
    form_logic()
        .arg("check")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid answer for field 'pet_type'"));
}

#[test]
fn check_accepts_consistent_submission() {
    let temp = workspace(r#"{"owner_name": "Ada", "has_pet": "Yes", "pet_type": "Dog"}"#);
    form_logic()
        .arg("check")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Submission result: accepted"));
}

#[test]
fn evaluate_renders_text_summary() {
    let temp = workspace(r#"{"has_pet": "Yes"}"#);
    form_logic()
        .arg("evaluate")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Form: Pet registration (example-form)"))
        .stdout(predicate::str::contains("Status: submittable"))
        .stdout(predicate::str::contains(
            "Hidden fields: pet_age, vaccinated, pet_food, raw_diet_notes",
        ));
}

#[test]
fn evaluate_surfaces_bad_answers() {
    let temp = workspace("[1, 2]");
    form_logic()
        .arg("evaluate")
        .arg("--form")
        .arg(temp.child("form.json").path())
        .arg("--answers")
        .arg(temp.child("answers.json").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid answer list"));
}

#[test]
fn missing_form_file_fails() {
    let temp = TempDir::new().expect("temp dir");
    form_logic()
        .arg("visible")
        .arg("--form")
        .arg(temp.child("nope.json").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read form"));
}

#[test]
fn schema_prints_form_schema() {
    form_logic()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("show_fields"));
}
