use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;

use logic_spec::{
    Answer, AnswerError, FormSpec, answers_from_value, build_report, form_schema as spec_schema,
    render_json, render_text as spec_render_text, resolve_blocking_rule_with,
    resolve_visible_fields, validate_submission as spec_validate,
};

const DEFAULT_FORM: &str = include_str!("../../logic-spec/tests/fixtures/example_form.json");

#[derive(Debug, Error)]
enum ComponentError {
    #[error("failed to parse config: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("form '{0}' is not available")]
    FormUnavailable(String),
    #[error("failed to parse answers: {0}")]
    AnswersParse(#[source] serde_json::Error),
    #[error(transparent)]
    Answers(#[from] AnswerError),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ComponentConfig {
    #[serde(default)]
    form_json: Option<String>,
}

fn load_form(config_json: &str) -> Result<FormSpec, ComponentError> {
    let config = if config_json.trim().is_empty() {
        ComponentConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(ComponentError::ConfigParse)?
    };

    let form_json = config.form_json.as_deref().unwrap_or(DEFAULT_FORM);

    serde_json::from_str(form_json).map_err(ComponentError::ConfigParse)
}

fn ensure_form(form_id: &str, config_json: &str) -> Result<FormSpec, ComponentError> {
    let form = load_form(config_json)?;
    if form.id != form_id {
        Err(ComponentError::FormUnavailable(form_id.to_string()))
    } else {
        Ok(form)
    }
}

fn parse_answers(answers_json: &str) -> Result<Vec<Answer>, ComponentError> {
    if answers_json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(answers_json).map_err(ComponentError::AnswersParse)?;
    Ok(answers_from_value(&value)?)
}

fn respond(result: Result<Value, ComponentError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => {
            warn!(error = %err, "form logic call failed");
            json!({ "error": err.to_string() }).to_string()
        }
    }
}

fn respond_string(result: Result<String, ComponentError>) -> String {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "form logic call failed");
            json!({ "error": err.to_string() }).to_string()
        }
    }
}

/// Returns the configured form definition as JSON.
pub fn describe(form_id: &str, config_json: &str) -> String {
    respond(
        ensure_form(form_id, config_json)
            .and_then(|form| serde_json::to_value(form).map_err(ComponentError::JsonEncode)),
    )
}

/// Ids of the fields visible for the given answers, sorted.
pub fn visible_fields(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|form| {
        let answers = parse_answers(answers_json)?;
        let visible = resolve_visible_fields(&answers, &form);
        Ok(json!({
            "form_id": form.id,
            "visible": visible,
        }))
    }))
}

/// The first prevent-submit rule that matches, if any.
pub fn blocking_rule(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|form| {
        let answers = parse_answers(answers_json)?;
        let visible = resolve_visible_fields(&answers, &form);
        let response = match resolve_blocking_rule_with(&answers, &form, &visible) {
            Some(rule) => json!({
                "blocked": true,
                "rule_id": rule.id,
                "message": rule.block_message(),
            }),
            None => json!({ "blocked": false }),
        };
        Ok(response)
    }))
}

/// Server-side check of a full submission.
pub fn validate_submission(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|form| {
        let answers = parse_answers(answers_json)?;
        serde_json::to_value(spec_validate(&form, &answers)).map_err(ComponentError::JsonEncode)
    }))
}

/// Visibility and blocking in one structured payload.
pub fn evaluate(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).and_then(|form| {
        let answers = parse_answers(answers_json)?;
        Ok(render_json(&build_report(&form, &answers)))
    }))
}

pub fn render_text(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond_string(ensure_form(form_id, config_json).and_then(|form| {
        let answers = parse_answers(answers_json)?;
        Ok(spec_render_text(&build_report(&form, &answers)))
    }))
}

/// JSON Schema of the form definition format.
pub fn form_schema() -> String {
    respond(Ok(spec_schema()))
}
