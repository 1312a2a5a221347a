use serde_json::{Map, Value, json};

use crate::answers::{Answer, AnswerValue, Scalar};
use crate::lookup::LogicLookup;
use crate::prevent::resolve_blocking_rule_with;
use crate::spec::field::FieldType;
use crate::spec::form::FormSpec;
use crate::visibility::visible_with_lookup;

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// No prevent-submit rule matches.
    Submittable,
    /// A prevent-submit rule matches.
    Blocked,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Submittable => "submittable",
            ReportStatus::Blocked => "blocked",
        }
    }
}

/// One field as seen by the renderers.
#[derive(Debug, Clone)]
pub struct ReportField {
    pub id: String,
    pub title: Option<String>,
    pub kind: FieldType,
    pub visible: bool,
    pub current_value: Option<AnswerValue>,
}

/// Result of evaluating a form snapshot, in field declaration order.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub form_id: String,
    pub form_title: String,
    pub status: ReportStatus,
    pub blocking_rule_id: Option<String>,
    pub blocking_message: Option<String>,
    pub fields: Vec<ReportField>,
}

impl EvaluationReport {
    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.visible)
            .map(|field| field.id.as_str())
    }

    pub fn hidden_ids(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| !field.visible)
            .map(|field| field.id.as_str())
    }
}

/// Evaluates visibility and submit blocking once and collects both results.
pub fn build_report(form: &FormSpec, answers: &[Answer]) -> EvaluationReport {
    let lookup = LogicLookup::new(form, answers);
    let visible = visible_with_lookup(form, &lookup);
    let blocking = resolve_blocking_rule_with(answers, form, &visible);

    let fields = form
        .fields
        .iter()
        .map(|field| ReportField {
            id: field.id.clone(),
            title: field.title.clone(),
            kind: field.kind,
            visible: visible.contains(&field.id),
            current_value: lookup.answer(&field.id).cloned(),
        })
        .collect();

    EvaluationReport {
        form_id: form.id.clone(),
        form_title: form.title.clone(),
        status: if blocking.is_some() {
            ReportStatus::Blocked
        } else {
            ReportStatus::Submittable
        },
        blocking_rule_id: blocking.map(|rule| rule.id.clone()),
        blocking_message: blocking
            .and_then(|rule| rule.block_message())
            .map(str::to_string),
        fields,
    }
}

/// Render the report as a structured JSON value.
pub fn render_json(report: &EvaluationReport) -> Value {
    let fields = report
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.clone()));
            map.insert(
                "title".into(),
                field.title.clone().map(Value::String).unwrap_or(Value::Null),
            );
            map.insert("type".into(), Value::String(field.kind.as_str().to_string()));
            map.insert("visible".into(), Value::Bool(field.visible));
            if let Some(value) = &field.current_value {
                map.insert(
                    "current_value".into(),
                    serde_json::to_value(value).unwrap_or(Value::Null),
                );
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": report.form_id,
        "form_title": report.form_title,
        "status": report.status.as_str(),
        "visible": report.visible_ids().collect::<Vec<_>>(),
        "hidden": report.hidden_ids().collect::<Vec<_>>(),
        "blocking_rule": report.blocking_rule_id.as_ref().map(|id| json!({
            "id": id,
            "message": report.blocking_message,
        })),
        "fields": fields,
    })
}

/// Render the report as human-friendly text.
pub fn render_text(report: &EvaluationReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {} ({})", report.form_title, report.form_id));
    lines.push(format!("Status: {}", report.status.as_str()));
    if let Some(rule_id) = &report.blocking_rule_id {
        lines.push(format!(
            "Blocked by {}: {}",
            rule_id,
            report.blocking_message.as_deref().unwrap_or_default()
        ));
    }

    lines.push("Visible fields:".to_string());
    for field in report.fields.iter().filter(|field| field.visible) {
        let mut entry = format!(" - {}", field.id);
        if let Some(title) = &field.title {
            entry.push_str(&format!(" ({})", title));
        }
        if let Some(value) = &field.current_value {
            entry.push_str(&format!(" = {}", value_to_display(value)));
        }
        lines.push(entry);
    }

    let hidden = report.hidden_ids().collect::<Vec<_>>();
    if hidden.is_empty() {
        lines.push("Hidden fields: none".to_string());
    } else {
        lines.push(format!("Hidden fields: {}", hidden.join(", ")));
    }

    lines.join("\n")
}

fn value_to_display(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Scalar(Scalar::Text(text)) => text.clone(),
        AnswerValue::Scalar(scalar @ Scalar::Number(_)) => scalar.text().into_owned(),
        AnswerValue::Selection(selection) => {
            let mut labels = selection.options.iter().cloned().collect::<Vec<_>>();
            if selection.others {
                labels.push("Others".to_string());
            }
            format!("[{}]", labels.join(", "))
        }
    }
}
