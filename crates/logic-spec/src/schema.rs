use schemars::schema_for;
use serde_json::Value;

use crate::answers::Answer;
use crate::spec::form::FormSpec;

/// JSON Schema describing a form definition, including its logic rules.
pub fn form_schema() -> Value {
    schema_for!(FormSpec).to_value()
}

/// JSON Schema for the list form of an answer snapshot.
pub fn answers_schema() -> Value {
    schema_for!(Vec<Answer>).to_value()
}
