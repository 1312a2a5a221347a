use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stable identifier of a form field.
pub type FieldId = String;

/// Field kinds a form may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    ShortText,
    LongText,
    Number,
    Decimal,
    Rating,
    YesNo,
    Dropdown,
    Radio,
    Checkbox,
    Email,
    Mobile,
    HomeNo,
    Date,
    Nric,
    Uen,
    Attachment,
    Statement,
    Section,
    Image,
    Table,
}

impl FieldType {
    /// Label used in text output and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::ShortText => "short_text",
            FieldType::LongText => "long_text",
            FieldType::Number => "number",
            FieldType::Decimal => "decimal",
            FieldType::Rating => "rating",
            FieldType::YesNo => "yes_no",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Email => "email",
            FieldType::Mobile => "mobile",
            FieldType::HomeNo => "home_no",
            FieldType::Date => "date",
            FieldType::Nric => "nric",
            FieldType::Uen => "uen",
            FieldType::Attachment => "attachment",
            FieldType::Statement => "statement",
            FieldType::Section => "section",
            FieldType::Image => "image",
            FieldType::Table => "table",
        }
    }
}

/// A single field definition. Fields never change during an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Radio and checkbox fields may offer a free-text "Others" choice.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub others_option: bool,
}

impl FieldSpec {
    pub fn new(id: impl Into<FieldId>, kind: FieldType) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
            others_option: false,
        }
    }

    pub fn with_others_option(mut self) -> Self {
        self.others_option = true;
        self
    }

    /// True for radio fields whose "Others" choice is switched on.
    pub fn is_radio_with_others(&self) -> bool {
        self.kind == FieldType::Radio && self.others_option
    }
}
