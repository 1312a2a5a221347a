pub mod field;
pub mod form;
pub mod rule;

pub use field::{FieldId, FieldSpec, FieldType};
pub use form::FormSpec;
pub use rule::{Comparison, Condition, LogicRule, RuleEffect};
