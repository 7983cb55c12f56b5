use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::types::FieldEnum;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// A candidate record was rejected before reaching the store. Lists every
/// offending field, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "validation failed ({})", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

enum Slot<T> {
    Missing,
    Present(T),
    WrongType,
}

impl<T> Slot<T> {
    fn present(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::WrongType => None,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "an integer",
        Value::Number(_) => "a fractional number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accumulates field errors so a single pass reports all of them.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Required identifier; blank strings count as missing and the stored
    /// value is trimmed.
    pub fn required_text(&mut self, field: &'static str, value: Option<Value>) -> Option<String> {
        match self.slot(field, value, "a string", |v| v.as_str().map(str::to_string)) {
            Slot::Present(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Slot::Present(_) | Slot::Missing => {
                self.reject(field, "is required");
                None
            }
            Slot::WrongType => None,
        }
    }

    /// Required free text, kept as given; an empty string counts as missing.
    pub fn required_string(&mut self, field: &'static str, value: Option<Value>) -> Option<String> {
        match self.slot(field, value, "a string", |v| v.as_str().map(str::to_string)) {
            Slot::Present(text) if !text.is_empty() => Some(text),
            Slot::Present(_) | Slot::Missing => {
                self.reject(field, "is required");
                None
            }
            Slot::WrongType => None,
        }
    }

    /// Optional string; `null` and absence are the same.
    pub fn text(&mut self, field: &'static str, value: Option<Value>) -> Option<String> {
        self.slot(field, value, "a string", |v| v.as_str().map(str::to_string))
            .present()
    }

    pub fn bool(&mut self, field: &'static str, value: Option<Value>) -> Option<bool> {
        self.slot(field, value, "a boolean", Value::as_bool).present()
    }

    pub fn required_bool(&mut self, field: &'static str, value: Option<Value>) -> Option<bool> {
        match self.slot(field, value, "a boolean", Value::as_bool) {
            Slot::Present(flag) => Some(flag),
            Slot::Missing => {
                self.reject(field, "is required");
                None
            }
            Slot::WrongType => None,
        }
    }

    /// Whole numbers only; `4.5` is a type error, not a rounding case.
    pub fn int(&mut self, field: &'static str, value: Option<Value>) -> Option<i64> {
        self.slot(field, value, "an integer", Value::as_i64).present()
    }

    pub fn max_chars(&mut self, field: &'static str, value: Option<String>, max: usize) -> Option<String> {
        let value = value?;
        let len = value.chars().count();
        if len > max {
            self.reject(field, format!("must be at most {max} characters, got {len}"));
            return None;
        }
        Some(value)
    }

    pub fn range_i64(&mut self, field: &'static str, value: i64, min: i64, max: i64) -> Option<i64> {
        if value < min || value > max {
            self.reject(field, format!("must be between {min} and {max}, got {value}"));
            return None;
        }
        Some(value)
    }

    pub fn one_of<E: FieldEnum>(&mut self, field: &'static str, value: &str) -> Option<E> {
        let parsed = E::parse(value);
        if parsed.is_none() {
            self.reject(
                field,
                format!("`{value}` is not one of: {}", E::allowed_list()),
            );
        }
        parsed
    }

    pub fn required_enum<E: FieldEnum>(&mut self, field: &'static str, value: Option<Value>) -> Option<E> {
        match self.slot(field, value, "a string", |v| v.as_str().map(str::to_string)) {
            Slot::Present(raw) => self.one_of(field, &raw),
            Slot::Missing => {
                self.reject(field, "is required");
                None
            }
            Slot::WrongType => None,
        }
    }

    /// Absent values pass; a present but unknown value is recorded.
    pub fn optional_enum<E: FieldEnum>(&mut self, field: &'static str, value: Option<Value>) -> Option<E> {
        self.text(field, value).and_then(|raw| self.one_of(field, &raw))
    }

    fn slot<T>(
        &mut self,
        field: &'static str,
        value: Option<Value>,
        expected: &str,
        extract: impl FnOnce(&Value) -> Option<T>,
    ) -> Slot<T> {
        match value {
            None | Some(Value::Null) => Slot::Missing,
            Some(raw) => match extract(&raw) {
                Some(value) => Slot::Present(value),
                None => {
                    self.reject(field, format!("must be {expected}, got {}", json_kind(&raw)));
                    Slot::WrongType
                }
            },
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }

    pub fn into_error(self) -> ValidationError {
        ValidationError {
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{Gender, PhraseDialect};

    #[test]
    fn test_collects_every_offending_field() {
        let mut v = Validator::new();
        assert!(v.required_text("userId", Some(json!("   "))).is_none());
        assert!(v.one_of::<PhraseDialect>("dialect", "klingon").is_none());
        assert_eq!(v.one_of::<Gender>("gender", "female"), Some(Gender::Female));

        let err = v.finish().unwrap_err();
        assert_eq!(err.fields(), vec!["userId", "dialect"]);
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_required_text_trims() {
        let mut v = Validator::new();
        assert_eq!(v.required_text("userId", Some(json!("  u1 "))).as_deref(), Some("u1"));
        assert!(v.is_ok());
    }

    #[test]
    fn test_max_chars_counts_characters_not_bytes() {
        let mut v = Validator::new();
        let arabic = "م".repeat(1000);
        assert!(v.max_chars("description", Some(arabic), 1000).is_some());
        assert!(v.is_ok());
    }

    #[test]
    fn test_optional_enum() {
        let mut v = Validator::new();
        assert_eq!(v.optional_enum::<Gender>("gender", None), None);
        assert_eq!(v.optional_enum::<Gender>("gender", Some(Value::Null)), None);
        assert!(v.is_ok());
        assert_eq!(v.optional_enum::<Gender>("gender", Some(json!("male"))), Some(Gender::Male));
        assert_eq!(v.optional_enum::<Gender>("gender", Some(json!("Male"))), None);
        assert!(v.finish().unwrap_err().has_field("gender"));
    }

    #[test]
    fn test_wrong_json_type_is_reported_once_under_field() {
        let mut v = Validator::new();
        assert_eq!(v.required_bool("isCorrect", Some(json!("yes"))), None);
        assert_eq!(v.int("rating", Some(json!(4.5))), None);
        assert_eq!(v.required_enum::<PhraseDialect>("dialect", Some(json!(5))), None);
        assert_eq!(v.required_text("userId", Some(json!(["u1"]))), None);

        let err = v.finish().unwrap_err();
        assert_eq!(err.fields(), vec!["isCorrect", "rating", "dialect", "userId"]);
        assert_eq!(err.errors()[0].message, "must be a boolean, got a string");
        assert_eq!(err.errors()[1].message, "must be an integer, got a fractional number");
    }

    #[test]
    fn test_int_and_bool_accept_matching_types() {
        let mut v = Validator::new();
        assert_eq!(v.int("rating", Some(json!(4))), Some(4));
        assert_eq!(v.bool("isReview", Some(json!(true))), Some(true));
        assert_eq!(v.bool("isReview", None), None);
        assert!(v.is_ok());
    }
}
