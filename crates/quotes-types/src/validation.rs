//! Loading request JSON into payloads
//!
//! Every field is checked in one pass and failures are collected per field,
//! so a client sees all of its mistakes at once. Nested payloads (the author
//! inside a quote) report their failures under the parent field.

use crate::{NewAuthor, NewQuote, MAX_NAME_LEN};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const BLANK: &str = "Data not provided.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Key for errors that concern the payload as a whole
pub const SCHEMA_KEY: &str = "_schema";

/// Errors for a single field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldError {
    Messages(Vec<String>),
    Nested(FieldErrors),
}

/// Field name -> errors, serialized as a plain JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct FieldErrors(BTreeMap<String, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors for a payload that is not an object at all
    pub fn invalid_input() -> Self {
        let mut errors = Self::new();
        errors.add(SCHEMA_KEY, INVALID_INPUT);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let entry = self
            .0
            .entry(field.to_string())
            .or_insert_with(|| FieldError::Messages(Vec::new()));
        match entry {
            FieldError::Messages(messages) => messages.push(message.into()),
            FieldError::Nested(nested) => nested.add(SCHEMA_KEY, message),
        }
    }

    pub fn nest(&mut self, field: &str, errors: FieldErrors) {
        self.0.insert(field.to_string(), FieldError::Nested(errors));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn messages(&self, field: &str) -> Option<&[String]> {
        match self.0.get(field)? {
            FieldError::Messages(messages) => Some(messages),
            FieldError::Nested(_) => None,
        }
    }

    pub fn nested(&self, field: &str) -> Option<&FieldErrors> {
        match self.0.get(field)? {
            FieldError::Nested(nested) => Some(nested),
            FieldError::Messages(_) => None,
        }
    }

    fn into_result<T>(self, value: Option<T>) -> Result<T, FieldErrors> {
        match value {
            Some(value) if self.is_empty() => Ok(value),
            _ => Err(self),
        }
    }
}

impl NewAuthor {
    /// Validate `{"first": .., "last": ..}`. Output-only keys such as `id`
    /// and `formatted_name` are ignored.
    pub fn load(value: &Value) -> Result<Self, FieldErrors> {
        let obj = value.as_object().ok_or_else(FieldErrors::invalid_input)?;
        let mut errors = FieldErrors::new();

        let first = required_str(obj, "first", Some(MAX_NAME_LEN), &mut errors);
        let last = required_str(obj, "last", Some(MAX_NAME_LEN), &mut errors);

        let author = first.zip(last).map(|(first, last)| Self { first, last });
        errors.into_result(author)
    }
}

impl NewQuote {
    /// Validate `{"content": .., "author": {"first": .., "last": ..}}`.
    pub fn load(value: &Value) -> Result<Self, FieldErrors> {
        let obj = value.as_object().ok_or_else(FieldErrors::invalid_input)?;
        let mut errors = FieldErrors::new();

        let content = required_str(obj, "content", None, &mut errors);

        let author = match obj.get("author") {
            None => {
                errors.add("author", MISSING);
                None
            }
            Some(v) if is_blank(v) => {
                errors.add("author", BLANK);
                None
            }
            Some(v) => match NewAuthor::load(v) {
                Ok(author) => Some(author),
                Err(nested) => {
                    errors.nest("author", nested);
                    None
                }
            },
        };

        let quote = content
            .zip(author)
            .map(|(content, author)| Self { content, author });
        errors.into_result(quote)
    }
}

/// Empty in the sense of "no data": null, "", {}, [] or whitespace
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn required_str(
    obj: &Map<String, Value>,
    field: &str,
    max_len: Option<usize>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let message = match obj.get(field) {
        None => MISSING.to_string(),
        Some(Value::Null) => NULL.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => BLANK.to_string(),
        Some(Value::String(s)) => match max_len {
            Some(max) if s.chars().count() > max => {
                format!("Longer than maximum length {}.", max)
            }
            _ => return Some(s.clone()),
        },
        Some(_) => NOT_A_STRING.to_string(),
    };
    errors.add(field, message);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_author() {
        let author = NewAuthor::load(&json!({"first": "Ada", "last": "Lovelace"})).unwrap();
        assert_eq!(author, NewAuthor::new("Ada", "Lovelace"));
    }

    #[test]
    fn test_load_author_missing_and_blank() {
        let errors = NewAuthor::load(&json!({"last": "   "})).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.messages("first"), Some(&[MISSING.to_string()][..]));
        assert_eq!(errors.messages("last"), Some(&[BLANK.to_string()][..]));
    }

    #[test]
    fn test_load_author_wrong_types() {
        let errors = NewAuthor::load(&json!({"first": null, "last": 42})).unwrap_err();
        assert_eq!(errors.messages("first"), Some(&[NULL.to_string()][..]));
        assert_eq!(errors.messages("last"), Some(&[NOT_A_STRING.to_string()][..]));
    }

    #[test]
    fn test_load_author_name_too_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let errors = NewAuthor::load(&json!({"first": "Ada", "last": long})).unwrap_err();
        assert_eq!(
            errors.messages("last"),
            Some(&["Longer than maximum length 80.".to_string()][..])
        );
        assert!(errors.get("first").is_none());
    }

    #[test]
    fn test_load_author_ignores_output_only_fields() {
        // A dumped author resubmitted as input: id and formatted_name are dropped
        let dumped = json!({
            "id": 99,
            "first": "Ada",
            "last": "Lovelace",
            "formatted_name": "Lovelace, Ada"
        });
        let author = NewAuthor::load(&dumped).unwrap();
        assert_eq!(author, NewAuthor::new("Ada", "Lovelace"));
    }

    #[test]
    fn test_load_author_rejects_non_object() {
        let errors = NewAuthor::load(&json!(["Ada", "Lovelace"])).unwrap_err();
        assert_eq!(
            errors.messages(SCHEMA_KEY),
            Some(&[INVALID_INPUT.to_string()][..])
        );
    }

    #[test]
    fn test_load_quote() {
        let quote = NewQuote::load(&json!({
            "content": "That brain of mine is something more than merely mortal.",
            "author": {"first": "Ada", "last": "Lovelace"},
            "posted_at": "1843-01-01T00:00:00+00:00"
        }))
        .unwrap();

        assert_eq!(quote.author, NewAuthor::new("Ada", "Lovelace"));
        assert!(quote.content.starts_with("That brain"));
    }

    #[test]
    fn test_load_quote_missing_everything() {
        let errors = NewQuote::load(&json!({"id": 1})).unwrap_err();
        assert_eq!(errors.messages("content"), Some(&[MISSING.to_string()][..]));
        assert_eq!(errors.messages("author"), Some(&[MISSING.to_string()][..]));
    }

    #[test]
    fn test_load_quote_blank_author() {
        for blank in [json!(null), json!({}), json!(""), json!([])] {
            let errors =
                NewQuote::load(&json!({"content": "Hello", "author": blank})).unwrap_err();
            assert_eq!(errors.messages("author"), Some(&[BLANK.to_string()][..]));
        }
    }

    #[test]
    fn test_load_quote_nested_author_errors() {
        let errors = NewQuote::load(&json!({
            "content": "",
            "author": {"first": "Ada"}
        }))
        .unwrap_err();

        assert_eq!(errors.messages("content"), Some(&[BLANK.to_string()][..]));
        let nested = errors.nested("author").unwrap();
        assert_eq!(nested.messages("last"), Some(&[MISSING.to_string()][..]));
        assert!(nested.get("first").is_none());

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({
                "author": {"last": [MISSING]},
                "content": [BLANK]
            })
        );
    }

    #[test]
    fn test_load_quote_author_not_an_object() {
        let errors = NewQuote::load(&json!({"content": "Hi", "author": "Ada"})).unwrap_err();
        let nested = errors.nested("author").unwrap();
        assert_eq!(
            nested.messages(SCHEMA_KEY),
            Some(&[INVALID_INPUT.to_string()][..])
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!("  ")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
        assert!(!is_blank(&json!({"a": 1})));
    }
}
