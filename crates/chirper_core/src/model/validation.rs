//! Declarative field validation.
//!
//! # Responsibility
//! - Describe per-field rules as an ordered list of named predicates.
//! - Collect every failing rule under its field key in one pass.
//!
//! # Invariants
//! - Rules are evaluated in declaration order (`required` before `max`).
//! - Validation is pure: it never touches storage.

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form field carrying chirp text.
pub const MESSAGE_FIELD: &str = "message";
/// Inclusive upper bound for chirp text, in characters.
pub const MESSAGE_MAX_CHARS: usize = 255;

/// Rules applied to the chirp `message` field.
pub const MESSAGE_RULES: &[Rule] = &[Rule::Required, Rule::MaxChars(MESSAGE_MAX_CHARS)];

/// One named validation predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty after trimming whitespace.
    Required,
    /// Value must not exceed the given number of characters.
    MaxChars(usize),
}

impl Rule {
    /// Stable rule name, as used in form rule declarations.
    pub fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MaxChars(_) => "max",
        }
    }

    /// Returns whether `value` satisfies this rule.
    pub fn passes(self, value: &str) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::MaxChars(max) => value.chars().count() <= max,
        }
    }

    /// User-facing failure message for `field`.
    pub fn failure_message(self, field: &str) -> String {
        let label = field.replace('_', " ");
        match self {
            Self::Required => format!("The {label} field is required."),
            Self::MaxChars(max) => {
                format!("The {label} field must not be greater than {max} characters.")
            }
        }
    }
}

/// Field-keyed validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one failure message for `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns whether at least one failure is recorded for `field`.
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Failure messages for `field`, in rule order.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// Field names with at least one failure, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Evaluates `rules` against one field value and records every failure.
pub fn validate_field(errors: &mut ValidationErrors, field: &str, value: &str, rules: &[Rule]) {
    for rule in rules {
        if !rule.passes(value) {
            errors.add(field, rule.failure_message(field));
        }
    }
}

/// Strips surrounding whitespace from submitted chirp text.
///
/// Applied once at the input boundary; rules and storage see the result.
pub fn normalize_message(value: &str) -> &str {
    value.trim()
}

/// Validates chirp text against [`MESSAGE_RULES`].
///
/// # Errors
/// - Returns every failing rule under the `message` key.
pub fn validate_message(message: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    validate_field(&mut errors, MESSAGE_FIELD, message, MESSAGE_RULES);
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_message, validate_field, validate_message, Rule, ValidationErrors,
        MESSAGE_FIELD,
    };

    #[test]
    fn accepts_message_at_max_length() {
        assert!(validate_message(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn rejects_message_over_max_length() {
        let errors = validate_message(&"a".repeat(256)).expect_err("256 chars must fail");
        assert_eq!(
            errors.get(MESSAGE_FIELD),
            ["The message field must not be greater than 255 characters."]
        );
    }

    #[test]
    fn rejects_empty_and_whitespace_only_message() {
        for input in ["", "   ", "\n\t"] {
            let errors = validate_message(input).expect_err("blank message must fail");
            assert_eq!(errors.get(MESSAGE_FIELD), ["The message field is required."]);
        }
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let padded = format!("  {}\n", "a".repeat(255));
        assert!(validate_message(normalize_message(&padded)).is_ok());

        let padded = format!(" {}", "a".repeat(256));
        assert!(validate_message(normalize_message(&padded)).is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let message = "é".repeat(255);
        assert!(message.len() > 255);
        assert!(validate_message(&message).is_ok());
    }

    #[test]
    fn reports_every_failing_rule_in_declaration_order() {
        let mut errors = ValidationErrors::new();
        validate_field(
            &mut errors,
            "body",
            "    ",
            &[Rule::Required, Rule::MaxChars(2)],
        );
        assert_eq!(
            errors.get("body"),
            [
                "The body field is required.",
                "The body field must not be greater than 2 characters."
            ]
        );
        assert!(!errors.has(MESSAGE_FIELD));
    }

    #[test]
    fn display_lists_field_and_message() {
        let errors = validate_message("").expect_err("empty message must fail");
        assert_eq!(errors.to_string(), "message: The message field is required.");
    }
}
