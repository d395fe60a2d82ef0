//! Declarative form validation.
//!
//! A [`RuleSet`] lists, per field, the rules a submitted value must satisfy.
//! Validation reports at most one message per field: the first rule that
//! fails, in declaration order.
//!
//! ```rust
//! use newsdesk::Form;
//! use newsdesk::validation::{Rule, RuleSet};
//!
//! let rules = RuleSet::new()
//!     .field("title", [Rule::Required, Rule::MaxLength(255), Rule::MinLength(3)]);
//!
//! let form: Form = [("title", "Hi")].into_iter().collect();
//! let errors = rules.validate(&form).unwrap_err();
//! assert_eq!(
//!     errors.get("title"),
//!     Some("The title field must be at least 3 characters in length."),
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::form::Form;

/// A single constraint on a field value. Lengths count characters, not bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    /// Present and not blank once surrounding whitespace is trimmed.
    Required,
    MinLength(usize),
    MaxLength(usize),
}

impl Rule {
    /// `None` when `value` passes, otherwise the message shown to the user.
    fn check(self, field: &str, value: &str) -> Option<String> {
        match self {
            Self::Required if value.trim().is_empty() => {
                Some(format!("The {field} field is required."))
            }
            Self::MinLength(min) if value.chars().count() < min => Some(format!(
                "The {field} field must be at least {min} characters in length."
            )),
            Self::MaxLength(max) if value.chars().count() > max => Some(format!(
                "The {field} field cannot exceed {max} characters in length."
            )),
            _ => None,
        }
    }
}

/// Rules per field, checked in the order fields were added.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    fields: Vec<(String, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name.to_owned(), rules.into_iter().collect()));
        self
    }

    /// Checks `input` against every field's rules. Absent fields are read as
    /// `""`. The input is never modified.
    pub fn validate(&self, input: &Form) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for (field, rules) in &self.fields {
            let value = input.value(field);
            if let Some(message) = rules.iter().find_map(|rule| rule.check(field, value)) {
                errors.insert(field, message);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Field name → the one message explaining why it was rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// A single failure on `field`.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(field, message.into());
        errors
    }

    fn insert(&mut self, field: &str, message: String) {
        self.messages.insert(field.to_owned(), message);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.messages.get(field).map(String::as_str)
    }

    /// Messages ordered by field name.
    pub fn messages(&self) -> Vec<&str> {
        self.messages.values().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize { self.messages.len() }
    pub fn is_empty(&self) -> bool { self.messages.is_empty() }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> Form {
        pairs.iter().copied().collect()
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .field("title", [Rule::Required, Rule::MaxLength(5), Rule::MinLength(3)])
            .field("body", [Rule::Required, Rule::MinLength(2)])
    }

    #[test]
    fn valid_input_passes() {
        assert_eq!(rules().validate(&form(&[("title", "abcd"), ("body", "xy")])), Ok(()));
    }

    #[test]
    fn absent_fields_fail_required() {
        let errors = rules().validate(&Form::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("title"), Some("The title field is required."));
        assert_eq!(errors.get("body"), Some("The body field is required."));
    }

    #[test]
    fn blank_value_fails_required_not_min_length() {
        let errors = rules().validate(&form(&[("title", "    "), ("body", "ok")])).unwrap_err();
        assert_eq!(errors.get("title"), Some("The title field is required."));
        assert_eq!(errors.get("body"), None);
    }

    #[test]
    fn first_failing_rule_wins() {
        let errors = rules().validate(&form(&[("title", "ab"), ("body", "ok")])).unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some("The title field must be at least 3 characters in length.")
        );

        let errors = rules().validate(&form(&[("title", "abcdef"), ("body", "ok")])).unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some("The title field cannot exceed 5 characters in length.")
        );
    }

    #[test]
    fn lengths_count_characters() {
        // five characters, ten bytes
        assert_eq!(rules().validate(&form(&[("title", "ééééé"), ("body", "ok")])), Ok(()));
    }

    #[test]
    fn input_is_untouched() {
        let input = form(&[("title", " x "), ("body", "")]);
        let before = input.clone();
        let _ = rules().validate(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn serializes_as_field_map() {
        let errors = ValidationErrors::single("title", "nope");
        assert_eq!(serde_json::to_string(&errors).unwrap(), r#"{"title":"nope"}"#);
    }
}
