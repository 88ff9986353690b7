//! Form validation primitives shared by the category and product forms.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

pub mod categories;
pub mod category_field;
pub mod products;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,
    #[error("Not a valid decimal value.")]
    InvalidNumber,
    #[error("Price must be zero or greater.")]
    Range,
    #[error("Category named {0} already exists")]
    DuplicateName(String),
    #[error("Not a valid choice.")]
    InvalidChoice,
}

/// Per-field validation messages accumulated over a whole submission.
///
/// Validation never short-circuits: every failing field contributes its
/// messages so the form can be re-rendered with all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn push(&mut self, field: &str, error: FieldError) {
        self.push_message(field, error.to_string());
    }

    pub fn push_message(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field; empty when the field passed.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = FormErrors::default();
        for (field, field_errors) in value.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_deref()
                    .unwrap_or("Invalid value.")
                    .to_string();
                errors.push_message(field.as_ref(), message);
            }
        }
        errors
    }
}
