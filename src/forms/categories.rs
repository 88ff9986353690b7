//! Category creation form.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::CategoryName;
use crate::forms::{FieldError, FormErrors};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, MatchMode};

/// Raw fields of a submitted category form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryFormData {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub name: String,
}

/// Validates a category submission against the current store.
///
/// A candidate is rejected when any stored category name contains it as a
/// substring, so "Phone" is a duplicate of an existing "Phones". The outer
/// `Result` carries repository failures; the inner one distinguishes a
/// usable name from accumulated field errors.
pub fn validate_category_form(
    data: &CategoryFormData,
    repo: &impl CategoryReader,
    mode: MatchMode,
) -> RepositoryResult<Result<CategoryName, FormErrors>> {
    let mut errors = match data.validate() {
        Ok(()) => FormErrors::default(),
        Err(validation) => validation.into(),
    };

    let name = match CategoryName::new(data.name.clone()) {
        Ok(name) => Some(name),
        Err(_) => {
            if errors.field("name").is_empty() {
                errors.push("name", FieldError::Required);
            }
            None
        }
    };

    if let Some(name) = &name
        && repo
            .find_category_by_name_fragment(name.as_str(), mode)?
            .is_some()
    {
        errors.push("name", FieldError::DuplicateName(name.to_string()));
    }

    match name {
        Some(name) if errors.is_empty() => Ok(Ok(name)),
        _ => Ok(Err(errors)),
    }
}
