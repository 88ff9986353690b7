//! Category listing, lookup and creation.

use crate::domain::category::{Category, NewCategory};
use crate::forms::FormErrors;
use crate::forms::categories::{CategoryFormData, validate_category_form};
use crate::repository::{CategoryReader, CategoryWriter, MatchMode};
use crate::services::{ServiceError, ServiceResult};

/// Outcome of a category creation attempt.
pub enum CategoryCreateOutcome {
    Created(Category),
    Invalid(FormErrors),
}

pub fn list_categories(repo: &impl CategoryReader) -> ServiceResult<Vec<Category>> {
    Ok(repo.list_categories()?)
}

pub fn get_category(repo: &impl CategoryReader, category_id: i32) -> ServiceResult<Category> {
    let id = category_id
        .try_into()
        .map_err(|_| ServiceError::NotFound)?;
    repo.get_category_by_id(id)?.ok_or(ServiceError::NotFound)
}

pub fn create_category(
    repo: &(impl CategoryReader + CategoryWriter),
    data: &CategoryFormData,
    mode: MatchMode,
) -> ServiceResult<CategoryCreateOutcome> {
    match validate_category_form(data, repo, mode)? {
        Ok(name) => {
            let created = repo.create_category(&NewCategory { name })?;
            Ok(CategoryCreateOutcome::Created(created))
        }
        Err(errors) => Ok(CategoryCreateOutcome::Invalid(errors)),
    }
}
