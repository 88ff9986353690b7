//! Category selection backed by the live category set.

use crate::domain::types::CategoryId;
use crate::forms::FieldError;
use crate::repository::CategoryReader;
use crate::repository::errors::RepositoryResult;

/// One selectable option produced by [`CategoryChoiceField::choices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoice {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

/// A selection field whose option list is the current category set.
///
/// The backing repository is queried afresh on every call to [`choices`],
/// [`render`] and [`validate`], so the options always reflect the store at
/// the moment of use: a category created after the form was rendered is a
/// valid submission, and one removed in the meantime is not. Nothing is
/// memoized.
///
/// [`choices`]: CategoryChoiceField::choices
/// [`render`]: CategoryChoiceField::render
/// [`validate`]: CategoryChoiceField::validate
pub struct CategoryChoiceField<'a, R> {
    repo: &'a R,
    selected: Option<i32>,
}

impl<'a, R: CategoryReader> CategoryChoiceField<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            selected: None,
        }
    }

    /// Bind the currently selected category id, pre-checking its option.
    pub fn with_selected(mut self, selected: Option<i32>) -> Self {
        self.selected = selected;
        self
    }

    /// Enumerate the current options as (value, label, selected) choices.
    pub fn choices(&self) -> RepositoryResult<Vec<CategoryChoice>> {
        let categories = self.repo.list_categories()?;
        Ok(categories
            .into_iter()
            .map(|category| CategoryChoice {
                value: category.id.get(),
                label: category.name.into_inner(),
                selected: Some(category.id.get()) == self.selected,
            })
            .collect())
    }

    /// Render the options as one radio input per category.
    pub fn render(&self) -> RepositoryResult<String> {
        let mut inputs = Vec::new();
        for choice in self.choices()? {
            let checked = if choice.selected { " checked" } else { "" };
            inputs.push(format!(
                "<input type=\"radio\" name=\"category\" value=\"{}\"{}> {}",
                choice.value,
                checked,
                escape_html(&choice.label),
            ));
        }
        Ok(inputs.join(" "))
    }

    /// Check a submitted id against the categories stored right now.
    pub fn validate(
        &self,
        submitted: Option<i32>,
    ) -> RepositoryResult<Result<CategoryId, FieldError>> {
        let Some(submitted) = submitted else {
            return Ok(Err(FieldError::Required));
        };

        for choice in self.choices()? {
            if choice.value == submitted {
                return Ok(CategoryId::new(submitted).map_err(|_| FieldError::InvalidChoice));
            }
        }

        Ok(Err(FieldError::InvalidChoice))
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
