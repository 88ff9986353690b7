use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.get(),
            name: category.name.into_inner(),
            created_at: category.created_at,
        }
    }
}
