use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, MatchMode};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn find_category_by_name_fragment(
        &self,
        fragment: &str,
        mode: MatchMode,
    ) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // SQLite LIKE is ASCII-case-insensitive, so the containment check
        // runs in Rust over the loaded rows instead.
        let rows = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?;

        for row in rows {
            let hit = match mode {
                MatchMode::CaseSensitive => row.name.contains(fragment),
                MatchMode::CaseInsensitive => {
                    row.name.to_lowercase().contains(&fragment.to_lowercase())
                }
            };
            if hit {
                return Ok(Some(row.try_into()?));
            }
        }

        Ok(None)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created: DbCategory = diesel::insert_into(categories::table)
            .values(db_category)
            .get_result(&mut conn)?;

        Ok(created.try_into()?)
    }
}
