use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product};
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProductListQuery, ProductReader, ProductWriter};

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items = items.filter(products::category_id.eq(category_id.get()));
        }

        if let Some(search) = &query.search {
            // LIKE narrows the candidate set; the `contains` pass below keeps
            // the match case-sensitive, which SQLite LIKE alone is not.
            items = items.filter(products::name.like(format!("%{search}%")));
        }

        let mut items = items
            .order(products::id.asc())
            .load::<DbProduct>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Product>, _>>()?;

        if let Some(search) = &query.search {
            items.retain(|product: &Product| product.name.as_str().contains(search.as_str()));
        }

        Ok(items)
    }

}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();

        let created: DbProduct = diesel::insert_into(products::table)
            .values(db_product)
            .get_result(&mut conn)?;

        Ok(created.try_into()?)
    }
}
