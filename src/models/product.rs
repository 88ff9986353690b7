use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{Product as DomainProduct, NewProduct as DomainNewProduct};
use crate::domain::types::{CompanyName, ImagePath, ProductName, ProductPrice, TypeConstraintError};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub company: Option<String>,
    pub category_id: i32,
    pub image_path: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Product`]; timestamps use the table defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub company: Option<String>,
    pub category_id: i32,
    pub image_path: String,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            name: ProductName::new(product.name)?,
            price: ProductPrice::new(product.price)?,
            company: product.company.map(CompanyName::new).transpose()?,
            category_id: product.category_id.try_into()?,
            image_path: ImagePath::new(product.image_path)?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            name: product.name.into_inner(),
            price: product.price.get(),
            company: product.company.map(CompanyName::into_inner),
            category_id: product.category_id.get(),
            image_path: product.image_path.into_inner(),
        }
    }
}
