use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::product::Product;

#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub company: Option<String>,
    pub category_id: i32,
    pub image_path: String,
    pub created_at: NaiveDateTime,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.into_inner(),
            price: product.price.get(),
            company: product.company.map(|company| company.into_inner()),
            category_id: product.category_id.get(),
            image_path: product.image_path.into_inner(),
            created_at: product.created_at,
        }
    }
}
