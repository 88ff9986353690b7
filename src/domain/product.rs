use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, CompanyName, ImagePath, ProductId, ProductName, ProductPrice,
};

/// A catalog product referencing exactly one [`crate::domain::category::Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: ProductPrice,
    pub company: Option<CompanyName>,
    pub category_id: CategoryId,
    /// Path under which the uploaded product image is served.
    pub image_path: ImagePath,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: ProductPrice,
    pub company: Option<CompanyName>,
    pub category_id: CategoryId,
    pub image_path: ImagePath,
}
