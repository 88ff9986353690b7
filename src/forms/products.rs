//! Product creation form handling multipart submissions.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use serde::Serialize;

use crate::domain::product::NewProduct;
use crate::domain::types::{CategoryId, CompanyName, ImagePath, ProductName, ProductPrice};
use crate::forms::category_field::CategoryChoiceField;
use crate::forms::{FieldError, FormErrors};
use crate::repository::CategoryReader;
use crate::repository::errors::RepositoryResult;

/// Multipart payload of the product creation form.
///
/// Every field is optional at the transport level so that a partially
/// filled submission still reaches validation and collects an error for
/// each missing field instead of being rejected by the extractor.
#[derive(Debug, MultipartForm)]
pub struct CreateProductForm {
    pub name: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub company: Option<Text<String>>,
    pub category: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

impl CreateProductForm {
    pub fn values(&self) -> ProductFormValues {
        ProductFormValues {
            name: text_value(&self.name),
            price: text_value(&self.price),
            company: text_value(&self.company),
            category: text_value(&self.category),
            has_image: self.image.as_ref().is_some_and(|file| file.size > 0),
        }
    }
}

/// Trimmed text fields of a product submission, decoupled from multipart.
#[derive(Debug, Clone, Default)]
pub struct ProductFormValues {
    pub name: Option<String>,
    pub price: Option<String>,
    pub company: Option<String>,
    pub category: Option<String>,
    pub has_image: bool,
}

/// Field values echoed back into a re-rendered form, with absent fields
/// shown as empty strings.
#[derive(Debug, Serialize)]
pub struct ProductFormDisplay {
    pub name: String,
    pub price: String,
    pub company: String,
}

impl From<&ProductFormValues> for ProductFormDisplay {
    fn from(values: &ProductFormValues) -> Self {
        Self {
            name: values.name.clone().unwrap_or_default(),
            price: values.price.clone().unwrap_or_default(),
            company: values.company.clone().unwrap_or_default(),
        }
    }
}

/// A fully validated product submission, still awaiting its stored image.
#[derive(Debug, Clone)]
pub struct CreateProductPayload {
    pub name: ProductName,
    pub price: ProductPrice,
    pub company: Option<CompanyName>,
    pub category_id: CategoryId,
}

impl CreateProductPayload {
    pub fn into_new_product(self, image_path: ImagePath) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
            company: self.company,
            category_id: self.category_id,
            image_path,
        }
    }
}

fn text_value(field: &Option<Text<String>>) -> Option<String> {
    field
        .as_ref()
        .map(|text| text.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Validates a product submission, accumulating errors across all fields.
pub fn validate_product_form(
    values: &ProductFormValues,
    repo: &impl CategoryReader,
) -> RepositoryResult<Result<CreateProductPayload, FormErrors>> {
    let mut errors = FormErrors::default();

    let name = match &values.name {
        Some(name) => ProductName::new(name.clone()).ok(),
        None => None,
    };
    if name.is_none() {
        errors.push("name", FieldError::Required);
    }

    let price = match &values.price {
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) => match ProductPrice::new(value) {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.push("price", FieldError::Range);
                    None
                }
            },
            Err(_) => {
                errors.push("price", FieldError::InvalidNumber);
                None
            }
        },
        None => {
            errors.push("price", FieldError::Required);
            None
        }
    };

    let company = match &values.company {
        Some(company) => CompanyName::new(company.clone()).ok(),
        None => None,
    };

    let submitted_category = match &values.category {
        Some(raw) => match raw.parse::<i32>() {
            Ok(id) => Some(Some(id)),
            Err(_) => None,
        },
        None => Some(None),
    };
    let category_id = match submitted_category {
        Some(submitted) => {
            let field = CategoryChoiceField::new(repo);
            match field.validate(submitted)? {
                Ok(id) => Some(id),
                Err(error) => {
                    errors.push("category", error);
                    None
                }
            }
        }
        None => {
            errors.push("category", FieldError::InvalidChoice);
            None
        }
    };

    if !values.has_image {
        errors.push("image", FieldError::Required);
    }

    match (name, price, category_id) {
        (Some(name), Some(price), Some(category_id)) if errors.is_empty() => {
            Ok(Ok(CreateProductPayload {
                name,
                price,
                company,
                category_id,
            }))
        }
        _ => Ok(Err(errors)),
    }
}
