//! Product listing, search and creation, including image storage.

use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use chrono::Utc;

use crate::domain::product::Product;
use crate::domain::types::ImagePath;
use crate::forms::FormErrors;
use crate::forms::products::{CreateProductForm, validate_product_form};
use crate::repository::{CategoryReader, ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Outcome of a product creation attempt.
pub enum ProductCreateOutcome {
    Created(Product),
    Invalid(FormErrors),
}

pub fn list_products(
    repo: &impl ProductReader,
    query: ProductListQuery,
) -> ServiceResult<Vec<Product>> {
    Ok(repo.list_products(query)?)
}

/// Case-sensitive substring search over product names.
///
/// A blank term matches everything.
pub fn search_products(repo: &impl ProductReader, term: &str) -> ServiceResult<Vec<Product>> {
    let term = term.trim();
    let query = if term.is_empty() {
        ProductListQuery::default()
    } else {
        ProductListQuery::default().search(term)
    };
    Ok(repo.list_products(query)?)
}

pub fn create_product(
    repo: &(impl CategoryReader + ProductWriter),
    form: CreateProductForm,
    upload_dir: &Path,
) -> ServiceResult<ProductCreateOutcome> {
    let values = form.values();
    let payload = match validate_product_form(&values, repo)? {
        Ok(payload) => payload,
        Err(errors) => return Ok(ProductCreateOutcome::Invalid(errors)),
    };

    // Validation guarantees a non-empty upload is present.
    let image = form.image.ok_or(ServiceError::Internal)?;
    let image_path = store_product_image(&image, upload_dir)?;

    let created = repo.create_product(&payload.into_new_product(image_path))?;
    Ok(ProductCreateOutcome::Created(created))
}

/// Copies an uploaded image into `upload_dir` under a timestamped name and
/// returns its public `/media/...` path.
fn store_product_image(image: &TempFile, upload_dir: &Path) -> ServiceResult<ImagePath> {
    std::fs::create_dir_all(upload_dir).map_err(|error| {
        log::error!("failed to create upload directory: {error}");
        ServiceError::Internal
    })?;

    let original = image.file_name.as_deref().unwrap_or("upload");
    let file_name = format!(
        "{}_{}",
        Utc::now().timestamp_millis(),
        sanitize_file_name(original)
    );

    let destination = upload_dir.join(&file_name);
    std::fs::copy(image.file.path(), &destination).map_err(|error| {
        log::error!("failed to store uploaded image: {error}");
        ServiceError::Internal
    })?;

    ImagePath::new(format!("/media/{file_name}")).map_err(|error| {
        log::error!("invalid image path: {error}");
        ServiceError::Internal
    })
}

/// Keeps ASCII alphanumerics, dots, dashes and underscores; everything else
/// becomes an underscore.
fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}
