use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::dto::products::ProductDto;
use crate::forms::FormErrors;
use crate::forms::category_field::CategoryChoiceField;
use crate::forms::products::{CreateProductForm, ProductFormDisplay, ProductFormValues};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, ProductListQuery};
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ServiceError;
use crate::services::products::{
    ProductCreateOutcome, create_product, list_products, search_products,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    name: String,
}

#[get("/products")]
pub async fn show_products(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
) -> impl Responder {
    let lang = lang.into_inner();

    let products = match list_products(repo.get_ref(), ProductListQuery::default()) {
        Ok(products) => products,
        Err(error) => return service_error_response(error),
    };
    let products: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

    let mut context = base_context(&messages, &lang, "products");
    context.insert("products", &products);
    context.insert("search", "");
    render_template(&tera, "products/index.html", &context)
}

#[get("/product-search")]
pub async fn search(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let lang = lang.into_inner();
    let term = query.into_inner().name;

    let products = match search_products(repo.get_ref(), &term) {
        Ok(products) => products,
        Err(error) => return service_error_response(error),
    };
    let products: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

    let mut context = base_context(&messages, &lang, "products");
    context.insert("products", &products);
    context.insert("search", term.trim());
    render_template(&tera, "products/index.html", &context)
}

#[get("/product-create")]
pub async fn show_product_create_form(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
) -> impl Responder {
    let lang = lang.into_inner();
    product_form_page(
        &repo,
        &tera,
        &messages,
        &lang,
        &ProductFormValues::default(),
        &FormErrors::default(),
    )
}

#[post("/product-create")]
pub async fn create_product_form(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    config: web::Data<ServerConfig>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
    form: MultipartForm<CreateProductForm>,
) -> impl Responder {
    let lang = lang.into_inner();
    let form = form.into_inner();
    let values = form.values();

    match create_product(repo.get_ref(), form, config.upload_dir.as_ref()) {
        Ok(ProductCreateOutcome::Created(product)) => {
            FlashMessage::success(format!("Product {} created.", product.name)).send();
            redirect(&format!("/{lang}/products"))
        }
        Ok(ProductCreateOutcome::Invalid(errors)) => {
            product_form_page(&repo, &tera, &messages, &lang, &values, &errors)
        }
        Err(error) => service_error_response(error),
    }
}

/// Renders the product form, rebuilding the category radio options from the
/// store so they are current at display time.
fn product_form_page(
    repo: &DieselRepository,
    tera: &Tera,
    messages: &IncomingFlashMessages,
    lang: &str,
    values: &ProductFormValues,
    errors: &FormErrors,
) -> actix_web::HttpResponse {
    let selected = values
        .category
        .as_deref()
        .and_then(|raw| raw.parse::<i32>().ok());
    let category_field = CategoryChoiceField::new(repo).with_selected(selected);
    let category_field = match category_field.render() {
        Ok(html) => html,
        Err(error) => return service_error_response(ServiceError::from(error)),
    };

    let mut context = base_context(messages, lang, "products");
    context.insert("values", &ProductFormDisplay::from(values));
    context.insert("errors", errors);
    context.insert("category_field", &category_field);
    render_template(tera, "products/create.html", &context)
}
