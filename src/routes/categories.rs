use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::categories::CategoryDto;
use crate::dto::products::ProductDto;
use crate::forms::FormErrors;
use crate::forms::categories::CategoryFormData;
use crate::repository::{DieselRepository, MatchMode, ProductListQuery};
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::categories::{CategoryCreateOutcome, create_category, get_category, list_categories};
use crate::services::products::list_products;

#[get("/categories")]
pub async fn show_categories(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
) -> impl Responder {
    let lang = lang.into_inner();

    let categories = match list_categories(repo.get_ref()) {
        Ok(categories) => categories,
        Err(error) => return service_error_response(error),
    };
    let categories: Vec<CategoryDto> = categories.into_iter().map(Into::into).collect();

    let mut context = base_context(&messages, &lang, "categories");
    context.insert("categories", &categories);
    render_template(&tera, "categories/index.html", &context)
}

#[get("/category/{category_id}")]
pub async fn show_category(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    params: web::Path<(String, i32)>,
) -> impl Responder {
    let (lang, category_id) = params.into_inner();

    let category = match get_category(repo.get_ref(), category_id) {
        Ok(category) => category,
        Err(error) => return service_error_response(error),
    };
    let products = match list_products(
        repo.get_ref(),
        ProductListQuery::default().category(category.id),
    ) {
        Ok(products) => products,
        Err(error) => return service_error_response(error),
    };

    let category: CategoryDto = category.into();
    let products: Vec<ProductDto> = products.into_iter().map(Into::into).collect();

    let mut context = base_context(&messages, &lang, "categories");
    context.insert("category", &category);
    context.insert("products", &products);
    render_template(&tera, "categories/detail.html", &context)
}

#[get("/category-create")]
pub async fn show_category_create_form(
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
) -> impl Responder {
    let lang = lang.into_inner();
    let context = category_form_context(&messages, &lang, "", &FormErrors::default());
    render_template(&tera, "categories/create.html", &context)
}

#[post("/category-create")]
pub async fn create_category_form(
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
    form: web::Form<CategoryFormData>,
) -> impl Responder {
    let lang = lang.into_inner();
    let data = form.into_inner();

    match create_category(repo.get_ref(), &data, MatchMode::default()) {
        Ok(CategoryCreateOutcome::Created(category)) => {
            FlashMessage::success(format!("Category {} created.", category.name)).send();
            redirect(&format!("/{lang}/categories"))
        }
        Ok(CategoryCreateOutcome::Invalid(errors)) => {
            let context = category_form_context(&messages, &lang, &data.name, &errors);
            render_template(&tera, "categories/create.html", &context)
        }
        Err(error) => service_error_response(error),
    }
}

fn category_form_context(
    messages: &IncomingFlashMessages,
    lang: &str,
    name: &str,
    errors: &FormErrors,
) -> tera::Context {
    let mut context = base_context(messages, lang, "categories");
    context.insert("name", name);
    context.insert("errors", errors);
    context
}
