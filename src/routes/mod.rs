//! HTTP handlers and shared response helpers.

use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::services::ServiceError;

pub mod categories;
pub mod main;
pub mod products;

fn alert_level_to_str(level: Level) -> &'static str {
    match level {
        Level::Success => "success",
        Level::Warning => "warning",
        Level::Error => "danger",
        _ => "info",
    }
}

/// Template context pre-populated with flash alerts, the active language
/// and the current page marker used by the navigation bar.
pub fn base_context(messages: &IncomingFlashMessages, lang: &str, current_page: &str) -> Context {
    let alerts: Vec<(String, &str)> = messages
        .iter()
        .map(|message| (message.content().to_string(), alert_level_to_str(message.level())))
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("lang", lang);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(error) => {
            log::error!("failed to render template {name}: {error}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .append_header(("Location", location))
        .finish()
}

fn service_error_response(error: ServiceError) -> HttpResponse {
    match error {
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}
