use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};

#[get("/")]
pub async fn index(config: web::Data<ServerConfig>) -> impl Responder {
    redirect(&format!("/{}/home", config.default_lang))
}

#[get("/home")]
pub async fn home(
    tera: web::Data<Tera>,
    messages: IncomingFlashMessages,
    lang: web::Path<String>,
) -> impl Responder {
    let lang = lang.into_inner();
    let context = base_context(&messages, &lang, "home");
    render_template(&tera, "main/home.html", &context)
}
