use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use catalog_web::db::establish_connection_pool;
use catalog_web::models::config::ServerConfig;
use catalog_web::repository::DieselRepository;
use catalog_web::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::load().map_err(std::io::Error::other)?;

    let pool = establish_connection_pool(&config.database_url).map_err(std::io::Error::other)?;
    let repo = DieselRepository::new(pool);

    let tera = Tera::new("templates/**/*.html").map_err(std::io::Error::other)?;

    let secret_key = match &config.secret_key {
        Some(secret) => Key::derive_from(secret.as_bytes()),
        None => Key::generate(),
    };
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (config.bind_address.clone(), config.port);
    let upload_dir = config.upload_dir.clone();

    log::info!(
        "starting catalog server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(routes::main::index)
            .service(Files::new("/media", upload_dir.clone()))
            .service(
                web::scope("/{lang}")
                    .service(routes::main::home)
                    .service(routes::products::show_products)
                    .service(routes::products::search)
                    .service(routes::products::show_product_create_form)
                    .service(routes::products::create_product_form)
                    .service(routes::categories::show_categories)
                    .service(routes::categories::show_category_create_form)
                    .service(routes::categories::create_category_form)
                    .service(routes::categories::show_category),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
