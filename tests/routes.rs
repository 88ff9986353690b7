use actix_web::cookie::Key;
use actix_web::{App, test, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use catalog_web::domain::category::NewCategory;
use catalog_web::domain::product::NewProduct;
use catalog_web::domain::types::{
    CategoryId, CategoryName, CompanyName, ImagePath, ProductName, ProductPrice,
};
use catalog_web::models::config::ServerConfig;
use catalog_web::repository::{CategoryWriter, DieselRepository, ProductWriter};

mod common;

const BOUNDARY: &str = "----catalogtestboundary";

macro_rules! init_app {
    ($pool:expr, $upload_dir:expr) => {{
        let repo = DieselRepository::new($pool);
        let tera = Tera::new("templates/**/*.html").expect("templates should parse");
        let config = ServerConfig {
            database_url: String::new(),
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            upload_dir: $upload_dir,
            default_lang: "en".to_string(),
            secret_key: None,
        };
        let message_store = CookieMessageStore::builder(Key::generate()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();
        test::init_service(
            App::new()
                .wrap(message_framework)
                .app_data(web::Data::new(repo))
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new(config))
                .service(catalog_web::routes::main::index)
                .service(
                    web::scope("/{lang}")
                        .service(catalog_web::routes::main::home)
                        .service(catalog_web::routes::products::show_products)
                        .service(catalog_web::routes::products::search)
                        .service(catalog_web::routes::products::show_product_create_form)
                        .service(catalog_web::routes::products::create_product_form)
                        .service(catalog_web::routes::categories::show_categories)
                        .service(catalog_web::routes::categories::show_category_create_form)
                        .service(catalog_web::routes::categories::create_category_form)
                        .service(catalog_web::routes::categories::show_category),
                ),
        )
        .await
    }};
    ($pool:expr) => {
        init_app!($pool, "media".to_string())
    };
}

fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

fn seed_category(pool: catalog_web::db::DbPool, name: &str) -> CategoryId {
    let repo = DieselRepository::new(pool);
    repo.create_category(&NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
    })
    .expect("should create category")
    .id
}

fn seed_product(pool: catalog_web::db::DbPool, name: &str, category_id: CategoryId) {
    let repo = DieselRepository::new(pool);
    repo.create_product(&NewProduct {
        name: ProductName::new(name).expect("valid product name"),
        price: ProductPrice::new(599.0).expect("valid price"),
        company: Some(CompanyName::new("Acme").expect("valid company")),
        category_id,
        image_path: ImagePath::new("/media/test.png").expect("valid image path"),
    })
    .expect("should create product");
}

#[actix_web::test]
async fn home_page_renders() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::get().uri("/en/home").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn root_redirects_to_default_language_home() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").expect("location header"),
        "/en/home"
    );
}

#[actix_web::test]
async fn empty_category_form_reports_required_name() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::post()
        .uri("/en/category-create")
        .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
        .set_payload("name=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("This field is required."));
}

#[actix_web::test]
async fn category_creation_redirects_and_lists() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::post()
        .uri("/en/category-create")
        .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
        .set_payload("name=Phones")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").expect("location header"),
        "/en/categories"
    );

    let req = test::TestRequest::get().uri("/en/categories").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(String::from_utf8_lossy(&body).contains("Phones"));
}

#[actix_web::test]
async fn duplicate_category_is_rejected_with_message() {
    let test_db = common::TestDb::new();
    seed_category(test_db.pool(), "Phones");
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::post()
        .uri("/en/category-create")
        .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
        .set_payload("name=Phone")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Category named Phone already exists"));
}

#[actix_web::test]
async fn category_detail_shows_its_products() {
    let test_db = common::TestDb::new();
    let phones = seed_category(test_db.pool(), "Phones");
    let tablets = seed_category(test_db.pool(), "Tablets");
    seed_product(test_db.pool(), "iPhone 5", phones);
    seed_product(test_db.pool(), "iPad Air", tablets);
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::get()
        .uri(&format!("/en/category/{phones}"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("iPhone 5"));
    assert!(!body.contains("iPad Air"));
}

#[actix_web::test]
async fn unknown_category_detail_is_404() {
    let test_db = common::TestDb::new();
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::get().uri("/en/category/99").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn empty_product_form_reports_every_required_field() {
    let test_db = common::TestDb::new();
    seed_category(test_db.pool(), "Phones");
    let app = init_app!(test_db.pool());

    let (content_type, body) = multipart_body(&[], None);
    let req = test::TestRequest::post()
        .uri("/en/product-create")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let body = String::from_utf8_lossy(&body);
    assert_eq!(body.matches("This field is required.").count(), 4);
}

#[actix_web::test]
async fn valid_product_submission_creates_and_redirects() {
    let test_db = common::TestDb::new();
    let phones = seed_category(test_db.pool(), "Phones");
    let upload_dir = tempfile::tempdir().expect("should create upload dir");
    let app = init_app!(
        test_db.pool(),
        upload_dir.path().to_str().expect("utf-8 path").to_string()
    );

    let (content_type, body) = multipart_body(
        &[
            ("name", "iPhone 5"),
            ("price", "699.99"),
            ("company", "Apple"),
            ("category", &phones.to_string()),
        ],
        Some(("iphone.png", b"fake png bytes")),
    );
    let req = test::TestRequest::post()
        .uri("/en/product-create")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("Location").expect("location header"),
        "/en/products"
    );

    let stored: Vec<_> = std::fs::read_dir(upload_dir.path())
        .expect("should read upload dir")
        .collect();
    assert_eq!(stored.len(), 1);

    let req = test::TestRequest::get().uri("/en/products").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(String::from_utf8_lossy(&body).contains("iPhone 5"));
}

#[actix_web::test]
async fn unknown_category_choice_is_rejected() {
    let test_db = common::TestDb::new();
    seed_category(test_db.pool(), "Phones");
    let app = init_app!(test_db.pool());

    let (content_type, body) = multipart_body(
        &[
            ("name", "iPhone 5"),
            ("price", "699.99"),
            ("category", "42"),
        ],
        Some(("iphone.png", b"fake png bytes")),
    );
    let req = test::TestRequest::post()
        .uri("/en/product-create")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Not a valid choice."));
}

#[actix_web::test]
async fn negative_price_is_rejected() {
    let test_db = common::TestDb::new();
    let phones = seed_category(test_db.pool(), "Phones");
    let app = init_app!(test_db.pool());

    let (content_type, body) = multipart_body(
        &[
            ("name", "iPhone 5"),
            ("price", "-1"),
            ("category", &phones.to_string()),
        ],
        Some(("iphone.png", b"fake png bytes")),
    );
    let req = test::TestRequest::post()
        .uri("/en/product-create")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Price must be zero or greater."));
}

#[actix_web::test]
async fn search_matches_name_substrings() {
    let test_db = common::TestDb::new();
    let phones = seed_category(test_db.pool(), "Phones");
    seed_product(test_db.pool(), "iPhone 5", phones);
    seed_product(test_db.pool(), "Galaxy S5", phones);
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::get()
        .uri("/en/product-search?name=iPhone")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("iPhone 5"));
    assert!(!body.contains("Galaxy S5"));

    let req = test::TestRequest::get()
        .uri("/en/product-search?name=iPhone%205")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert!(String::from_utf8_lossy(&body).contains("iPhone 5"));
}

#[actix_web::test]
async fn blank_search_lists_every_product() {
    let test_db = common::TestDb::new();
    let phones = seed_category(test_db.pool(), "Phones");
    seed_product(test_db.pool(), "iPhone 5", phones);
    seed_product(test_db.pool(), "Galaxy S5", phones);
    let app = init_app!(test_db.pool());

    let req = test::TestRequest::get()
        .uri("/en/product-search?name=")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("iPhone 5"));
    assert!(body.contains("Galaxy S5"));
}
