//! Integration tests for the Folio HTTP API.
//!
//! Uses axum-test against an in-memory store.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::{TestRequest, TestServer};
use folio::api::{AppState, build_router};
use folio::config::ServerConfig;
use folio_core::Store;
use serde_json::{Value, json};
use std::num::NonZeroU32;

const KEY: &str = "s3cret-admin-key";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn config() -> ServerConfig {
    ServerConfig {
        admin_key: Some(KEY.to_string()),
        ..ServerConfig::default()
    }
}

fn server_with(store: Store, config: &ServerConfig) -> TestServer {
    let state = AppState::new(store, config);
    TestServer::new(build_router(state, config)).unwrap()
}

fn server() -> TestServer {
    server_with(Store::open_in_memory().unwrap(), &config())
}

fn lang(request: TestRequest, code: &'static str) -> TestRequest {
    request.add_header(header::ACCEPT_LANGUAGE, HeaderValue::from_static(code))
}

fn admin(request: TestRequest) -> TestRequest {
    request.add_header(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {KEY}")).unwrap(),
    )
}

fn content_language(response: &axum_test::TestResponse) -> Option<String> {
    response
        .headers()
        .get(header::CONTENT_LANGUAGE)
        .map(|v| v.to_str().unwrap().to_string())
}

async fn add_language(server: &TestServer, code: &str, name: &str) {
    admin(server.post("/language"))
        .json(&json!({ "iso639_1": code, "name": name }))
        .await
        .assert_status(StatusCode::CREATED);
}

// =============================================================================
// HEALTH & LANGUAGES
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_language_registration_and_listing() {
    let server = server();
    add_language(&server, "de", "Deutsch").await;
    add_language(&server, "EN-us", "English").await;

    let languages: Vec<Value> = server.get("/language").await.json();
    let codes: Vec<_> = languages.iter().map(|l| l["iso639_1"].as_str().unwrap()).collect();
    assert_eq!(codes, ["de", "en"]);

    let dup = admin(server.post("/language"))
        .json(&json!({ "iso639_1": "de" }))
        .await;
    dup.assert_status(StatusCode::CONFLICT);
}

// =============================================================================
// ADMIN AUTH
// =============================================================================

#[tokio::test]
async fn test_admin_routes_disabled_without_key() {
    let server = server_with(Store::open_in_memory().unwrap(), &ServerConfig::default());
    let response = admin(server.post("/expertise"))
        .json(&json!({ "title": "Rust" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_require_bearer_key() {
    let server = server();

    let missing = server.post("/expertise").json(&json!({ "title": "Rust" })).await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = missing.json();
    assert_eq!(body["detail"], "Not authenticated");

    let wrong = server
        .post("/expertise")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer nope"))
        .json(&json!({ "title": "Rust" }))
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);

    let ok = admin(server.post("/expertise"))
        .json(&json!({ "title": "Rust" }))
        .await;
    ok.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let server = server();
    let response = server
        .post("/expertise")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("bearer {KEY}")).unwrap(),
        )
        .json(&json!({ "title": "Rust" }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_reads_are_public() {
    let server = server();
    server.get("/expertise").await.assert_status_ok();
    server.get("/work").await.assert_status_ok();
    server.get("/social-media").await.assert_status_ok();
}

// =============================================================================
// LOCALIZATION
// =============================================================================

#[tokio::test]
async fn test_content_follows_accept_language() {
    let server = server();
    let created = lang(admin(server.post("/expertise")), "de")
        .json(&json!({ "title": "Datenbanken", "icon": "db", "sort": 1 }))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(content_language(&created).as_deref(), Some("de"));
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    let de = lang(server.get("/expertise"), "de-DE,en;q=0.8").await;
    assert_eq!(content_language(&de).as_deref(), Some("de"));
    let items: Vec<Value> = de.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Datenbanken");

    let en = server.get("/expertise").await;
    assert_eq!(content_language(&en).as_deref(), Some("en"));
    assert!(en.json::<Vec<Value>>().is_empty());

    lang(admin(server.put(&format!("/expertise/{id}"))), "en")
        .json(&json!({ "title": "Databases" }))
        .await
        .assert_status_ok();
    let en: Vec<Value> = server.get("/expertise").await.json();
    assert_eq!(en[0]["title"], "Databases");
    assert_eq!(en[0]["icon"], "db");
}

#[tokio::test]
async fn test_untranslated_entity_is_not_found() {
    let server = server();
    let created: Value = lang(admin(server.post("/personal-information")), "de")
        .json(&json!({ "label": "Wohnort", "value": "Münster", "icon": "pin" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let path = format!("/personal-information/{id}");
    lang(server.get(&path), "de").await.assert_status_ok();
    let response = lang(server.get(&path), "fr").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["detail"], "Personal information not found");
}

#[tokio::test]
async fn test_education_nests_university_and_address() {
    let server = server();
    let address: Value = admin(server.post("/address"))
        .json(&json!({ "street": "Schlossplatz", "number": "2", "zip": 48149, "city": "Münster" }))
        .await
        .json();
    let institution: Value = lang(admin(server.post("/institution")), "de")
        .json(&json!({ "name": "Universität Münster", "address_id": address["id"] }))
        .await
        .json();
    lang(admin(server.post("/education")), "de")
        .json(&json!({
            "degree": "M.Sc.",
            "grade": 1.3,
            "start_date": "2018-04-01",
            "course_of_study": "Informatik",
            "institution_id": institution["id"],
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let items: Vec<Value> = lang(server.get("/education"), "de").await.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["start_date"], "2018-04-01");
    assert_eq!(items[0]["university"]["name"], "Universität Münster");
    assert_eq!(items[0]["university"]["address"]["zip"], 48149);
}

#[tokio::test]
async fn test_experience_with_unknown_company_is_rejected() {
    let server = server();
    let response = admin(server.post("/experience"))
        .json(&json!({ "title": "Engineer", "institution_id": 77 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_institution_translation_upsert() {
    let server = server();
    let created: Value = lang(admin(server.post("/institution")), "de")
        .json(&json!({ "name": "Universität Münster" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();
    let path = format!("/institution/{id}");

    let updated = lang(admin(server.put(&path)), "en")
        .json(&json!({ "name": "University of Münster" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["name"], "University of Münster");

    let de: Value = lang(server.get(&path), "de").await.json();
    assert_eq!(de["name"], "Universität Münster");
    let en: Value = lang(server.get(&path), "en").await.json();
    assert_eq!(en["name"], "University of Münster");

    let missing = lang(admin(server.put("/institution/999")), "en")
        .json(&json!({ "name": "Nowhere" }))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["detail"], "Institution not found");
}

// =============================================================================
// ERROR BODIES
// =============================================================================

#[tokio::test]
async fn test_malformed_path_parameter_is_json_error() {
    let server = server();
    let response = server.get("/education/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_unknown_route_is_json_error() {
    let server = server();
    let response = server.get("/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["detail"], "Not found");
}

// =============================================================================
// PAGES & PERSONAL DETAILS
// =============================================================================

#[tokio::test]
async fn test_pages_by_tech_key() {
    let server = server();
    let created = admin(server.post("/page"))
        .json(&json!({ "tech_key": "imprint", "title": "Imprint", "abstract": "Legal" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["abstract"], "Legal");
    assert!(body["creation_date"].is_string());

    admin(server.post("/page"))
        .json(&json!({ "tech_key": "imprint" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    server.get("/page/imprint").await.assert_status_ok();
    let missing = server.get("/page/privacy").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["detail"], "Page not found");
}

#[tokio::test]
async fn test_page_translation_upsert() {
    let server = server();
    lang(admin(server.post("/page")), "en")
        .json(&json!({ "tech_key": "imprint", "title": "Imprint", "abstract": "Legal" }))
        .await
        .assert_status(StatusCode::CREATED);

    lang(server.get("/page/imprint"), "de")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let updated = lang(admin(server.put("/page/imprint")), "de")
        .json(&json!({ "title": "Impressum", "abstract": "Rechtliches" }))
        .await;
    updated.assert_status_ok();
    assert_eq!(content_language(&updated).as_deref(), Some("de"));
    assert_eq!(updated.json::<Value>()["title"], "Impressum");

    let de: Value = lang(server.get("/page/imprint"), "de").await.json();
    assert_eq!(de["abstract"], "Rechtliches");
    let en: Value = lang(server.get("/page/imprint"), "en").await.json();
    assert_eq!(en["title"], "Imprint");

    let missing = lang(admin(server.put("/page/privacy")), "de")
        .json(&json!({ "title": "Datenschutz" }))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["detail"], "Page not found");
}

#[tokio::test]
async fn test_personal_details() {
    let server = server();
    let missing = server.get("/personal-details").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["detail"], "Personal details not found");

    admin(server.post("/personal-details"))
        .json(&json!({ "name": "Simon", "position": "Engineer", "abstract": "Hi" }))
        .await
        .assert_status(StatusCode::CREATED);
    let details: Value = server.get("/personal-details").await.json();
    assert_eq!(details["position"], "Engineer");
}

// =============================================================================
// WORK & SOCIAL MEDIA
// =============================================================================

#[tokio::test]
async fn test_work_lists_categories() {
    let server = server();
    let web: Value = admin(server.post("/category"))
        .json(&json!({ "name": "Web" }))
        .await
        .json();
    let created = admin(server.post("/work"))
        .json(&json!({ "title": "Shop", "url": "https://shop.example", "category_ids": [web["id"]] }))
        .await;
    created.assert_status(StatusCode::CREATED);
    admin(server.post("/work"))
        .json(&json!({ "title": "Bare" }))
        .await
        .assert_status(StatusCode::CREATED);

    let works: Vec<Value> = server.get("/work").await.json();
    assert_eq!(works.len(), 2);
    assert_eq!(works[0]["categories"][0]["name"], "Web");
    assert_eq!(works[1]["categories"], json!([]));
}

#[tokio::test]
async fn test_social_media() {
    let server = server();
    let created: Value = admin(server.post("/social-media"))
        .json(&json!({ "name": "GitHub", "url": "https://github.com/x", "color": "#000" }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let one: Value = server.get(&format!("/social-media/{id}")).await.json();
    assert_eq!(one["name"], "GitHub");
    server
        .get("/social-media/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// CONTACT
// =============================================================================

#[tokio::test]
async fn test_contact_requires_known_language() {
    let server = server();
    let response = server
        .post("/contact")
        .json(&json!({ "name": "Ada", "email": "ada@example.org", "message": "Hello" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["detail"],
        "Language 'en' not found in the database."
    );
}

#[tokio::test]
async fn test_contact_is_stored() {
    let server = server();
    add_language(&server, "en", "English").await;

    let response = server
        .post("/contact")
        .json(&json!({ "name": "Ada", "email": "ada@example.org", "message": "Hello" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({ "name": "Ada", "email": "ada@example.org", "message": "Hello" }));

    let contacts: Vec<Value> = admin(server.get("/contact")).await.json();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["lang"], "English");
    assert_eq!(contacts[0]["send"], false);

    server.get("/contact").await.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_contact_validation_errors() {
    let server = server();
    add_language(&server, "en", "English").await;

    let missing = server
        .post("/contact")
        .json(&json!({ "name": "Ada" }))
        .await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        missing.json::<Value>()["detail"],
        "All fields (name, email, message) are required."
    );

    let bad_email = server
        .post("/contact")
        .json(&json!({ "name": "Ada", "email": "ada", "message": "Hi" }))
        .await;
    bad_email.assert_status(StatusCode::BAD_REQUEST);

    let bad_json = server
        .post("/contact")
        .text("{not json")
        .content_type("application/json")
        .await;
    bad_json.assert_status(StatusCode::BAD_REQUEST);
    assert!(bad_json.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn test_contact_is_rate_limited() {
    let config = ServerConfig {
        contact_per_minute: NonZeroU32::MIN,
        ..config()
    };
    let mut store = Store::open_in_memory().unwrap();
    store
        .add_language(&folio_core::LanguageCode::default_language(), Some("English"))
        .unwrap();
    let server = server_with(store, &config);

    let body = json!({ "name": "Ada", "email": "ada@example.org", "message": "Hello" });
    server.post("/contact").json(&body).await.assert_status(StatusCode::CREATED);
    let limited = server.post("/contact").json(&body).await;
    limited.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

// =============================================================================
// IMAGES
// =============================================================================

#[tokio::test]
async fn test_image_serving() {
    let dir = tempfile::tempdir().unwrap();
    let on_disk = dir.path().join("me.png");
    std::fs::write(&on_disk, b"\x89PNG\r\n\x1a\nfake").unwrap();

    let mut store = Store::open_in_memory().unwrap();
    let present = store
        .register_image("me.png", on_disk.to_str().unwrap())
        .unwrap();
    let gone = store
        .register_image("gone.png", dir.path().join("gone.png").to_str().unwrap())
        .unwrap();
    let server = server_with(store, &config());

    let response = server.get(&format!("/image/{}", present.id)).await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(response.as_bytes().as_ref(), b"\x89PNG\r\n\x1a\nfake");

    let missing_file = server.get(&format!("/image/{}", gone.id)).await;
    missing_file.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing_file.json::<Value>()["detail"], "Image file missing on disk");

    let unknown = server.get("/image/4242").await;
    unknown.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(unknown.json::<Value>()["detail"], "Image not found");
}

#[tokio::test]
async fn test_cors_preflight_allows_reads() {
    let server = server();
    let response = server
        .method(axum::http::Method::OPTIONS, "/expertise")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://site.example"))
        .add_header(
            HeaderName::from_static("access-control-request-method"),
            HeaderValue::from_static("GET"),
        )
        .await;
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
