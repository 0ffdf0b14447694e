//! Shared setup for the integration tests.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header,
    middleware::Logger,
    test, web, App,
};
use serde_json::{json, Value};
use std::sync::Arc;
use todo_api::auth::AuthService;
use todo_api::routes::{self, health};
use todo_api::store::{MemoryStore, Store};

pub const TEST_SECRET: &str = "integration-test-secret";

/// The full application over a fresh in-memory store.
pub async fn test_app(
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    // bcrypt's minimum cost keeps the suite fast.
    let auth = AuthService::new(TEST_SECRET, None, 4).expect("auth service");

    test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(auth))
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await
}

pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> (u16, Value) {
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let value = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    (status, value)
}

/// Registers `email` and returns a token for it.
pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> String {
    let (status, body) = register(app, email, password).await;
    assert_eq!(status, 201, "registration failed: {}", body);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "login failed: {}", resp.status());
    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in login response").to_string()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
