mod common;

use actix_web::{http::StatusCode, test};
use common::{bearer, register, register_and_login, test_app};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use todo_api::auth::TokenKeys;
use todo_api::models::User;

#[test_log::test(actix_rt::test)]
async fn test_register_and_login_flow() {
    let app = test_app().await;

    let (status, body) = register(&app, "integration@example.com", "Password123!").await;
    assert_eq!(status, 201, "Registration failed. Body: {}", body);
    assert_eq!(body["message"], "Successful!");
    assert_eq!(body["result"]["email"], "integration@example.com");
    assert!(body["result"]["id"].is_string());
    assert!(body["result"].get("password_hash").is_none());
    assert!(body["result"].get("password").is_none());

    // Same email again
    let (status, body) = register(&app, "integration@example.com", "Another123!").await;
    assert_eq!(status, 400);
    assert_eq!(body, Value::String("Email exist!".to_string()));

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "integration@example.com", "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().expect("token").to_string();
    assert!(!token.is_empty());

    // The token opens the protected routes.
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Value> = test::read_body_json(resp).await;
    assert!(tasks.is_empty());
}

#[test_log::test(actix_rt::test)]
async fn test_invalid_registration_inputs() {
    let app = test_app().await;

    let test_cases = vec![
        (json!({ "password": "Password123!" }), "email", "missing email"),
        (json!({ "email": "test@example.com" }), "password", "missing password"),
        (
            json!({ "email": "invalid-email", "password": "Password123!" }),
            "email",
            "invalid email format",
        ),
        (
            json!({ "email": "test@example.com", "password": "12345" }),
            "password",
            "password too short",
        ),
    ];

    for (payload, field, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case: {}", description);

        let body: Value = test::read_body_json(resp).await;
        let details = body["message"].as_array().expect("field error list");
        assert!(
            details.iter().any(|d| d["path"][0] == field),
            "case {}: expected an error on {}, got {}",
            description,
            field,
            body
        );
    }
}

#[test_log::test(actix_rt::test)]
async fn test_undecodable_registration_bodies() {
    let app = test_app().await;

    let test_cases = vec![
        (
            json!({ "email": "test@example.com", "password": "Password123!", "role": "admin" }),
            "unknown field",
        ),
        (json!({ "email": 42, "password": "Password123!" }), "email is not a string"),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case: {}", description);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"][0]["type"], "body", "case: {}", description);
    }

    let req = test::TestRequest::post()
        .uri("/api/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[test_log::test(actix_rt::test)]
async fn test_login_failures_look_the_same() {
    let app = test_app().await;
    let (status, _) = register(&app, "login_test_user@example.com", "Password123!").await;
    assert_eq!(status, 201);

    let mut bodies = Vec::new();
    for payload in [
        json!({ "email": "login_test_user@example.com", "password": "WrongPassword123!" }),
        json!({ "email": "nonexistent@example.com", "password": "Password123!" }),
        json!({ "email": "login_test_user@example.com" }),
        json!({ "email": 42, "password": ["Password123!"] }),
        json!("login_test_user@example.com"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        bodies.push(test::read_body(resp).await);
    }

    assert_eq!(&bodies[0][..], b"Invalid email or password");
    assert!(bodies.iter().all(|body| body == &bodies[0]));
}

#[test_log::test(actix_rt::test)]
async fn test_protected_routes_require_valid_token() {
    let app = test_app().await;

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing token");

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer("not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Signed with a different secret.
    let forged = TokenKeys::new("someone-elses-secret", None)
        .issue(&User::new("forger@example.com", String::new()))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(bearer(&forged))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[test_log::test(actix_rt::test)]
async fn test_bare_token_header_is_accepted() {
    let app = test_app().await;
    let token = register_and_login(&app, "bare@example.com", "Password123!").await;

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .append_header(("Authorization", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let app = test_app().await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
