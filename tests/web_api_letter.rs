//! Web API Letter Tests
//!
//! Integration tests for letter creation, listing, export, and signing.

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;
use letterdesk::web::handlers::AppState;
use letterdesk::web::middleware::JwtState;
use letterdesk::web::router::create_router;
use letterdesk::Database;
use serde_json::{json, Value};
use std::sync::Arc;

/// Create a test server with an in-memory database.
async fn create_test_server() -> TestServer {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let app_state = Arc::new(AppState::new(db, "test-secret-key-for-testing-only", 900));
    let jwt_state = Arc::new(JwtState::new("test-secret-key-for-testing-only"));

    let router = create_router(app_state, jwt_state, &[]);

    TestServer::new(router).expect("Failed to create test server")
}

/// Register an account with the given roles and return its access token.
async fn register(server: &TestServer, name: &str, address: &str, roles: Value) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "address": address,
            "password": "password123",
            "roles": roles
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["access_token"].as_str().unwrap().to_string()
}

/// Create a leave letter and return its id.
async fn create_leave_letter(server: &TestServer, token: &str) -> i64 {
    let response = server
        .post("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({
            "name": "Leave letter",
            "letter_type": "leave",
            "form": {
                "start_date": "2026-08-10",
                "end_date": "2026-08-12",
                "reason": "family function"
            }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_letter_success() {
    let server = create_test_server().await;
    let token = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;

    let response = server
        .post("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({
            "name": "Leave letter",
            "letter_type": "leave",
            "form": {
                "start_date": "2026-08-10",
                "end_date": "2026-08-12",
                "reason": "family function"
            }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["letter_type"], "leave");
    assert_eq!(body["data"]["form"]["reason"], "family function");
    assert!(body["data"].get("signature").is_none());
}

#[tokio::test]
async fn test_create_letter_missing_required_fields() {
    let server = create_test_server().await;
    let token = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;

    let response = server
        .post("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({
            "name": "Leave letter",
            "letter_type": "leave",
            "form": { "start_date": "2026-08-10" }
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["error"]["message"].as_str().unwrap().contains("end_date"));
}

#[tokio::test]
async fn test_create_letter_unknown_type_rejected() {
    let server = create_test_server().await;
    let token = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;

    let response = server
        .post("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({
            "name": "Strange letter",
            "letter_type": "memo",
            "form": {}
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_letters_in_insertion_order() {
    let server = create_test_server().await;
    let token = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;

    create_leave_letter(&server, &token).await;
    let response = server
        .post("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({
            "name": "Bonafide certificate",
            "letter_type": "bonafide",
            "form": { "reason": "passport application" }
        }))
        .await;
    response.assert_status_ok();

    let response = server
        .get("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let letters = body["data"].as_array().unwrap();
    assert_eq!(letters.len(), 2);
    // Most recent last
    assert_eq!(letters[0]["name"], "Leave letter");
    assert_eq!(letters[1]["name"], "Bonafide certificate");
}

#[tokio::test]
async fn test_get_letter_for_export() {
    let server = create_test_server().await;
    let token = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;
    let letter_id = create_leave_letter(&server, &token).await;

    let response = server
        .get(&format!("/api/letters/{}", letter_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["id"].as_i64().unwrap(), letter_id);
}

#[tokio::test]
async fn test_get_letter_with_query_token() {
    let server = create_test_server().await;
    let token = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;
    let letter_id = create_leave_letter(&server, &token).await;

    // Downloads cannot set headers; the token rides in the query string
    let response = server
        .get(&format!("/api/letters/{}?token={}", letter_id, token))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_get_letter_not_found() {
    let server = create_test_server().await;
    let token = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;

    let response = server
        .get("/api/letters/999")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_letter_by_staff_advisor() {
    let server = create_test_server().await;
    let student = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;
    let advisor = register(&server, "Asha", "asha@campus.example", json!(["staff-advisor"])).await;
    let letter_id = create_leave_letter(&server, &student).await;

    let response = server
        .post(&format!("/api/letters/{}/sign", letter_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", advisor))
        .json(&json!({ "image": "data:image/png;base64,iVBORw0KGgo=" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["signature"]["signed_by"], "Asha");
    // Signing leaves the form untouched
    assert_eq!(body["data"]["form"]["reason"], "family function");
}

#[tokio::test]
async fn test_sign_letter_twice_conflicts() {
    let server = create_test_server().await;
    let student = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;
    let advisor = register(&server, "Asha", "asha@campus.example", json!(["staff-advisor"])).await;
    let hod = register(&server, "Meena", "meena@campus.example", json!(["hod"])).await;
    let letter_id = create_leave_letter(&server, &student).await;

    let response = server
        .post(&format!("/api/letters/{}/sign", letter_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", advisor))
        .json(&json!({ "image": "sig-image" }))
        .await;
    response.assert_status_ok();

    // A different, otherwise authorized signer still gets refused
    let response = server
        .post(&format!("/api/letters/{}/sign", letter_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", hod))
        .json(&json!({ "image": "sig-image" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "ALREADY_SIGNED");
}

#[tokio::test]
async fn test_sign_letter_student_forbidden() {
    let server = create_test_server().await;
    let student = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;
    let friend = register(&server, "Arun", "arun@campus.example", json!(["student"])).await;
    let letter_id = create_leave_letter(&server, &student).await;

    let response = server
        .post(&format!("/api/letters/{}/sign", letter_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", friend))
        .json(&json!({ "image": "sig-image" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_sign_letter_not_found() {
    let server = create_test_server().await;
    let advisor = register(&server, "Asha", "asha@campus.example", json!(["staff-advisor"])).await;

    let response = server
        .post("/api/letters/999/sign")
        .add_header(AUTHORIZATION, format!("Bearer {}", advisor))
        .json(&json!({ "image": "sig-image" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sub_warden_signs_leave_but_not_bonafide() {
    let server = create_test_server().await;
    let student = register(&server, "Ravi", "ravi@campus.example", json!(["student"])).await;
    let warden = register(&server, "Suresh", "suresh@campus.example", json!(["sub-warden"])).await;

    let leave_id = create_leave_letter(&server, &student).await;
    let response = server
        .post(&format!("/api/letters/{}/sign", leave_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", warden))
        .json(&json!({ "image": "sig-image" }))
        .await;
    response.assert_status_ok();

    let response = server
        .post("/api/letters")
        .add_header(AUTHORIZATION, format!("Bearer {}", student))
        .json(&json!({
            "name": "Bonafide certificate",
            "letter_type": "bonafide",
            "form": { "reason": "bank account" }
        }))
        .await;
    let bonafide_id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    let response = server
        .post(&format!("/api/letters/{}/sign", bonafide_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", warden))
        .json(&json!({ "image": "sig-image" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}
