//! Integration tests for registration and login.
//!
//! Requires a running, migrated API server. Run with:
//! `cargo test -p comparebuddy-integration-tests -- --ignored`

use comparebuddy_integration_tests::{api_url, client, json, unique};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn register(client: &Client, body: &Value) -> (StatusCode, Value) {
    let response = client
        .post(api_url("/auth/register"))
        .json(body)
        .send()
        .await
        .expect("Failed to register");
    json(response).await
}

async fn login(client: &Client, username: &str, password: &str) -> (StatusCode, Value) {
    let response = client
        .post(api_url("/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    json(response).await
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_register_then_login() {
    let client = client();
    let username = unique("driver");

    let (status, body) = register(
        &client,
        &json!({ "username": username, "password": "secret1", "display_name": "Driver" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["username"], username.as_str());
    assert_eq!(body["user"]["display_name"], "Driver");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = login(&client, &username, "secret1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], username.as_str());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_password_length_boundary() {
    let client = client();

    let (status, _) = register(
        &client,
        &json!({ "username": unique("short"), "password": "12345" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(
        &client,
        &json!({ "username": unique("exact"), "password": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_duplicate_username_conflict() {
    let client = client();
    let username = unique("dup");

    let (status, _) = register(&client, &json!({ "username": username, "password": "secret1" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        register(&client, &json!({ "username": username, "password": "secret2" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_duplicate_email_conflict() {
    let client = client();
    let email = format!("{}@example.com", unique("mail"));

    let (status, _) = register(
        &client,
        &json!({ "username": unique("first"), "email": email, "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = register(
        &client,
        &json!({ "username": unique("second"), "email": email, "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_blank_emails_do_not_conflict() {
    let client = client();
    for _ in 0..2 {
        let (status, body) = register(
            &client,
            &json!({ "username": unique("noemail"), "email": "", "password": "secret1" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["user"]["email"].is_null());
    }
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_login_does_not_reveal_usernames() {
    let client = client();
    let username = unique("known");
    let (status, _) = register(&client, &json!({ "username": username, "password": "secret1" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (wrong_status, wrong_body) = login(&client, &username, "not-the-password").await;
    let (unknown_status, unknown_body) = login(&client, &unique("nobody"), "secret1").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}
