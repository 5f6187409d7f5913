//! Integration tests for registration, login, logout and token handling.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;

use helpers::{AccountFault, BrokenHasher, CountingHasher, STRONG_PASSWORD, TestApp};
use motors_entity::account::AccountType;

fn registration<'a>(email: &'a str, password: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("account_firstname", "Ada"),
        ("account_lastname", "Lovelace"),
        ("account_email", email),
        ("account_password", password),
    ]
}

#[tokio::test]
async fn test_register_then_login_sets_session_cookie() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/account/register",
            &registration("a@x.com", STRONG_PASSWORD),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body.contains("registered Ada. Please log in."));

    let response = app
        .post_form(
            "/account/login",
            &[
                ("account_email", "a@x.com"),
                ("account_password", STRONG_PASSWORD),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/account/"));

    let cookie = response.set_cookie("jwt").expect("jwt cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=3600"));
}

#[tokio::test]
async fn test_registered_password_is_stored_hashed() {
    let app = TestApp::new();
    app.post_form(
        "/account/register",
        &registration("a@x.com", STRONG_PASSWORD),
        None,
    )
    .await;

    let account = app
        .state
        .accounts
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(account.password_hash, STRONG_PASSWORD);
    assert!(account.password_hash.starts_with("$argon2id$"));
    assert_eq!(account.account_type, AccountType::Client);
}

#[tokio::test]
async fn test_register_rejects_weak_password_and_keeps_fields() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/account/register",
            &registration("a@x.com", "short"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Password does not meet requirements."));
    assert!(response.body.contains("value=\"Ada\""));
    assert!(response.body.contains("value=\"a@x.com\""));
    assert!(!response.body.contains("value=\"short\""));
    assert!(app.state.accounts.find_by_email("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_store_failure_keeps_entered_details() {
    let app = TestApp::with_account_fault(AccountFault::RegisterFails);

    let response = app
        .post_form(
            "/account/register",
            &registration("a@x.com", STRONG_PASSWORD),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
    assert!(response.body.contains("Sorry, the registration failed."));
    assert!(response.body.contains("value=\"Ada\""));
    assert!(response.body.contains("value=\"Lovelace\""));
    assert!(response.body.contains("value=\"a@x.com\""));
    assert!(!response.body.contains(STRONG_PASSWORD));
    assert!(app.state.accounts.find_by_email("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_hash_failure_is_server_error() {
    let app = TestApp::with_hasher(Arc::new(BrokenHasher));

    let response = app
        .post_form(
            "/account/register",
            &registration("a@x.com", STRONG_PASSWORD),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .body
        .contains("Sorry, there was an error processing the registration."));
    assert!(response.body.contains("value=\"a@x.com\""));
    assert!(!response.body.contains(STRONG_PASSWORD));
    assert!(app.state.accounts.find_by_email("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejects_existing_email() {
    let app = TestApp::new();
    app.create_account("Ada", "a@x.com", STRONG_PASSWORD, AccountType::Client)
        .await;

    let response = app
        .post_form(
            "/account/register",
            &registration("A@X.com", STRONG_PASSWORD),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response
        .body
        .contains("Email exists. Please log in or use different email"));
}

#[tokio::test]
async fn test_wrong_password_gets_generic_notice() {
    let app = TestApp::new();
    app.create_account("Ada", "a@x.com", STRONG_PASSWORD, AccountType::Client)
        .await;

    let response = app
        .post_form(
            "/account/login",
            &[
                ("account_email", "a@x.com"),
                ("account_password", "Wrong-password-1"),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response
        .body
        .contains("Please check your credentials and try again."));
    assert!(response.body.contains("value=\"a@x.com\""));
    assert!(response.set_cookie("jwt").is_none());
}

#[tokio::test]
async fn test_unknown_email_gets_same_notice() {
    let app = TestApp::new();

    let response = app
        .post_form(
            "/account/login",
            &[
                ("account_email", "nobody@x.com"),
                ("account_password", STRONG_PASSWORD),
            ],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response
        .body
        .contains("Please check your credentials and try again."));
    assert!(response.set_cookie("jwt").is_none());
}

#[tokio::test]
async fn test_unknown_email_costs_a_verification_like_a_wrong_password() {
    let hasher = Arc::new(CountingHasher::new());
    let app = TestApp::with_hasher(hasher.clone());
    app.create_account("Ada", "a@x.com", STRONG_PASSWORD, AccountType::Client)
        .await;

    let unknown = app
        .post_form(
            "/account/login",
            &[
                ("account_email", "nobody@x.com"),
                ("account_password", STRONG_PASSWORD),
            ],
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert_eq!(hasher.verifications(), 1);

    let wrong = app
        .post_form(
            "/account/login",
            &[
                ("account_email", "a@x.com"),
                ("account_password", "Wrong-password-1"),
            ],
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(hasher.verifications(), 2);
    for response in [&unknown, &wrong] {
        assert!(response
            .body
            .contains("Please check your credentials and try again."));
    }
}

#[tokio::test]
async fn test_protected_route_without_cookie_redirects_to_login() {
    let app = TestApp::new();

    let response = app.get("/account/update/1", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/account/login"));

    let flash = response.cookie_pair("flash").expect("flash cookie");
    let login_page = app.get("/account/login", Some(flash.as_str())).await;
    assert_eq!(login_page.status, StatusCode::OK);
    assert!(login_page.body.contains("<p class=\"notice\">Please log in.</p>"));
    assert!(login_page.clears_cookie("flash"));
}

#[tokio::test]
async fn test_valid_cookie_identifies_account() {
    let app = TestApp::new();
    let (_, jwt) = app
        .logged_in("Ada", "a@x.com", AccountType::Client)
        .await;

    let response = app.get("/", Some(jwt.as_str())).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Welcome Ada"));
    assert!(response.body.contains("/account/logout"));

    let anonymous = app.get("/", None).await;
    assert!(anonymous.body.contains("My Account"));
    assert!(!anonymous.body.contains("Welcome Ada"));
}

#[tokio::test]
async fn test_logout_clears_cookie_and_session() {
    let app = TestApp::new();
    let (_, jwt) = app
        .logged_in("Ada", "a@x.com", AccountType::Client)
        .await;

    let response = app.get("/account/logout", Some(jwt.as_str())).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
    assert!(response.clears_cookie("jwt"));

    let after = app.get("/account/", None).await;
    assert_eq!(after.status, StatusCode::SEE_OTHER);
    assert_eq!(after.location(), Some("/account/login"));
}

#[tokio::test]
async fn test_tampered_cookie_is_cleared() {
    let app = TestApp::new();

    let response = app.get("/", Some("jwt=not.a.token")).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/account/login"));
    assert!(response.clears_cookie("jwt"));
    assert!(response.cookie_pair("flash").is_some());
}

#[tokio::test]
async fn test_expired_cookie_is_rejected() {
    let app = TestApp::new();
    let profile = app
        .create_account("Ada", "a@x.com", STRONG_PASSWORD, AccountType::Client)
        .await;

    let issued_at = Utc::now().timestamp() - 7200;
    let token = app.state.issuer.issue_at(&profile, issued_at).unwrap();
    let jwt = format!("jwt={token}");

    let response = app.get("/account/", Some(jwt.as_str())).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/account/login"));
    assert!(response.clears_cookie("jwt"));
}

#[tokio::test]
async fn test_cookie_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let profile = app
        .create_account("Ada", "a@x.com", STRONG_PASSWORD, AccountType::Admin)
        .await;

    let good = format!("jwt={}", app.state.issuer.issue(&profile).unwrap());
    assert_eq!(app.get("/account/", Some(good.as_str())).await.status, StatusCode::OK);

    let mut auth = app.state.config.auth.clone();
    auth.jwt_secret = "someone-elses-secret".to_string();
    let forger = motors_auth::TokenIssuer::new(&auth);
    let forged = format!("jwt={}", forger.issue(&profile).unwrap());

    let response = app.get("/inv/", Some(forged.as_str())).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/account/login"));
    assert!(response.clears_cookie("jwt"));
}
