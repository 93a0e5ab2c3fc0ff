//! Registration, login, session cookie and logout.

use axum::http::StatusCode;
use green_habits::SESSION_COOKIE;

mod common;
use common::*;

#[tokio::test]
async fn register_then_duplicate_is_rejected() {
    // ---
    let app = test_router().await;

    let first = send(&app, post_form("/register", "alice", "s3cret")).await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.body.starts_with("Registration successful!"));

    let second = send(&app, post_form("/register", "alice", "other")).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body, "Username already exists!");

    // The first password still works
    let login = send(&app, post_form("/login", "alice", "s3cret")).await;
    assert!(login.body.starts_with("Login successful!"));
}

#[tokio::test]
async fn login_with_correct_password_sets_session() {
    // ---
    let app = test_router().await;
    send(&app, post_form("/register", "bob", "hunter2")).await;

    let login = send(&app, post_form("/login", "bob", "hunter2")).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body.starts_with("Login successful!"));

    let set_cookie = login.set_cookie.clone().expect("session cookie");
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    assert!(set_cookie.contains("HttpOnly"));

    let home = send(&app, get_with_cookie("/", &login.cookie())).await;
    assert!(home.body.contains("Welcome back, bob!"));
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    // ---
    let app = test_router().await;
    send(&app, post_form("/register", "carol", "right")).await;

    let login = send(&app, post_form("/login", "carol", "wrong")).await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body, "Invalid username or password!");
    assert!(login.set_cookie.is_none());
}

#[tokio::test]
async fn login_for_unknown_user_fails_the_same_way() {
    // ---
    let app = test_router().await;

    let login = send(&app, post_form("/login", "nobody", "whatever")).await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body, "Invalid username or password!");
}

#[tokio::test]
async fn tampered_session_cookie_is_ignored() {
    // ---
    let app = test_router().await;
    send(&app, post_form("/register", "dave", "pw")).await;
    let login = send(&app, post_form("/login", "dave", "pw")).await;

    // Keep the signature, swap the user id
    let cookie = login.cookie();
    let (name, value) = cookie.split_once('=').unwrap();
    let forged = format!("{name}={}999", &value[..value.len() - 1]);

    let home = send(&app, get_with_cookie("/", &forged)).await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Welcome!"));
}

#[tokio::test]
async fn cookie_signed_with_other_secret_is_ignored() {
    // ---
    let app = test_router().await;
    send(&app, post_form("/register", "erin", "pw")).await;

    let mut other_config = test_config();
    other_config.session.secret = "a-different-secret".to_string();
    let other = green_habits::create_router(&other_config).await.unwrap();
    send(&other, post_form("/register", "erin", "pw")).await;
    let foreign = send(&other, post_form("/login", "erin", "pw")).await;

    let home = send(&app, get_with_cookie("/", &foreign.cookie())).await;
    assert!(home.body.contains("Welcome!"));
}

#[tokio::test]
async fn logout_clears_session_and_is_idempotent() {
    // ---
    let app = test_router().await;

    // Logging out without a session still succeeds
    let anonymous = send(&app, get("/logout")).await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert!(anonymous.body.starts_with("Logged out successfully!"));

    send(&app, post_form("/register", "gina", "pw")).await;
    let login = send(&app, post_form("/login", "gina", "pw")).await;

    let logout = send(&app, get_with_cookie("/logout", &login.cookie())).await;
    assert_eq!(logout.status, StatusCode::OK);
    let removal = logout.set_cookie.expect("removal cookie");
    assert!(removal.starts_with(&format!("{SESSION_COOKIE}=;")));
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn full_session_flow_over_http() {
    // ---
    let server = TestServer::new().await;

    let register = server
        .client
        .post(server.url("/register"))
        .form(&[("username", "hank"), ("password", "pw")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(register.status().is_success());

    let login = server
        .client
        .post(server.url("/login"))
        .form(&[("username", "hank"), ("password", "pw")])
        .send()
        .await
        .expect("Failed to send request");
    assert!(login.status().is_success());

    let home = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(home.contains("Welcome back, hank!"));

    server
        .client
        .get(server.url("/logout"))
        .send()
        .await
        .unwrap();

    let home = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(home.contains("Welcome!"));
}
