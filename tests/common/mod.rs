// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use green_habits::{
    create_router, create_router_with_clock, domain::FixedClock, AppConfig, ContentConfig,
    DatabaseConfig, MetricsKind, ServerConfig, SessionConfig,
};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;
use uuid::Uuid;

// ============================================================================
// Test Setup
// ============================================================================

/// Configuration pointing at a fresh SQLite file and no external tips file,
/// so every test starts from the seeded catalog and the built-in tips.
pub fn test_config() -> AppConfig {
    // ---
    let tmp = std::env::temp_dir();

    AppConfig {
        server: ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
        },
        database: DatabaseConfig::for_path(&tmp.join(format!("green_habits_it_{}.db", Uuid::new_v4()))),
        session: SessionConfig {
            secret: "integration-test-secret".to_string(),
        },
        content: ContentConfig {
            tips_path: tmp.join(format!("green_habits_no_tips_{}.json", Uuid::new_v4())),
            catalog_path: None,
        },
        metrics: MetricsKind::Noop,
    }
}

pub async fn test_router() -> Router {
    // ---
    create_router(&test_config())
        .await
        .expect("Should be able to create router")
}

pub async fn test_router_on(date: chrono::NaiveDate) -> Router {
    // ---
    create_router_with_clock(&test_config(), Arc::new(FixedClock(date)))
        .await
        .expect("Should be able to create router")
}

// ============================================================================
// Request helpers (tower oneshot)
// ============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    /// `name=value` part of the Set-Cookie header, ready to send back.
    pub fn cookie(&self) -> String {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .expect("no Set-Cookie header")
            .to_string()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    // ---
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        set_cookie,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    post_raw_json(uri, body.to_string())
}

pub fn post_raw_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub fn post_form(uri: &str, username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap()
}

// ============================================================================
// Spawned server (reqwest)
// ============================================================================

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // ---
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        // ---
        let app = create_router(&config)
            .await
            .expect("Should be able to create router");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Keeps the session cookie between requests, like a browser
        let client = Client::builder().cookie_store(true).build().unwrap();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}

pub fn unused_path() -> PathBuf {
    std::env::temp_dir().join(format!("green_habits_unused_{}", Uuid::new_v4()))
}
