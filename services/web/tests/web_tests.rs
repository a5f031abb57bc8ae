//! End-to-end tests for the five HTTP endpoints, driven through the router
//! with an in-memory SQLite store and a small cookie-carrying test client.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use miniblog_core::domain::AdminCredentials;
use miniblog_core::ports::EntryStore;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;
use tracing::Level;
use web_lib::adapters::db::SqliteStore;
use web_lib::config::Config;
use web_lib::web::{router, AppState};

const TEST_SECRET: &str = "unit-test signing key: 0123456789abcdef0123456789abcdef";

/// Builds the application over a fresh in-memory database. The store is
/// returned too so tests can assert on persisted rows directly.
async fn test_app() -> (Router, Arc<SqliteStore>) {
    // One pooled connection; with more, each checkout would see its own
    // private :memory: database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    let store = Arc::new(SqliteStore::new(pool));
    store.init_schema().await.expect("apply schema");

    let config = Arc::new(Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        secret_key: TEST_SECRET.to_string(),
        admin: AdminCredentials {
            username: "admin".to_string(),
            password: "default".to_string(),
        },
        log_level: Level::INFO,
    });

    let state = AppState::new(store.clone() as Arc<dyn EntryStore>, config);
    (router(state), store)
}

/// A minimal browser stand-in: carries cookies between requests and honors
/// Set-Cookie removals.
#[derive(Default)]
struct Client {
    cookies: BTreeMap<String, String>,
}

impl Client {
    fn absorb_cookies(&mut self, response: &Response<Body>) {
        for value in response.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().expect("cookie header is ascii");
            let first = raw.split(';').next().unwrap_or("");
            let Some((name, val)) = first.split_once('=') else {
                continue;
            };
            let removed = val.is_empty()
                || raw
                    .split(';')
                    .any(|part| part.trim().eq_ignore_ascii_case("Max-Age=0"));
            if removed {
                self.cookies.remove(name);
            } else {
                self.cookies.insert(name.to_string(), val.to_string());
            }
        }
    }

    async fn request(
        &mut self,
        app: &Router,
        method: &str,
        path: &str,
        form_body: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if !self.cookies.is_empty() {
            let header_value = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, header_value);
        }

        let request = match form_body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        self.absorb_cookies(&response);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get(&mut self, app: &Router, path: &str) -> (StatusCode, String) {
        self.request(app, "GET", path, None).await
    }

    async fn post_form(&mut self, app: &Router, path: &str, body: &str) -> (StatusCode, String) {
        self.request(app, "POST", path, Some(body)).await
    }

    /// Logs in and, like a browser, follows the redirect so the flashed
    /// message lands in the returned body. Failed logins render directly.
    async fn login(&mut self, app: &Router, username: &str, password: &str) -> (StatusCode, String) {
        let body = format!("username={username}&password={password}");
        let (status, page) = self.post_form(app, "/login", &body).await;
        if status.is_redirection() {
            return self.get(app, "/").await;
        }
        (status, page)
    }
}

#[tokio::test]
async fn empty_db_shows_the_empty_state() {
    let (app, _) = test_app().await;
    let mut client = Client::default();

    let (status, body) = client.get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No entries here so far"));
    assert!(!body.contains("<li>"));
}

#[tokio::test]
async fn login_and_logout_flash_their_messages() {
    let (app, _) = test_app().await;
    let mut client = Client::default();

    let (_, body) = client.login(&app, "admin", "default").await;
    assert!(body.contains("You were logged in"));

    let (status, _) = client.get(&app, "/logout").await;
    assert_eq!(status, StatusCode::FOUND);
    let (_, body) = client.get(&app, "/").await;
    assert!(body.contains("You were logged out"));

    let (status, body) = client
        .post_form(&app, "/login", "username=adminx&password=default")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid username"));

    let (status, body) = client
        .post_form(&app, "/login", "username=admin&password=defaultx")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid password"));
}

#[tokio::test]
async fn flash_messages_show_exactly_once() {
    let (app, _) = test_app().await;
    let mut client = Client::default();

    let (_, body) = client.login(&app, "admin", "default").await;
    assert!(body.contains("You were logged in"));

    let (_, body) = client.get(&app, "/").await;
    assert!(!body.contains("You were logged in"));
}

#[tokio::test]
async fn failed_login_does_not_authenticate() {
    let (app, store) = test_app().await;
    let mut client = Client::default();

    client.login(&app, "admin", "wrong").await;
    let (status, _) = client
        .post_form(&app, "/add", "title=sneaky&text=post")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(store.list_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_requires_authentication() {
    let (app, store) = test_app().await;
    let mut client = Client::default();

    let (status, _) = client
        .post_form(&app, "/add", "title=sneaky&text=post")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(store.list_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn forged_unsigned_session_cookie_is_rejected() {
    let (app, store) = test_app().await;
    let mut client = Client::default();

    // A client writing the flag itself, without the server's signature.
    client
        .cookies
        .insert("session".to_string(), "logged_in".to_string());

    let (status, _) = client
        .post_form(&app, "/add", "title=forged&text=post")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(store.list_entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn title_is_escaped_but_text_is_not() {
    let (app, _) = test_app().await;
    let mut client = Client::default();
    client.login(&app, "admin", "default").await;

    let (status, _) = client
        .post_form(
            &app,
            "/add",
            "title=%3CHello%3E&text=%3Cstrong%3EHTML%3C%2Fstrong%3E%20allowed%20here",
        )
        .await;
    assert_eq!(status, StatusCode::FOUND);

    let (_, body) = client.get(&app, "/").await;
    assert!(body.contains("New entry was successfully posted"));
    assert!(!body.contains("No entries here so far"));
    assert!(body.contains("&lt;Hello&gt;"));
    assert!(body.contains("<strong>HTML</strong> allowed here"));
}

#[tokio::test]
async fn entries_render_newest_first() {
    let (app, store) = test_app().await;
    let mut client = Client::default();

    for n in 1..=3 {
        store
            .add_entry(&format!("post {n}"), "body")
            .await
            .unwrap();
    }

    let ids: Vec<i64> = store
        .list_entries()
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let (_, body) = client.get(&app, "/").await;
    let first = body.find("post 3").unwrap();
    let last = body.find("post 1").unwrap();
    assert!(first < last);
}

#[tokio::test]
async fn logout_twice_is_harmless() {
    let (app, _) = test_app().await;
    let mut client = Client::default();
    client.login(&app, "admin", "default").await;

    let (status, _) = client.get(&app, "/logout").await;
    assert_eq!(status, StatusCode::FOUND);
    let (status, _) = client.get(&app, "/logout").await;
    assert_eq!(status, StatusCode::FOUND);

    // Still anonymous: the add form is gone and the login link is back.
    let (_, body) = client.get(&app, "/").await;
    assert!(body.contains("log in"));
    assert!(!body.contains("action=\"/add\""));
}

#[tokio::test]
async fn login_page_renders_without_error_text() {
    let (app, _) = test_app().await;
    let mut client = Client::default();

    let (status, body) = client.get(&app, "/login").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/login\""));
    assert!(!body.contains("Error:"));
}
