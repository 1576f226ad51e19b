#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use muraja_api::auth::jwt::JwtConfig;
use muraja_api::auth::password::hash_password;
use muraja_api::config::ServerConfig;
use muraja_api::router::build_app_router;
use muraja_api::state::AppState;
use muraja_api::uploads::UploadStore;
use muraja_api::ws::WsManager;
use muraja_core::roles::ROLE_ADMIN;
use muraja_core::types::DbId;
use muraja_db::models::user::CreateUser;
use muraja_db::repositories::UserRepo;

/// Password used for every account created through these helpers.
pub const PASSWORD: &str = "correct-horse-battery";

const MULTIPART_BOUNDARY: &str = "muraja-test-boundary";

/// An application wired exactly like `main.rs`, with uploads in a temp dir.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    upload_dir: TempDir,
}

impl TestApp {
    /// A fresh handle to the router for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn upload_path(&self) -> &std::path::Path {
        self.upload_dir.path()
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 64 * 1024,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 7,
        },
        admin: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("temp upload dir");
    let config = test_config(upload_dir.path());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(muraja_events::EventBus::default()),
        uploads: Arc::new(UploadStore::new(
            config.upload_dir.clone(),
            config.max_upload_bytes,
        )),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    parts: &[Part<'_>],
) -> Response {
    let request = request(method, uri, Some(token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// A logged-in account.
pub struct Account {
    pub id: DbId,
    pub token: String,
    pub refresh_token: String,
}

pub async fn login(app: Router, email: &str) -> Account {
    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": email, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login as {email}");
    let json = body_json(response).await;
    Account {
        id: json["user"]["id"].as_i64().unwrap(),
        token: json["access_token"].as_str().unwrap().to_string(),
        refresh_token: json["refresh_token"].as_str().unwrap().to_string(),
    }
}

/// Register through the API, then log in.
pub async fn register(test: &TestApp, name: &str, role: &str) -> Account {
    let email = format!("{}@muraja.test", name.to_lowercase());
    let response = post_json(
        test.app(),
        "/api/auth/register",
        json!({ "name": name, "email": email, "password": PASSWORD, "role": role }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "register {name}");
    login(test.app(), &email).await
}

pub async fn student(test: &TestApp, name: &str) -> Account {
    register(test, name, "STUDENT").await
}

pub async fn ustaz(test: &TestApp, name: &str) -> Account {
    register(test, name, "USTAZ").await
}

/// Admins cannot self-register; insert one directly and log in.
pub async fn admin(test: &TestApp) -> Account {
    let email = "admin@muraja.test";
    UserRepo::create(
        &test.state.pool,
        &CreateUser {
            name: "Admin".to_string(),
            email: email.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role: ROLE_ADMIN.to_string(),
            category: None,
        },
    )
    .await
    .unwrap();
    login(test.app(), email).await
}

/// Student requests the ustaz and the ustaz accepts.
pub async fn connect(test: &TestApp, student: &Account, ustaz: &Account) {
    let response = post_json_auth(
        test.app(),
        "/api/users/request-ustaz",
        &student.token,
        json!({ "ustaz_id": ustaz.id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let connection_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        test.app(),
        "/api/users/handle-request",
        &ustaz.token,
        json!({ "connection_id": connection_id, "status": "ACCEPTED" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
