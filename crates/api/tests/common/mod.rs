#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use govai_api::auth::jwt::{generate_access_token, JwtConfig};
use govai_api::auth::password::hash_password;
use govai_api::config::ServerConfig;
use govai_api::middleware::auth::ACCESS_TOKEN_COOKIE;
use govai_api::router::build_app_router;
use govai_api::state::AppState;
use govai_db::models::user::{CreateUser, User};
use govai_db::repositories::UserRepo;
use govai_jimeng::{JimengApi, JimengConfig};

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Nothing listens here, so generation calls fail fast with a connect error.
pub const UNREACHABLE_JIMENG: &str = "http://127.0.0.1:1";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(jimeng_base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        jwt: JwtConfig {
            secret: "test-secret-key-for-integration-tests".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        jimeng: JimengConfig {
            base_url: jimeng_base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout: Duration::from_secs(5),
        },
    }
}

/// Full application router with the production middleware stack. The
/// generation API points at an address nothing listens on.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_jimeng(pool, UNREACHABLE_JIMENG)
}

/// Full application router talking to the generation API at `base_url`.
pub fn build_test_app_with_jimeng(pool: PgPool, base_url: &str) -> Router {
    let config = test_config(base_url);
    let jimeng = JimengApi::new(&config.jimeng).expect("client should build");
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        jimeng: Arc::new(jimeng),
    };
    build_app_router(state, &config)
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and the given role.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        full_name: None,
        role: role.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Mint an access token for `user` signed with the test secret.
pub fn token_for(user: &User) -> String {
    let config = test_config(UNREACHABLE_JIMENG);
    generate_access_token(user.id, &user.email, &user.role, &config.jwt)
        .expect("token generation should succeed")
}

/// Create a user and return it with a ready-to-use access token.
pub async fn user_with_token(pool: &PgPool, email: &str, role: &str) -> (User, String) {
    let user = create_user(pool, email, role).await;
    let token = token_for(&user);
    (user, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

/// GET with the access token carried in the session cookie instead of the
/// `Authorization` header.
pub async fn get_cookie(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, format!("{ACCESS_TOKEN_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

/// POST without a body (generate, sync, logout).
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::POST, uri, Some(token))).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project through the API and return its JSON.
pub async fn create_project(
    app: Router,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json_auth(app, "/api/projects", token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Create an image row through the API and return its JSON.
pub async fn create_image(
    app: Router,
    token: &str,
    project_id: i64,
    prompt: &str,
) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/api/images",
        token,
        serde_json::json!({ "project_id": project_id, "prompt": prompt }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
