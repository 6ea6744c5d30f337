#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use coursiva::config::cors::CorsConfig;
use coursiva::config::jwt::JwtConfig;
use coursiva::router::init_router;
use coursiva::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::default(),
    };
    init_router(state)
}

pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Sends a JSON request, optionally authenticated, and returns status + body.
pub async fn send_json(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = builder
        .body(match body {
            Some(body) => Body::from(serde_json::to_string(&body).unwrap()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

/// Registers an account through the API and returns its id.
pub async fn register_user(
    app: axum::Router,
    username: &str,
    password: &str,
    role: &str,
) -> Uuid {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "password": password,
            "role": role,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

/// Logs in through the API and returns the access token.
pub async fn get_auth_token(app: axum::Router, username: &str, password: &str) -> String {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "username": username,
            "password": password,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

/// Registers and logs in a fresh account, returning (user_id, token).
pub async fn register_and_login(
    pool: &PgPool,
    username: &str,
    password: &str,
    role: &str,
) -> (Uuid, String) {
    let user_id = register_user(setup_test_app(pool.clone()), username, password, role).await;
    let token = get_auth_token(setup_test_app(pool.clone()), username, password).await;
    (user_id, token)
}
