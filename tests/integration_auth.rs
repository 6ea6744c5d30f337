mod common;

use axum::http::StatusCode;
use common::{get_auth_token, register_and_login, send_json, setup_test_app, unique_username};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_student(pool: PgPool) {
    let username = unique_username("alice");

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "password": "testpass123",
            "role": "student",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["role"], "student");
    // The password hash never appears in responses.
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    let username = unique_username("bob");

    let payload = json!({
        "username": username,
        "password": "testpass123",
        "role": "teacher",
    });

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/register",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/register",
        None,
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "duplicate_name");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": unique_username("carol"),
            "password": "short",
            "role": "student",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_and_profile(pool: PgPool) {
    let username = unique_username("dave");
    let (user_id, token) = register_and_login(&pool, &username, "testpass123", "teacher").await;

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "GET",
        "/api/users/profile",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id.to_string());
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["role"], "teacher");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let username = unique_username("eve");
    register_and_login(&pool, &username, "testpass123", "student").await;

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "username": username,
            "password": "wrong-password",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "GET",
        "/api/users/profile",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_survives_relogin(pool: PgPool) {
    let username = unique_username("frank");
    register_and_login(&pool, &username, "testpass123", "student").await;

    let token = get_auth_token(setup_test_app(pool.clone()), &username, "testpass123").await;
    assert!(!token.is_empty());
}
