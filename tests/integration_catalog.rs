mod common;

use axum::http::StatusCode;
use common::{register_and_login, send_json, setup_test_app, unique_username};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_category_as_teacher(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Programmation Web"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Programmation Web");
    assert_eq!(body["slug"], "programmation-web");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_category_as_student_is_forbidden(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("student"), "testpass123", "student").await;

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Hacking"})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_duplicate_category(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Databases"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Databases"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "duplicate_name");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_categories_is_public(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;

    for name in ["Web", "Systems"] {
        let (status, _) = send_json(
            setup_test_app(pool.clone()),
            "POST",
            "/api/categories",
            Some(&token),
            Some(json!({"name": name})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // No token on the read path.
    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "GET",
        "/api/categories",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["data"][0]["name"], "Systems");
    assert_eq!(body["data"][1]["name"], "Web");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_module_under_category(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;

    let (_, category) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Programmation"})),
    )
    .await;

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/modules",
        Some(&token),
        Some(json!({
            "category_id": category["id"],
            "name": "Python",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["slug"], "python");
    assert_eq!(body["category_id"], category["id"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_module_under_missing_category(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/modules",
        Some(&token),
        Some(json!({
            "category_id": uuid::Uuid::new_v4(),
            "name": "Python",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_category_cascades(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;

    let (_, category) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Ephemeral"})),
    )
    .await;

    let (_, module) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/modules",
        Some(&token),
        Some(json!({
            "category_id": category["id"],
            "name": "Short-lived",
        })),
    )
    .await;

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "DELETE",
        &format!("/api/categories/{}", category["id"].as_str().unwrap()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/modules/{}", module["id"].as_str().unwrap()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
