mod common;

use axum::http::StatusCode;
use common::{register_and_login, send_json, setup_test_app, unique_username};
use serde_json::{Value, json};
use sqlx::PgPool;

async fn create_module(pool: &PgPool, token: &str) -> Value {
    let (status, category) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/categories",
        Some(token),
        Some(json!({"name": format!("Category {}", uuid::Uuid::new_v4())})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, module) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/modules",
        Some(token),
        Some(json!({
            "category_id": category["id"],
            "name": format!("Module {}", uuid::Uuid::new_v4()),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    module
}

async fn create_course(pool: &PgPool, token: &str, module_id: &Value, title: &str) -> Value {
    let (status, course) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/courses",
        Some(token),
        Some(json!({
            "module_id": module_id,
            "title": title,
            "description": "A course",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    course
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_starts_unpublished(pool: PgPool) {
    let (teacher_id, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;
    let module = create_module(&pool, &token).await;

    let course = create_course(&pool, &token, &module["id"], "Python Débutant").await;

    assert_eq!(course["is_published"], false);
    assert_eq!(course["slug"], "python-debutant");
    assert_eq!(course["teacher_id"], teacher_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_create_course(pool: PgPool) {
    let (_, teacher_token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;
    let (_, student_token) =
        register_and_login(&pool, &unique_username("student"), "testpass123", "student").await;
    let module = create_module(&pool, &teacher_token).await;

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/courses",
        Some(&student_token),
        Some(json!({
            "module_id": module["id"],
            "title": "Not allowed",
            "description": "Students cannot teach",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_publish_and_unpublish(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;
    let module = create_module(&pool, &token).await;
    let course = create_course(&pool, &token, &module["id"], "Databases").await;
    let course_id = course["id"].as_str().unwrap();

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "PATCH",
        &format!("/api/courses/{course_id}/publish"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_published"], true);

    // Publishing twice is a no-op.
    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "PATCH",
        &format!("/api/courses/{course_id}/publish"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_published"], true);

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "PATCH",
        &format!("/api/courses/{course_id}/unpublish"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_published"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_title_for_same_teacher(pool: PgPool) {
    let (_, token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;
    let module1 = create_module(&pool, &token).await;
    let module2 = create_module(&pool, &token).await;

    create_course(&pool, &token, &module1["id"], "Advanced Rust").await;

    let (status, body) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/courses",
        Some(&token),
        Some(json!({
            "module_id": module2["id"],
            "title": "Advanced Rust",
            "description": "Again",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    // Same teacher + same title also collides on the global slug; either
    // conflict code is acceptable to callers.
    let code = body["code"].as_str().unwrap();
    assert!(code == "duplicate_title" || code == "duplicate_slug");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_cascades_to_enrollments(pool: PgPool) {
    let (_, teacher_token) =
        register_and_login(&pool, &unique_username("teacher"), "testpass123", "teacher").await;
    let (student_id, student_token) =
        register_and_login(&pool, &unique_username("student"), "testpass123", "student").await;

    let module = create_module(&pool, &teacher_token).await;
    let course = create_course(&pool, &teacher_token, &module["id"], "Doomed Course").await;
    let course_id = course["id"].as_str().unwrap();

    // Chapter + lesson under the course.
    let (status, chapter) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/chapters",
        Some(&teacher_token),
        Some(json!({
            "course_id": course["id"],
            "name": "Bases",
            "description": "Introduction",
            "order": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/lessons",
        Some(&teacher_token),
        Some(json!({
            "chapter_id": chapter["id"],
            "title": "Variables",
            "content": "Les variables permettent de stocker des données.",
            "order": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "POST",
        "/api/enrollments",
        Some(&student_token),
        Some(json!({"course_id": course["id"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "DELETE",
        &format!("/api/courses/{course_id}"),
        Some(&teacher_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Chapters, lessons and enrollments went with the course.
    let chapters =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chapters WHERE course_id = $1")
            .bind(uuid::Uuid::parse_str(course_id).unwrap())
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(chapters, 0);

    let enrollments =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments WHERE student_id = $1")
            .bind(student_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(enrollments, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_not_owner(pool: PgPool) {
    let (_, owner_token) =
        register_and_login(&pool, &unique_username("owner"), "testpass123", "teacher").await;
    let (_, other_token) =
        register_and_login(&pool, &unique_username("other"), "testpass123", "teacher").await;

    let module = create_module(&pool, &owner_token).await;
    let course = create_course(&pool, &owner_token, &module["id"], "Protected").await;

    let (status, _) = send_json(
        setup_test_app(pool.clone()),
        "DELETE",
        &format!("/api/courses/{}", course["id"].as_str().unwrap()),
        Some(&other_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
