/// Integration tests for the TaskHive API
///
/// These drive the full router end-to-end against a real PostgreSQL
/// instance: signup/signin, the task lifecycle, ownership isolation, and
/// filter behavior. They are ignored by default; run with a test database:
///
/// ```bash
/// DATABASE_URL=postgresql://localhost/taskhive_test \
/// JWT_SECRET=test-secret-key-at-least-32-bytes-long \
///     cargo test -p taskhive-api -- --ignored
/// ```

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use tower::ServiceExt as _;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (set DATABASE_URL)"]
async fn test_signup_signin_flow() {
    let ctx = TestContext::new().await.unwrap();
    let username = common::unique_username();

    // Signup succeeds with 201 and no body
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/v1/auth/signup",
            None,
            Some(json!({ "username": username, "password": common::TEST_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The stored row carries a hash, not the plaintext
    let user = taskhive_shared::models::user::User::find_by_username(&ctx.db, &username)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(user.password_hash, common::TEST_PASSWORD);
    assert!(
        taskhive_shared::auth::password::verify_password(
            common::TEST_PASSWORD,
            &user.password_hash
        )
        .unwrap()
    );

    // A duplicate username is a conflict
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/v1/auth/signup",
            None,
            Some(json!({ "username": username, "password": common::TEST_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Signin returns an access token
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/v1/auth/signin",
            None,
            Some(json!({ "username": username, "password": common::TEST_PASSWORD })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::response_json(response).await;
    assert!(body["access_token"].is_string());

    // Wrong password is rejected
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/v1/auth/signin",
            None,
            Some(json!({ "username": username, "password": "WrongPass456!" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(&username)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (set DATABASE_URL)"]
async fn test_task_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    // Create: comes back 201 as OPEN, owned by the requester
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/v1/tasks",
            Some(&auth),
            Some(json!({ "title": "Buy milk" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = common::response_json(response).await;
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["status"], "OPEN");
    assert_eq!(task["user_id"], ctx.user.id.to_string());
    let task_id = task["id"].as_str().unwrap().to_string();

    // Update status to DONE (lowercase input normalizes)
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "PATCH",
            &format!("/v1/tasks/{}/status", task_id),
            Some(&auth),
            Some(json!({ "status": "done" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let task = common::response_json(response).await;
    assert_eq!(task["status"], "DONE");

    // Get reflects the update
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            Some(&auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let task = common::response_json(response).await;
    assert_eq!(task["status"], "DONE");

    // Delete returns 204, then the task is gone
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "DELETE",
            &format!("/v1/tasks/{}", task_id),
            Some(&auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            Some(&auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (set DATABASE_URL)"]
async fn test_cross_user_access_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let owner_auth = ctx.auth_header();

    // Owner creates a task
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/v1/tasks",
            Some(&owner_auth),
            Some(json!({ "title": "Private task" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = common::response_json(response).await;
    let task_id = task["id"].as_str().unwrap().to_string();

    // A second user probes the same id
    let other = common::create_user(&ctx.db, &common::unique_username())
        .await
        .unwrap();
    let other_auth = format!("Bearer {}", common::token_for(&other, &ctx.config).unwrap());

    for request in [
        common::json_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            Some(&other_auth),
            None,
        ),
        common::json_request(
            "PATCH",
            &format!("/v1/tasks/{}/status", task_id),
            Some(&other_auth),
            Some(json!({ "status": "DONE" })),
        ),
        common::json_request(
            "DELETE",
            &format!("/v1/tasks/{}", task_id),
            Some(&other_auth),
            None,
        ),
    ] {
        let response = ctx.app.clone().oneshot(request).await.unwrap();
        // Not-owned must look exactly like not-found
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // The task is untouched for its owner
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "GET",
            &format!("/v1/tasks/{}", task_id),
            Some(&owner_auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let task = common::response_json(response).await;
    assert_eq!(task["status"], "OPEN");

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(other.id)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (set DATABASE_URL)"]
async fn test_list_filters() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    for (title, description) in [
        ("Walk the dog", None),
        ("Buy foo widgets", None),
        ("Clean kitchen", Some("scrub the FOOtrest")),
    ] {
        let response = ctx
            .app
            .clone()
            .oneshot(common::json_request(
                "POST",
                "/v1/tasks",
                Some(&auth),
                Some(json!({ "title": title, "description": description })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Move one task to IN_PROGRESS
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request("GET", "/v1/tasks", Some(&auth), None))
        .await
        .unwrap();
    let tasks = common::response_json(response).await;
    let walk_id = tasks
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["title"] == "Walk the dog")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "PATCH",
            &format!("/v1/tasks/{}/status", walk_id),
            Some(&auth),
            Some(json!({ "status": "IN_PROGRESS" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Status filter returns only matching tasks
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "GET",
            "/v1/tasks?status=IN_PROGRESS",
            Some(&auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = common::response_json(response).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Walk the dog");

    // Search matches title or description, case-insensitively
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "GET",
            "/v1/tasks?search=foo",
            Some(&auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let tasks = common::response_json(response).await;
    let mut titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Buy foo widgets", "Clean kitchen"]);

    // An unknown status value is rejected at the boundary
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "GET",
            "/v1/tasks?status=CANCELLED",
            Some(&auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance (set DATABASE_URL)"]
async fn test_validation_and_auth_errors() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.auth_header();

    // Missing title
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/v1/tasks",
            Some(&auth),
            Some(json!({ "title": "" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Invalid status on update
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "PATCH",
            &format!("/v1/tasks/{}/status", uuid::Uuid::new_v4()),
            Some(&auth),
            Some(json!({ "status": "CANCELLED" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Delete of a nonexistent id
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "DELETE",
            &format!("/v1/tasks/{}", uuid::Uuid::new_v4()),
            Some(&auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // No token at all
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request("GET", "/v1/tasks", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A valid token whose account has since been deleted is rejected too
    let ghost = common::create_user(&ctx.db, &common::unique_username())
        .await
        .unwrap();
    let ghost_auth = format!("Bearer {}", common::token_for(&ghost, &ctx.config).unwrap());
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(ghost.id)
        .execute(&ctx.db)
        .await
        .unwrap();
    let response = ctx
        .app
        .clone()
        .oneshot(common::json_request(
            "GET",
            "/v1/tasks",
            Some(&ghost_auth),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}
