//! HTTP-level tests for `/api/review`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_image, create_project, get_auth, patch_json_auth, post_json_auth,
    user_with_token,
};
use sqlx::PgPool;

/// One pending image, one approved image and one pending video.
async fn seed_queue(pool: &PgPool, token: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let project = create_project(app, token, serde_json::json!({ "title": "Queue" })).await;
    let project_id = project["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    create_image(app, token, project_id, "pending image").await;
    let app = common::build_test_app(pool.clone());
    let approved = create_image(app, token, project_id, "approved image").await;
    let app = common::build_test_app(pool.clone());
    patch_json_auth(
        app,
        "/api/images",
        token,
        serde_json::json!({ "id": approved["id"], "review_status": "approved" }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/videos",
        token,
        serde_json::json!({ "project_id": project_id, "prompt": "pending video" }),
    )
    .await;
    project_id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_queue_defaults_to_pending(pool: PgPool) {
    let (_owner, owner_token) = user_with_token(&pool, "owner@gov.cn", "user").await;
    let (_rev, token) = user_with_token(&pool, "rev@gov.cn", "reviewer").await;
    seed_queue(&pool, &owner_token).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/review/queue", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["review_status"] == "pending"));
    assert!(items.iter().all(|i| i["project_title"] == "Queue"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_queue_filters_by_type_and_status(pool: PgPool) {
    let (_owner, owner_token) = user_with_token(&pool, "owner@gov.cn", "user").await;
    let (_admin, token) = user_with_token(&pool, "admin@gov.cn", "admin").await;
    seed_queue(&pool, &owner_token).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/review/queue?type=video", &token).await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["item_type"], "video");

    let app = common::build_test_app(pool.clone());
    let uri = "/api/review/queue?review_status=approved&type=image";
    let json = body_json(get_auth(app, uri, &token).await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["prompt"], "approved image");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/review/queue?type=audio", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_stats(pool: PgPool) {
    let (_owner, owner_token) = user_with_token(&pool, "owner@gov.cn", "user").await;
    let (_rev, token) = user_with_token(&pool, "rev@gov.cn", "reviewer").await;
    seed_queue(&pool, &owner_token).await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/review/stats", &token).await).await;
    assert_eq!(json["data"]["pending"], 2);
    assert_eq!(json["data"]["approved"], 1);
    assert_eq!(json["data"]["rejected"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_endpoints_forbidden_for_plain_users(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "user@gov.cn", "user").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/review/queue", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/review/stats", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
