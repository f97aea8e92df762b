//! HTTP-level tests for `/api/learnings`.

mod common;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use common::{body_json, get_auth, post_auth, post_json_auth, user_with_token};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn analyze(Json(body): Json<Value>) -> Json<Value> {
    let url = body["video_url"].as_str().unwrap_or_default();
    if url.contains("broken") {
        return Json(json!({ "success": false, "error": "unsupported codec" }));
    }
    let transition = if url.contains("cut") {
        Value::Null
    } else {
        json!("cross dissolve")
    };
    Json(json!({
        "success": true,
        "data": {
            "style_prompt": "warm documentary tones",
            "transition_prompt": transition,
            "key_frames": ["k1.png", "k2.png"],
        },
    }))
}

async fn stub() -> String {
    common::spawn_stub(Router::new().route("/v1/videos/analyze", post(analyze))).await
}

async fn create_learning(app: axum::Router, token: &str, url: &str) -> (StatusCode, Value) {
    let response = post_json_auth(
        app,
        "/api/learnings",
        token,
        json!({ "video_url": url, "video_name": "参考片" }),
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_learning_records_analysis(pool: PgPool) {
    let base_url = stub().await;
    let (user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;

    let app = common::build_test_app_with_jimeng(pool, &base_url);
    let (status, json) = create_learning(app, &token, "https://videos.example.com/a.mp4").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["user_id"], user.id);
    assert_eq!(json["data"]["analysis_status"], "completed");
    assert_eq!(json["data"]["extracted_style_prompt"], "warm documentary tones");
    assert_eq!(json["data"]["extracted_transition_prompt"], "cross dissolve");
    assert_eq!(json["data"]["key_frames"], json!(["k1.png", "k2.png"]));
}

/// A rejected analysis is still a created row, marked failed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_analysis_still_creates_row(pool: PgPool) {
    let base_url = stub().await;
    let (_user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;

    let app = common::build_test_app_with_jimeng(pool.clone(), &base_url);
    let (status, json) =
        create_learning(app, &token, "https://videos.example.com/broken.mp4").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["analysis_status"], "failed");
    assert!(json["data"]["extracted_style_prompt"].is_null());

    // Unreachable service behaves the same.
    let app = common::build_test_app(pool);
    let (status, json) = create_learning(app, &token, "https://videos.example.com/b.mp4").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["analysis_status"], "failed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_learning_rejects_bad_url(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;
    let app = common::build_test_app(pool);

    let (status, _json) = create_learning(app, &token, "not a url").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_learnings_is_per_user(pool: PgPool) {
    let base_url = stub().await;
    let (_user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;
    let (_other, other_token) = user_with_token(&pool, "other@gov.cn", "user").await;

    let app = common::build_test_app_with_jimeng(pool.clone(), &base_url);
    create_learning(app, &token, "https://videos.example.com/a.mp4").await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/learnings", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/learnings", &other_token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_template_creates_style_and_transition(pool: PgPool) {
    let base_url = stub().await;
    let (_user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;

    let app = common::build_test_app_with_jimeng(pool.clone(), &base_url);
    let (_, json) = create_learning(app, &token, "https://videos.example.com/a.mp4").await;
    let id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/learnings/{id}/save-template"),
        &token,
        json!({ "name": "城市纪实" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let saved = json["data"].as_array().unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0]["name"], "城市纪实 - style");
    assert_eq!(saved[0]["category"], "style");
    assert_eq!(saved[1]["name"], "城市纪实 - transition");
    assert_eq!(saved[1]["category"], "transition");

    // The saved templates show up in the public catalog.
    let app = common::build_test_app(pool);
    let json = body_json(common::get(app, "/api/prompts?category=transition").await).await;
    assert_eq!(json["data"][0]["prompt_content"], "cross dissolve");
}

/// Without a body the video name is used and a missing transition is skipped.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_template_defaults(pool: PgPool) {
    let base_url = stub().await;
    let (_user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;

    let app = common::build_test_app_with_jimeng(pool.clone(), &base_url);
    let (_, json) = create_learning(app, &token, "https://videos.example.com/cut.mp4").await;
    let id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/learnings/{id}/save-template"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let saved = json["data"].as_array().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["name"], "参考片 - style");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_template_requires_style_prompt(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;

    let app = common::build_test_app(pool.clone());
    let (_, json) = create_learning(app, &token, "https://videos.example.com/a.mp4").await;
    let id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/learnings/{id}/save-template"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_template_on_foreign_learning_is_404(pool: PgPool) {
    let base_url = stub().await;
    let (_user, token) = user_with_token(&pool, "learner@gov.cn", "user").await;
    let (_other, other_token) = user_with_token(&pool, "other@gov.cn", "user").await;

    let app = common::build_test_app_with_jimeng(pool.clone(), &base_url);
    let (_, json) = create_learning(app, &token, "https://videos.example.com/a.mp4").await;
    let id = json["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response =
        post_auth(app, &format!("/api/learnings/{id}/save-template"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
