//! Repository integration tests against a real database.

use assert_matches::assert_matches;
use govai_core::status::{
    AnalysisStatus, GenerationStatus, ProjectStatus, PromptCategory, ResourceType, ReviewStatus,
};
use govai_db::models::audit::{AuditQuery, CreateAuditLog};
use govai_db::models::image::{CreateGeneratedImage, ImageFilter, UpdateGeneratedImage};
use govai_db::models::learning::{AnalysisOutcome, CreateVideoLearning};
use govai_db::models::project::{CreateProject, UpdateProject};
use govai_db::models::prompt_template::CreatePromptTemplate;
use govai_db::models::user::CreateUser;
use govai_db::models::video::{CreateGeneratedVideo, UpdateGeneratedVideo};
use govai_db::repositories::dashboard_repo::QueueMedia;
use govai_db::repositories::{
    ArtStyleRepo, AuditLogRepo, DashboardRepo, ImageRepo, LearningRepo, ProjectRepo,
    PromptTemplateRepo, UserRepo, VideoRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            full_name: None,
            role: "user".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_project(user_id: i64, title: &str) -> CreateProject {
    CreateProject {
        user_id,
        title: title.to_string(),
        description: None,
        script_content: None,
        art_style_id: None,
    }
}

async fn seed_image(pool: &PgPool, project_id: i64, prompt: &str) -> i64 {
    ImageRepo::create(
        pool,
        &CreateGeneratedImage {
            project_id,
            prompt: prompt.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_round_trip_keeps_art_style(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let style = ArtStyleRepo::list_active(&pool).await.unwrap().remove(0);

    let created = ProjectRepo::create(
        &pool,
        &CreateProject {
            art_style_id: Some(style.id),
            script_content: Some("画面：城市天际线".to_string()),
            ..new_project(user_id, "Policy explainer")
        },
    )
    .await
    .unwrap();
    assert_eq!(created.status, "draft");

    let found = ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.art_style_id, Some(style.id));
    assert_eq!(found.script_content.as_deref(), Some("画面：城市天际线"));

    let summaries = ProjectRepo::list_for_user(&pool, user_id, None).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].art_style_name.as_deref(), Some(style.name.as_str()));
    assert_eq!(summaries[0].image_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_filters_by_owner_and_status(pool: PgPool) {
    let alice = seed_user(&pool, "alice@example.com").await;
    let bob = seed_user(&pool, "bob@example.com").await;

    let draft = ProjectRepo::create(&pool, &new_project(alice, "Draft")).await.unwrap();
    let busy = ProjectRepo::create(&pool, &new_project(alice, "Busy")).await.unwrap();
    ProjectRepo::create(&pool, &new_project(bob, "Other")).await.unwrap();

    ProjectRepo::set_status(&pool, busy.id, ProjectStatus::Generating)
        .await
        .unwrap();

    let all = ProjectRepo::list_for_user(&pool, alice, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let generating = ProjectRepo::list_for_user(&pool, alice, Some(ProjectStatus::Generating))
        .await
        .unwrap();
    assert_eq!(generating.len(), 1);
    assert_eq!(generating[0].id, busy.id);

    let drafts = ProjectRepo::list_for_user(&pool, alice, Some(ProjectStatus::Draft))
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_update_and_cascade_delete(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let project = ProjectRepo::create(&pool, &new_project(user_id, "Old")).await.unwrap();
    let image_id = seed_image(&pool, project.id, "a river").await;

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            title: Some("New".to_string()),
            script_content: Some(Some("画面：石桥".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.status, "draft");
    assert_eq!(updated.script_content.as_deref(), Some("画面：石桥"));

    let cleared = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            script_content: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(cleared.script_content.is_none());
    assert_eq!(cleared.title, "New");

    assert!(ProjectRepo::delete(&pool, project.id).await.unwrap());
    assert!(ImageRepo::find_by_id(&pool, image_id).await.unwrap().is_none());
    assert!(!ProjectRepo::delete(&pool, project.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Generated media
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_comment_only_patch_leaves_other_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let project = ProjectRepo::create(&pool, &new_project(user_id, "P")).await.unwrap();
    let image_id = seed_image(&pool, project.id, "a bridge").await;

    let before = ImageRepo::update(
        &pool,
        image_id,
        &UpdateGeneratedImage {
            status: Some(GenerationStatus::Completed),
            image_url: Some("https://cdn.example.com/a.png".to_string()),
            jimeng_task_id: Some("task-1".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let after = ImageRepo::update(
        &pool,
        image_id,
        &UpdateGeneratedImage {
            review_comment: Some(Some("needs more light".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(after.review_comment.as_deref(), Some("needs more light"));
    assert_eq!(after.status, before.status);
    assert_eq!(after.review_status, before.review_status);
    assert_eq!(after.image_url, before.image_url);
    assert_eq!(after.jimeng_task_id, before.jimeng_task_id);
    assert_eq!(after.prompt, before.prompt);

    let cleared = ImageRepo::update(
        &pool,
        image_id,
        &UpdateGeneratedImage {
            review_comment: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.review_comment, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_list_filters_by_review_status(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let project = ProjectRepo::create(&pool, &new_project(user_id, "P")).await.unwrap();
    let approved = seed_image(&pool, project.id, "one").await;
    seed_image(&pool, project.id, "two").await;

    ImageRepo::update(
        &pool,
        approved,
        &UpdateGeneratedImage {
            review_status: Some(ReviewStatus::Approved),
            reviewer_id: Some(user_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let rows = ImageRepo::list(
        &pool,
        &ImageFilter {
            project_id: Some(project.id),
            review_status: Some(ReviewStatus::Approved),
            owner_id: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, approved);
    assert_eq!(rows[0].reviewer_id, Some(user_id));

    let all = ImageRepo::list(&pool, &ImageFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let stranger = seed_user(&pool, "stranger@example.com").await;
    let visible = ImageRepo::list(
        &pool,
        &ImageFilter {
            owner_id: Some(stranger),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(visible.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_update_sets_duration(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let project = ProjectRepo::create(&pool, &new_project(user_id, "P")).await.unwrap();
    let image_id = seed_image(&pool, project.id, "still").await;

    let video = VideoRepo::create(
        &pool,
        &CreateGeneratedVideo {
            project_id: project.id,
            image_id: Some(image_id),
            prompt: "pan left".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(video.status, "pending");
    assert_eq!(video.review_status, "pending");

    let updated = VideoRepo::update(
        &pool,
        video.id,
        &UpdateGeneratedVideo {
            duration: Some(8),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.duration, Some(8));
    assert_eq!(updated.image_id, Some(image_id));
}

// ---------------------------------------------------------------------------
// Review queue and dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_queue_merges_images_and_videos(pool: PgPool) {
    let user_id = seed_user(&pool, "owner@example.com").await;
    let project = ProjectRepo::create(&pool, &new_project(user_id, "Queue")).await.unwrap();
    let image_id = seed_image(&pool, project.id, "img").await;
    VideoRepo::create(
        &pool,
        &CreateGeneratedVideo {
            project_id: project.id,
            image_id: None,
            prompt: "vid".to_string(),
        },
    )
    .await
    .unwrap();

    let queue = DashboardRepo::review_queue(&pool, ReviewStatus::Pending, QueueMedia::All, None, None)
        .await
        .unwrap();
    assert_eq!(queue.len(), 2);
    assert!(queue.iter().all(|item| item.project_title == "Queue"));

    let images_only =
        DashboardRepo::review_queue(&pool, ReviewStatus::Pending, QueueMedia::Images, None, None)
            .await
            .unwrap();
    assert_eq!(images_only.len(), 1);
    assert_eq!(images_only[0].item_type, "image");
    assert_eq!(images_only[0].id, image_id);

    ImageRepo::update(
        &pool,
        image_id,
        &UpdateGeneratedImage {
            review_status: Some(ReviewStatus::Rejected),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let counts = DashboardRepo::review_counts(&pool).await.unwrap();
    assert_eq!((counts.pending, counts.approved, counts.rejected), (1, 0, 1));

    let totals = DashboardRepo::platform_totals(&pool).await.unwrap();
    assert_eq!(totals.users, 1);
    assert_eq!(totals.projects, 1);
    assert_eq!(totals.images, 1);
    assert_eq!(totals.videos, 1);
    assert_eq!(totals.pending_reviews, 1);
}

// ---------------------------------------------------------------------------
// Prompts, learnings, audit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_prompt_templates_filter_by_category_and_active(pool: PgPool) {
    for (name, category) in [
        ("ink", PromptCategory::Style),
        ("fade", PromptCategory::Transition),
        ("crowd", PromptCategory::Scene),
    ] {
        PromptTemplateRepo::create(
            &pool,
            &CreatePromptTemplate {
                name: name.to_string(),
                category,
                prompt_content: format!("{name} content"),
                description: None,
            },
        )
        .await
        .unwrap();
    }

    let styles = PromptTemplateRepo::list(&pool, Some(PromptCategory::Style), true)
        .await
        .unwrap();
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].category, "style");

    let all = PromptTemplateRepo::list(&pool, None, true).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_learning_outcome_recorded(pool: PgPool) {
    let user_id = seed_user(&pool, "learner@example.com").await;
    let learning = LearningRepo::create(
        &pool,
        &CreateVideoLearning {
            user_id,
            video_url: "https://cdn.example.com/ref.mp4".to_string(),
            video_name: "ref".to_string(),
            analysis_status: AnalysisStatus::Analyzing,
        },
    )
    .await
    .unwrap();
    assert_eq!(learning.analysis_status, "analyzing");

    let done = LearningRepo::record_outcome(
        &pool,
        learning.id,
        &AnalysisOutcome {
            analysis_status: AnalysisStatus::Completed,
            extracted_style_prompt: Some("warm tones".to_string()),
            extracted_transition_prompt: None,
            key_frames: Some(serde_json::json!(["f1.png", "f2.png"])),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(done.analysis_status, "completed");
    assert_eq!(done.extracted_style_prompt.as_deref(), Some("warm tones"));
    assert_matches!(done.key_frames, Some(serde_json::Value::Array(ref frames)) if frames.len() == 2);

    let mine = LearningRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_audit_log_redacts_and_filters(pool: PgPool) {
    let user_id = seed_user(&pool, "reviewer@example.com").await;

    let entry = AuditLogRepo::create(
        &pool,
        &CreateAuditLog {
            user_id: Some(user_id),
            action: "approve".to_string(),
            resource_type: ResourceType::Image,
            resource_id: 42,
            details: Some(serde_json::json!({"comment": "ok", "api_key": "sk-123"})),
        },
    )
    .await
    .unwrap();
    let details = entry.details.unwrap();
    assert_eq!(details["comment"], "ok");
    assert_eq!(details["api_key"], "[REDACTED]");

    AuditLogRepo::create(
        &pool,
        &CreateAuditLog {
            user_id: Some(user_id),
            action: "reject".to_string(),
            resource_type: ResourceType::Video,
            resource_id: 7,
            details: None,
        },
    )
    .await
    .unwrap();

    let images = AuditLogRepo::query(
        &pool,
        &AuditQuery {
            resource_type: Some(ResourceType::Image),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].resource_id, 42);

    let all = AuditLogRepo::query(
        &pool,
        &AuditQuery {
            user_id: Some(user_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 2);
}
