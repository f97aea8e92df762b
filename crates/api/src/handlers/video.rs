//! Handlers for the `/videos` resource.
//!
//! Mirrors [`super::image`] with an optional source `image_id` on create and
//! a `duration` field on patch.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use govai_core::error::CoreError;
use govai_core::patch::double_option;
use govai_core::prompt::validate_prompt;
use govai_core::status::{parse_filter, GenerationStatus, ResourceType, ReviewStatus};
use govai_core::types::DbId;
use govai_db::models::video::{
    CreateGeneratedVideo, GeneratedVideo, UpdateGeneratedVideo, VideoFilter,
};
use govai_db::repositories::VideoRepo;
use serde::Deserialize;

use super::image::load_image;
use super::non_empty;
use super::project::load_media_project;
use super::review::record_review_decision;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VideoListParams {
    pub project_id: Option<DbId>,
    pub review_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub project_id: DbId,
    pub image_id: Option<DbId>,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct PatchVideoRequest {
    pub id: DbId,
    pub review_status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub review_comment: Option<Option<String>>,
    pub status: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub jimeng_task_id: Option<String>,
    pub duration: Option<i32>,
}

/// GET /api/videos?project_id=&review_status=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<VideoListParams>,
) -> AppResult<Json<DataResponse<Vec<GeneratedVideo>>>> {
    let filter = VideoFilter {
        project_id: params.project_id,
        review_status: parse_filter::<ReviewStatus>(params.review_status.as_deref())?,
        owner_id: auth.media_owner_scope(),
    };
    let videos = VideoRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: videos }))
}

/// POST /api/videos
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateVideoRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<GeneratedVideo>>)> {
    validate_prompt(&input.prompt)?;
    load_media_project(&state, &auth, input.project_id).await?;

    if let Some(image_id) = input.image_id {
        let image = load_image(&state, &auth, image_id).await?;
        if image.project_id != input.project_id {
            return Err(AppError::BadRequest(format!(
                "Image {image_id} belongs to a different project"
            )));
        }
    }

    let video = VideoRepo::create(
        &state.pool,
        &CreateGeneratedVideo {
            project_id: input.project_id,
            image_id: input.image_id,
            prompt: input.prompt,
        },
    )
    .await?;

    tracing::info!(video_id = video.id, project_id = video.project_id, "Video created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}

/// GET /api/videos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedVideo>>> {
    let video = load_video(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: video }))
}

/// PATCH /api/videos
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PatchVideoRequest>,
) -> AppResult<Json<DataResponse<GeneratedVideo>>> {
    let current = load_video(&state, &auth, input.id).await?;

    if input.duration.is_some_and(|d| d <= 0) {
        return Err(AppError::Core(CoreError::Validation(
            "duration must be a positive number of seconds".into(),
        )));
    }

    let review_status = parse_filter::<ReviewStatus>(input.review_status.as_deref())?;
    let update = UpdateGeneratedVideo {
        review_status,
        review_comment: input.review_comment,
        reviewer_id: review_status.map(|_| auth.user_id),
        status: parse_filter::<GenerationStatus>(input.status.as_deref())?,
        video_url: non_empty(input.video_url),
        thumbnail_url: non_empty(input.thumbnail_url),
        jimeng_task_id: non_empty(input.jimeng_task_id),
        duration: input.duration,
    };

    let mut tx = state.pool.begin().await?;
    let video = VideoRepo::update(&mut *tx, input.id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: input.id,
        }))?;

    if let Some(decision) = review_status {
        record_review_decision(
            &mut tx,
            &auth,
            ResourceType::Video,
            video.id,
            &current.review_status,
            decision,
            video.review_comment.as_deref(),
        )
        .await?;
    }
    tx.commit().await?;

    Ok(Json(DataResponse { data: video }))
}

pub(crate) async fn load_video(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<GeneratedVideo> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Video", id });

    let video = VideoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    match load_media_project(state, auth, video.project_id).await {
        Ok(_) => Ok(video),
        Err(AppError::Core(CoreError::NotFound { .. })) => Err(not_found()),
        Err(e) => Err(e),
    }
}
