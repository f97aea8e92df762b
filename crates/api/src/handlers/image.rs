//! Handlers for the `/images` resource.
//!
//! Updates go through a single `PATCH /images` carrying the row id in the
//! body. Only fields present in the body are written; an explicit
//! `"review_comment": null` clears the comment.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use govai_core::error::CoreError;
use govai_core::patch::double_option;
use govai_core::prompt::validate_prompt;
use govai_core::status::{parse_filter, GenerationStatus, ResourceType, ReviewStatus};
use govai_core::types::DbId;
use govai_db::models::image::{
    CreateGeneratedImage, GeneratedImage, ImageFilter, UpdateGeneratedImage,
};
use govai_db::repositories::ImageRepo;
use serde::Deserialize;

use super::project::load_media_project;
use super::review::record_review_decision;
use super::non_empty;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImageListParams {
    pub project_id: Option<DbId>,
    pub review_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateImageRequest {
    pub project_id: DbId,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct PatchImageRequest {
    pub id: DbId,
    pub review_status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub review_comment: Option<Option<String>>,
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub jimeng_task_id: Option<String>,
}

/// GET /api/images?project_id=&review_status=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ImageListParams>,
) -> AppResult<Json<DataResponse<Vec<GeneratedImage>>>> {
    let filter = ImageFilter {
        project_id: params.project_id,
        review_status: parse_filter::<ReviewStatus>(params.review_status.as_deref())?,
        owner_id: auth.media_owner_scope(),
    };
    let images = ImageRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/images
///
/// Registers a prompt against a project with both statuses `pending`.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateImageRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<GeneratedImage>>)> {
    validate_prompt(&input.prompt)?;
    load_media_project(&state, &auth, input.project_id).await?;

    let image = ImageRepo::create(
        &state.pool,
        &CreateGeneratedImage {
            project_id: input.project_id,
            prompt: input.prompt,
        },
    )
    .await?;

    tracing::info!(image_id = image.id, project_id = image.project_id, "Image created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// GET /api/images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedImage>>> {
    let image = load_image(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: image }))
}

/// PATCH /api/images
///
/// Sparse update. Setting `review_status` records the caller as reviewer
/// and appends an audit entry; any review status may replace any other.
pub async fn patch(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<PatchImageRequest>,
) -> AppResult<Json<DataResponse<GeneratedImage>>> {
    let current = load_image(&state, &auth, input.id).await?;

    let review_status = parse_filter::<ReviewStatus>(input.review_status.as_deref())?;
    let update = UpdateGeneratedImage {
        review_status,
        review_comment: input.review_comment,
        reviewer_id: review_status.map(|_| auth.user_id),
        status: parse_filter::<GenerationStatus>(input.status.as_deref())?,
        image_url: non_empty(input.image_url),
        thumbnail_url: non_empty(input.thumbnail_url),
        jimeng_task_id: non_empty(input.jimeng_task_id),
    };

    let mut tx = state.pool.begin().await?;
    let image = ImageRepo::update(&mut *tx, input.id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: input.id,
        }))?;

    if let Some(decision) = review_status {
        record_review_decision(
            &mut tx,
            &auth,
            ResourceType::Image,
            image.id,
            &current.review_status,
            decision,
            image.review_comment.as_deref(),
        )
        .await?;
    }
    tx.commit().await?;

    Ok(Json(DataResponse { data: image }))
}

/// Load an image whose project the caller may see.
pub(crate) async fn load_image(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<GeneratedImage> {
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Image", id });

    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    match load_media_project(state, auth, image.project_id).await {
        Ok(_) => Ok(image),
        Err(AppError::Core(CoreError::NotFound { .. })) => Err(not_found()),
        Err(e) => Err(e),
    }
}
