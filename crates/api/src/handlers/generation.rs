//! Generation workflow: submit rows to the generation API and sync their
//! task state back.
//!
//! Each submit is a single attempt. A failed submit marks the row `failed`
//! and answers 502; the batch endpoint isolates failures per scene instead.

use axum::extract::{Path, State};
use axum::Json;
use govai_core::audit::actions;
use govai_core::error::CoreError;
use govai_core::prompt::{compose_prompt, normalize_negative_prompt, validate_prompt};
use govai_core::script::extract_scene_prompts;
use govai_core::status::{GenerationStatus, ProjectStatus, ResourceType};
use govai_core::types::DbId;
use govai_db::models::art_style::ArtStyle;
use govai_db::models::audit::CreateAuditLog;
use govai_db::models::image::{CreateGeneratedImage, GeneratedImage, UpdateGeneratedImage};
use govai_db::models::project::Project;
use govai_db::models::video::{GeneratedVideo, UpdateGeneratedVideo};
use govai_db::repositories::{ArtStyleRepo, AuditLogRepo, ImageRepo, ProjectRepo, VideoRepo};
use govai_jimeng::{ImageGenerationRequest, TaskResponse, TaskStatus, VideoGenerationRequest};
use serde::Serialize;

use super::image::load_image;
use super::project::{load_accessible_project, load_media_project};
use super::video::load_video;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a batch submission for a project.
#[derive(Debug, Serialize)]
pub struct BatchGenerationResult {
    pub images: Vec<GeneratedImage>,
    pub submitted: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// POST /api/images/{id}/generate
pub async fn generate_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedImage>>> {
    let image = load_image(&state, &auth, id).await?;
    let project = load_media_project(&state, &auth, image.project_id).await?;
    let style = project_style(&state, &project).await?;

    let image = submit_image(&state, &image, style.as_ref())
        .await
        .map_err(|(_, err)| err)?;

    record_generation(
        &state,
        &auth,
        ResourceType::Image,
        image.id,
        image.jimeng_task_id.as_deref(),
    )
    .await?;
    Ok(Json(DataResponse { data: image }))
}

/// POST /api/images/{id}/sync
///
/// Poll the image's task once and copy its state onto the row.
pub async fn sync_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedImage>>> {
    let image = load_image(&state, &auth, id).await?;
    let task_id = require_task_id(image.jimeng_task_id.as_deref(), "Image", id)?;

    let task = state.jimeng.get_task_status(task_id).await?;
    let update = image_update_from_task(&task);
    let image = ImageRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Image", id }))?;

    tracing::debug!(image_id = id, task_id, status = %image.status, "Image task synced");
    Ok(Json(DataResponse { data: image }))
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// POST /api/videos/{id}/generate
///
/// Animates the source image when the video references one that has a URL.
pub async fn generate_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedVideo>>> {
    let video = load_video(&state, &auth, id).await?;
    let project = load_media_project(&state, &auth, video.project_id).await?;
    let style = project_style(&state, &project).await?;

    let image_url = match video.image_id {
        Some(image_id) => ImageRepo::find_by_id(&state.pool, image_id)
            .await?
            .and_then(|img| img.image_url),
        None => None,
    };

    let request = VideoGenerationRequest {
        prompt: compose_prompt(&video.prompt, style.as_ref().map(|s| s.prompt_template.as_str())),
        image_url,
        duration: video.duration.and_then(|d| u32::try_from(d).ok()),
        fps: None,
    };

    let video = match state.jimeng.generate_video(&request).await {
        Ok(task) => VideoRepo::update(&state.pool, id, &video_update_from_task(&task))
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))?,
        Err(err) => {
            tracing::warn!(video_id = id, error = %err, "Video submission failed");
            mark_video_failed(&state, id).await?;
            return Err(err.into());
        }
    };

    record_generation(
        &state,
        &auth,
        ResourceType::Video,
        video.id,
        video.jimeng_task_id.as_deref(),
    )
    .await?;
    tracing::info!(video_id = id, task_id = ?video.jimeng_task_id, "Video submitted");
    Ok(Json(DataResponse { data: video }))
}

/// POST /api/videos/{id}/sync
pub async fn sync_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedVideo>>> {
    let video = load_video(&state, &auth, id).await?;
    let task_id = require_task_id(video.jimeng_task_id.as_deref(), "Video", id)?;

    let task = state.jimeng.get_task_status(task_id).await?;
    let video = VideoRepo::update(&state.pool, id, &video_update_from_task(&task))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))?;

    tracing::debug!(video_id = id, task_id, status = %video.status, "Video task synced");
    Ok(Json(DataResponse { data: video }))
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// POST /api/projects/{id}/generate-images
///
/// One image per scene of the project's script, submitted sequentially.
/// A failed scene is marked `failed` and the rest continue.
pub async fn generate_project_images(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BatchGenerationResult>>> {
    let project = load_accessible_project(&state, &auth, id).await?;

    let scenes = extract_scene_prompts(project.script_content.as_deref().unwrap_or_default());
    if scenes.is_empty() {
        return Err(AppError::BadRequest(
            "Project has no script content to generate from".into(),
        ));
    }
    for scene in &scenes {
        validate_prompt(scene)?;
    }

    let style = project_style(&state, &project).await?;
    ProjectRepo::set_status(&state.pool, id, ProjectStatus::Generating).await?;

    let mut result = BatchGenerationResult {
        images: Vec::with_capacity(scenes.len()),
        submitted: 0,
        failed: 0,
    };

    for prompt in scenes {
        let created = ImageRepo::create(
            &state.pool,
            &CreateGeneratedImage {
                project_id: id,
                prompt,
            },
        )
        .await;
        let image = match created {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(project_id = id, error = %err, "Scene image row not created");
                result.failed += 1;
                continue;
            }
        };

        match submit_image(&state, &image, style.as_ref()).await {
            Ok(image) => {
                result.submitted += 1;
                result.images.push(image);
            }
            Err((failed_image, _)) => {
                result.failed += 1;
                result.images.push(failed_image);
            }
        }
    }

    AuditLogRepo::create(
        &state.pool,
        &CreateAuditLog {
            user_id: Some(auth.user_id),
            action: actions::GENERATE.to_string(),
            resource_type: ResourceType::Project,
            resource_id: id,
            details: Some(serde_json::json!({
                "submitted": result.submitted,
                "failed": result.failed,
            })),
        },
    )
    .await?;

    tracing::info!(
        project_id = id,
        submitted = result.submitted,
        failed = result.failed,
        "Batch image generation submitted",
    );
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Submit one image row. On failure the row is marked `failed` and returned
/// alongside the error so batch callers can keep it.
async fn submit_image(
    state: &AppState,
    image: &GeneratedImage,
    style: Option<&ArtStyle>,
) -> Result<GeneratedImage, (GeneratedImage, AppError)> {
    let request = ImageGenerationRequest {
        prompt: compose_prompt(&image.prompt, style.map(|s| s.prompt_template.as_str())),
        negative_prompt: normalize_negative_prompt(
            style.and_then(|s| s.negative_prompt.as_deref()),
        ),
        style: style.map(|s| s.name.clone()),
        ..Default::default()
    };

    let outcome = match state.jimeng.generate_image(&request).await {
        Ok(task) => {
            tracing::info!(image_id = image.id, task_id = %task.task_id, "Image submitted");
            ImageRepo::update(&state.pool, image.id, &image_update_from_task(&task)).await
        }
        Err(err) => {
            tracing::warn!(image_id = image.id, error = %err, "Image submission failed");
            let failed = ImageRepo::update(
                &state.pool,
                image.id,
                &UpdateGeneratedImage {
                    status: Some(GenerationStatus::Failed),
                    ..Default::default()
                },
            )
            .await;
            return Err(match failed {
                Ok(Some(row)) => (row, err.into()),
                Ok(None) => (image.clone(), err.into()),
                Err(db_err) => (image.clone(), db_err.into()),
            });
        }
    };

    match outcome {
        Ok(Some(row)) => Ok(row),
        Ok(None) => Err((
            image.clone(),
            AppError::Core(CoreError::NotFound {
                entity: "Image",
                id: image.id,
            }),
        )),
        Err(db_err) => Err((image.clone(), db_err.into())),
    }
}

async fn mark_video_failed(state: &AppState, id: DbId) -> AppResult<()> {
    VideoRepo::update(
        &state.pool,
        id,
        &UpdateGeneratedVideo {
            status: Some(GenerationStatus::Failed),
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}

/// The project's art style, if it has one and it still exists.
async fn project_style(state: &AppState, project: &Project) -> AppResult<Option<ArtStyle>> {
    match project.art_style_id {
        Some(style_id) => Ok(ArtStyleRepo::find_by_id(&state.pool, style_id).await?),
        None => Ok(None),
    }
}

fn require_task_id<'a>(
    task_id: Option<&'a str>,
    entity: &str,
    id: DbId,
) -> Result<&'a str, AppError> {
    task_id.filter(|t| !t.is_empty()).ok_or_else(|| {
        AppError::BadRequest(format!("{entity} {id} has not been submitted for generation"))
    })
}

async fn record_generation(
    state: &AppState,
    auth: &AuthUser,
    resource_type: ResourceType,
    resource_id: DbId,
    task_id: Option<&str>,
) -> AppResult<()> {
    AuditLogRepo::create(
        &state.pool,
        &CreateAuditLog {
            user_id: Some(auth.user_id),
            action: actions::GENERATE.to_string(),
            resource_type,
            resource_id,
            details: Some(serde_json::json!({ "task_id": task_id })),
        },
    )
    .await?;
    Ok(())
}

/// Row status for a remote task status. A task that exists but has not
/// finished counts as generating.
pub fn generation_status(task: TaskStatus) -> GenerationStatus {
    match task {
        TaskStatus::Pending | TaskStatus::Processing => GenerationStatus::Generating,
        TaskStatus::Completed => GenerationStatus::Completed,
        TaskStatus::Failed => GenerationStatus::Failed,
    }
}

fn image_update_from_task(task: &TaskResponse) -> UpdateGeneratedImage {
    let completed = task.status == TaskStatus::Completed;
    UpdateGeneratedImage {
        status: Some(generation_status(task.status)),
        jimeng_task_id: Some(task.task_id.clone()),
        image_url: task.result_url.clone().filter(|_| completed),
        thumbnail_url: task.thumbnail_url.clone().filter(|_| completed),
        ..Default::default()
    }
}

fn video_update_from_task(task: &TaskResponse) -> UpdateGeneratedVideo {
    let completed = task.status == TaskStatus::Completed;
    UpdateGeneratedVideo {
        status: Some(generation_status(task.status)),
        jimeng_task_id: Some(task.task_id.clone()),
        video_url: task.result_url.clone().filter(|_| completed),
        thumbnail_url: task.thumbnail_url.clone().filter(|_| completed),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus, url: Option<&str>) -> TaskResponse {
        TaskResponse {
            task_id: "t-9".into(),
            status,
            result_url: url.map(str::to_string),
            thumbnail_url: None,
            error: None,
        }
    }

    #[test]
    fn task_status_maps_onto_row_status() {
        assert_eq!(generation_status(TaskStatus::Pending), GenerationStatus::Generating);
        assert_eq!(generation_status(TaskStatus::Processing), GenerationStatus::Generating);
        assert_eq!(generation_status(TaskStatus::Completed), GenerationStatus::Completed);
        assert_eq!(generation_status(TaskStatus::Failed), GenerationStatus::Failed);
    }

    #[test]
    fn result_url_only_copied_when_completed() {
        let update = image_update_from_task(&task(TaskStatus::Processing, Some("https://x/a.png")));
        assert_eq!(update.image_url, None);
        assert_eq!(update.jimeng_task_id.as_deref(), Some("t-9"));

        let update = video_update_from_task(&task(TaskStatus::Completed, Some("https://x/a.mp4")));
        assert_eq!(update.video_url.as_deref(), Some("https://x/a.mp4"));
        assert_eq!(update.status, Some(GenerationStatus::Completed));
    }

    #[test]
    fn missing_task_id_is_bad_request() {
        assert!(matches!(
            require_task_id(None, "Image", 3),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            require_task_id(Some(""), "Image", 3),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(require_task_id(Some("t"), "Image", 3).unwrap(), "t");
    }
}
