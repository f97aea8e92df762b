//! Generated video model and DTOs.

use govai_core::status::{GenerationStatus, ReviewStatus};
use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `generated_videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneratedVideo {
    pub id: DbId,
    pub project_id: DbId,
    pub image_id: Option<DbId>,
    pub prompt: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub review_status: String,
    pub review_comment: Option<String>,
    pub reviewer_id: Option<DbId>,
    pub jimeng_task_id: Option<String>,
    /// Clip length in seconds.
    pub duration: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a generated video. Both statuses start as `pending`.
#[derive(Debug, Clone)]
pub struct CreateGeneratedVideo {
    pub project_id: DbId,
    pub image_id: Option<DbId>,
    pub prompt: String,
}

/// Sparse update for a generated video. See
/// [`UpdateGeneratedImage`](crate::models::image::UpdateGeneratedImage).
#[derive(Debug, Clone, Default)]
pub struct UpdateGeneratedVideo {
    pub review_status: Option<ReviewStatus>,
    pub review_comment: Option<Option<String>>,
    pub reviewer_id: Option<DbId>,
    pub status: Option<GenerationStatus>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub jimeng_task_id: Option<String>,
    pub duration: Option<i32>,
}

/// Filters for listing generated videos.
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    pub project_id: Option<DbId>,
    pub review_status: Option<ReviewStatus>,
    /// Restrict to projects owned by this user.
    pub owner_id: Option<DbId>,
}
