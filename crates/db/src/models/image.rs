//! Generated image model and DTOs.

use govai_core::status::{GenerationStatus, ReviewStatus};
use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `generated_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneratedImage {
    pub id: DbId,
    pub project_id: DbId,
    pub prompt: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub review_status: String,
    pub review_comment: Option<String>,
    pub reviewer_id: Option<DbId>,
    pub jimeng_task_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a generated image. Both statuses start as `pending`.
#[derive(Debug, Clone)]
pub struct CreateGeneratedImage {
    pub project_id: DbId,
    pub prompt: String,
}

/// Sparse update for a generated image.
///
/// `None` leaves a column untouched. `review_comment` is doubly optional so
/// `Some(None)` clears the comment.
#[derive(Debug, Clone, Default)]
pub struct UpdateGeneratedImage {
    pub review_status: Option<ReviewStatus>,
    pub review_comment: Option<Option<String>>,
    pub reviewer_id: Option<DbId>,
    pub status: Option<GenerationStatus>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub jimeng_task_id: Option<String>,
}

/// Filters for listing generated images.
#[derive(Debug, Clone, Default)]
pub struct ImageFilter {
    pub project_id: Option<DbId>,
    pub review_status: Option<ReviewStatus>,
    /// Restrict to projects owned by this user.
    pub owner_id: Option<DbId>,
}
