//! Repository for the `generated_images` table.

use govai_core::status::{GenerationStatus, ReviewStatus};
use govai_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::image::{
    CreateGeneratedImage, GeneratedImage, ImageFilter, UpdateGeneratedImage,
};

const COLUMNS: &str = "id, project_id, prompt, image_url, thumbnail_url, status, review_status, \
                       review_comment, reviewer_id, jimeng_task_id, created_at, updated_at";

/// Provides CRUD operations for generated images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image row with both statuses `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedImage,
    ) -> Result<GeneratedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_images (project_id, prompt, status, review_status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(input.project_id)
            .bind(&input.prompt)
            .bind(GenerationStatus::Pending.as_str())
            .bind(ReviewStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an image by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GeneratedImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated_images WHERE id = $1");
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List images matching every supplied filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ImageFilter,
    ) -> Result<Vec<GeneratedImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_images
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::TEXT IS NULL OR review_status = $2)
               AND ($3::BIGINT IS NULL
                    OR project_id IN (SELECT id FROM projects WHERE user_id = $3))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(filter.project_id)
            .bind(filter.review_status.map(ReviewStatus::as_str))
            .bind(filter.owner_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse update. Columns whose field is `None` keep their value;
    /// `review_comment: Some(None)` clears the comment.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateGeneratedImage,
    ) -> Result<Option<GeneratedImage>, sqlx::Error> {
        let query = format!(
            "UPDATE generated_images SET
                review_status = COALESCE($2, review_status),
                review_comment = CASE WHEN $3 THEN $4 ELSE review_comment END,
                reviewer_id = COALESCE($5, reviewer_id),
                status = COALESCE($6, status),
                image_url = COALESCE($7, image_url),
                thumbnail_url = COALESCE($8, thumbnail_url),
                jimeng_task_id = COALESCE($9, jimeng_task_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(id)
            .bind(input.review_status.map(ReviewStatus::as_str))
            .bind(input.review_comment.is_some())
            .bind(input.review_comment.clone().flatten())
            .bind(input.reviewer_id)
            .bind(input.status.map(GenerationStatus::as_str))
            .bind(&input.image_url)
            .bind(&input.thumbnail_url)
            .bind(&input.jimeng_task_id)
            .fetch_optional(executor)
            .await
    }
}
