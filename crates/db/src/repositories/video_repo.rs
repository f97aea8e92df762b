//! Repository for the `generated_videos` table.

use govai_core::status::{GenerationStatus, ReviewStatus};
use govai_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::video::{
    CreateGeneratedVideo, GeneratedVideo, UpdateGeneratedVideo, VideoFilter,
};

const COLUMNS: &str = "id, project_id, image_id, prompt, video_url, thumbnail_url, status, \
                       review_status, review_comment, reviewer_id, jimeng_task_id, duration, \
                       created_at, updated_at";

/// Provides CRUD operations for generated videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video row with both statuses `pending`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedVideo,
    ) -> Result<GeneratedVideo, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_videos (project_id, image_id, prompt, status, review_status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedVideo>(&query)
            .bind(input.project_id)
            .bind(input.image_id)
            .bind(&input.prompt)
            .bind(GenerationStatus::Pending.as_str())
            .bind(ReviewStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a video by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GeneratedVideo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated_videos WHERE id = $1");
        sqlx::query_as::<_, GeneratedVideo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List videos matching every supplied filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &VideoFilter,
    ) -> Result<Vec<GeneratedVideo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generated_videos
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND ($2::TEXT IS NULL OR review_status = $2)
               AND ($3::BIGINT IS NULL
                    OR project_id IN (SELECT id FROM projects WHERE user_id = $3))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GeneratedVideo>(&query)
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
        input: &UpdateGeneratedVideo,
    ) -> Result<Option<GeneratedVideo>, sqlx::Error> {
        let query = format!(
            "UPDATE generated_videos SET
                review_status = COALESCE($2, review_status),
                review_comment = CASE WHEN $3 THEN $4 ELSE review_comment END,
                reviewer_id = COALESCE($5, reviewer_id),
                status = COALESCE($6, status),
                video_url = COALESCE($7, video_url),
                thumbnail_url = COALESCE($8, thumbnail_url),
                jimeng_task_id = COALESCE($9, jimeng_task_id),
                duration = COALESCE($10, duration)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedVideo>(&query)
            .bind(id)
            .bind(input.review_status.map(ReviewStatus::as_str))
            .bind(input.review_comment.is_some())
            .bind(input.review_comment.clone().flatten())
            .bind(input.reviewer_id)
            .bind(input.status.map(GenerationStatus::as_str))
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(&input.jimeng_task_id)
            .bind(input.duration)
            .fetch_optional(executor)
            .await
    }
}
