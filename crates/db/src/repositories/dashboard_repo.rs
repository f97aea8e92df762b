//! Aggregate read queries for the review queue and admin dashboard.

use govai_core::status::ReviewStatus;
use sqlx::PgPool;

use crate::models::dashboard::{PlatformTotals, ReviewCounts, ReviewQueueItem};
use crate::{clamp_limit, clamp_offset};

const DEFAULT_QUEUE_LIMIT: i64 = 100;
const MAX_QUEUE_LIMIT: i64 = 500;

/// Which media tables the review queue draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMedia {
    All,
    Images,
    Videos,
}

pub struct DashboardRepo;

impl DashboardRepo {
    /// Totals shown on the admin dashboard.
    pub async fn platform_totals(pool: &PgPool) -> Result<PlatformTotals, sqlx::Error> {
        sqlx::query_as::<_, PlatformTotals>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM projects) AS projects,
                (SELECT COUNT(*) FROM generated_images) AS images,
                (SELECT COUNT(*) FROM generated_videos) AS videos,
                (SELECT COUNT(*) FROM generated_images WHERE review_status = 'pending')
                  + (SELECT COUNT(*) FROM generated_videos WHERE review_status = 'pending')
                  AS pending_reviews",
        )
        .fetch_one(pool)
        .await
    }

    /// Review decision counts across images and videos.
    pub async fn review_counts(pool: &PgPool) -> Result<ReviewCounts, sqlx::Error> {
        sqlx::query_as::<_, ReviewCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE review_status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE review_status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE review_status = 'rejected') AS rejected
             FROM (
                SELECT review_status FROM generated_images
                UNION ALL
                SELECT review_status FROM generated_videos
             ) r",
        )
        .fetch_one(pool)
        .await
    }

    /// Merged image/video queue for one review status, newest first.
    pub async fn review_queue(
        pool: &PgPool,
        review_status: ReviewStatus,
        media: QueueMedia,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ReviewQueueItem>, sqlx::Error> {
        sqlx::query_as::<_, ReviewQueueItem>(
            "SELECT item_type, id, project_id, project_title, prompt, media_url, thumbnail_url,
                    status, review_status, review_comment, created_at
             FROM (
                SELECT 'image'::TEXT AS item_type, gi.id, gi.project_id, p.title AS project_title,
                       gi.prompt, gi.image_url AS media_url, gi.thumbnail_url, gi.status,
                       gi.review_status, gi.review_comment, gi.created_at
                FROM generated_images gi
                JOIN projects p ON p.id = gi.project_id
                WHERE gi.review_status = $1 AND $2
                UNION ALL
                SELECT 'video'::TEXT AS item_type, gv.id, gv.project_id, p.title AS project_title,
                       gv.prompt, gv.video_url AS media_url, gv.thumbnail_url, gv.status,
                       gv.review_status, gv.review_comment, gv.created_at
                FROM generated_videos gv
                JOIN projects p ON p.id = gv.project_id
                WHERE gv.review_status = $1 AND $3
             ) q
             ORDER BY created_at DESC, item_type ASC, id DESC
             LIMIT $4 OFFSET $5",
        )
        .bind(review_status.as_str())
        .bind(media != QueueMedia::Videos)
        .bind(media != QueueMedia::Images)
        .bind(clamp_limit(limit, DEFAULT_QUEUE_LIMIT, MAX_QUEUE_LIMIT))
        .bind(clamp_offset(offset))
        .fetch_all(pool)
        .await
    }
}
