//! Read-only aggregate models.

use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Platform-wide totals for the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlatformTotals {
    pub users: i64,
    pub projects: i64,
    pub images: i64,
    pub videos: i64,
    pub pending_reviews: i64,
}

/// Review decision counts across images and videos.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ReviewCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

/// One entry in the merged review queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewQueueItem {
    /// `"image"` or `"video"`.
    pub item_type: String,
    pub id: DbId,
    pub project_id: DbId,
    pub project_title: String,
    pub prompt: String,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: String,
    pub review_status: String,
    pub review_comment: Option<String>,
    pub created_at: Timestamp,
}
