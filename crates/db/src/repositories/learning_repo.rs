//! Repository for the `video_learnings` table.

use govai_core::types::DbId;
use sqlx::PgPool;

use crate::models::learning::{AnalysisOutcome, CreateVideoLearning, VideoLearning};

const COLUMNS: &str = "id, user_id, video_url, video_name, extracted_style_prompt, \
                       extracted_transition_prompt, key_frames, thumbnail_url, analysis_status, \
                       created_at, updated_at";

pub struct LearningRepo;

impl LearningRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateVideoLearning,
    ) -> Result<VideoLearning, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_learnings (user_id, video_url, video_name, analysis_status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoLearning>(&query)
            .bind(input.user_id)
            .bind(&input.video_url)
            .bind(&input.video_name)
            .bind(input.analysis_status.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VideoLearning>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM video_learnings WHERE id = $1");
        sqlx::query_as::<_, VideoLearning>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's reference videos, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<VideoLearning>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_learnings WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, VideoLearning>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Write the analysis result (or failure) onto the row.
    pub async fn record_outcome(
        pool: &PgPool,
        id: DbId,
        outcome: &AnalysisOutcome,
    ) -> Result<Option<VideoLearning>, sqlx::Error> {
        let query = format!(
            "UPDATE video_learnings SET
                analysis_status = $2,
                extracted_style_prompt = COALESCE($3, extracted_style_prompt),
                extracted_transition_prompt = COALESCE($4, extracted_transition_prompt),
                key_frames = COALESCE($5, key_frames)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoLearning>(&query)
            .bind(id)
            .bind(outcome.analysis_status.as_str())
            .bind(&outcome.extracted_style_prompt)
            .bind(&outcome.extracted_transition_prompt)
            .bind(&outcome.key_frames)
            .fetch_optional(pool)
            .await
    }
}
