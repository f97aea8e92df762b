//! Video learning (reference-video analysis) model and DTOs.

use govai_core::status::AnalysisStatus;
use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `video_learnings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoLearning {
    pub id: DbId,
    pub user_id: DbId,
    pub video_url: String,
    pub video_name: String,
    pub extracted_style_prompt: Option<String>,
    pub extracted_transition_prompt: Option<String>,
    /// JSON array of key frame references returned by the analysis.
    pub key_frames: Option<serde_json::Value>,
    pub thumbnail_url: Option<String>,
    pub analysis_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a reference video.
#[derive(Debug, Clone)]
pub struct CreateVideoLearning {
    pub user_id: DbId,
    pub video_url: String,
    pub video_name: String,
    pub analysis_status: AnalysisStatus,
}

/// Analysis outcome written back onto a learning row.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis_status: AnalysisStatus,
    pub extracted_style_prompt: Option<String>,
    pub extracted_transition_prompt: Option<String>,
    pub key_frames: Option<serde_json::Value>,
}
