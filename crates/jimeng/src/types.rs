//! Request and response bodies of the generation API.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/images/generations`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Body of `POST /v1/videos/generations`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoGenerationRequest {
    pub prompt: String,
    /// Source still to animate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Clip length in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
}

/// Lifecycle of a remote generation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Task state returned by submission and polling endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub result_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Style and transition cues extracted from a reference video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub style_prompt: String,
    #[serde(default)]
    pub transition_prompt: Option<String>,
    #[serde(default)]
    pub key_frames: Vec<String>,
}

/// Envelope of `POST /v1/videos/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<VideoAnalysis>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AnalyzeResponse {
    /// The analysis payload, or the service's explanation of why there is none.
    pub fn into_result(self) -> Result<VideoAnalysis, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| "analysis returned no data".to_string())),
        }
    }
}
