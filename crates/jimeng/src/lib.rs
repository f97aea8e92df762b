//! Client library for the Jimeng generation API.
//!
//! Jimeng is a task-based service: a generation request returns a task id
//! immediately and the result is fetched later by polling the task.

pub mod api;
pub mod config;
pub mod types;

pub use api::{JimengApi, JimengApiError};
pub use config::JimengConfig;
pub use types::{
    AnalyzeResponse, ImageGenerationRequest, TaskResponse, TaskStatus, VideoAnalysis,
    VideoGenerationRequest,
};
