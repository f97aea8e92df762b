//! REST client for the Jimeng generation endpoints.
//!
//! Every call is a single attempt. There is no retry, backoff or caching;
//! callers decide what a failure means for their row.

use serde::de::DeserializeOwned;

use crate::config::JimengConfig;
use crate::types::{
    AnalyzeResponse, ImageGenerationRequest, TaskResponse, VideoGenerationRequest,
};

/// HTTP client bound to one API base URL and key.
#[derive(Debug, Clone)]
pub struct JimengApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the generation API layer.
#[derive(Debug, thiserror::Error)]
pub enum JimengApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, bad JSON).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Jimeng API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The task id cannot be used as a single path segment.
    #[error("Invalid task id: {0:?}")]
    InvalidTaskId(String),

    /// The configured base URL cannot be extended with a path.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl JimengApi {
    /// Build a client from config, applying its request timeout.
    pub fn new(config: &JimengConfig) -> Result<Self, JimengApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.api_key.clone(),
        ))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Submit an image generation job (`POST /v1/images/generations`).
    pub async fn generate_image(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<TaskResponse, JimengApiError> {
        tracing::debug!(prompt_len = request.prompt.len(), "Submitting image generation");
        let response = self
            .client
            .post(self.url("/v1/images/generations"))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit a video generation job (`POST /v1/videos/generations`).
    pub async fn generate_video(
        &self,
        request: &VideoGenerationRequest,
    ) -> Result<TaskResponse, JimengApiError> {
        tracing::debug!(
            prompt_len = request.prompt.len(),
            has_image = request.image_url.is_some(),
            "Submitting video generation",
        );
        let response = self
            .client
            .post(self.url("/v1/videos/generations"))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the current state of a task (`GET /v1/tasks/{id}`).
    ///
    /// The id is percent-encoded as one path segment.
    pub async fn get_task_status(&self, task_id: &str) -> Result<TaskResponse, JimengApiError> {
        let response = self
            .client
            .get(self.task_url(task_id)?)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ask the service to extract style cues from a reference video
    /// (`POST /v1/videos/analyze`).
    pub async fn analyze_video(&self, video_url: &str) -> Result<AnalyzeResponse, JimengApiError> {
        let response = self
            .client
            .post(self.url("/v1/videos/analyze"))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "video_url": video_url }))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn task_url(&self, task_id: &str) -> Result<reqwest::Url, JimengApiError> {
        if matches!(task_id, "" | "." | "..") {
            return Err(JimengApiError::InvalidTaskId(task_id.to_string()));
        }
        let mut url = reqwest::Url::parse(&self.url("/v1/tasks"))
            .map_err(|e| JimengApiError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| JimengApiError::InvalidBaseUrl(self.base_url.clone()))?
            .push(task_id);
        Ok(url)
    }

    /// Return the response unchanged on 2xx, otherwise an
    /// [`JimengApiError::ApiError`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, JimengApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(JimengApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, JimengApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
