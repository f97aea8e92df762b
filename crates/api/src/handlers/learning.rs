//! Video learning: extract reusable style cues from reference videos.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use govai_core::error::CoreError;
use govai_core::status::{AnalysisStatus, PromptCategory};
use govai_core::types::DbId;
use govai_db::models::learning::{AnalysisOutcome, CreateVideoLearning, VideoLearning};
use govai_db::models::prompt_template::{CreatePromptTemplate, PromptTemplate};
use govai_db::repositories::{LearningRepo, PromptTemplateRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLearningRequest {
    #[validate(url)]
    pub video_url: String,
    #[validate(length(min = 1, max = 200))]
    pub video_name: String,
}

/// Optional body of `POST /learnings/{id}/save-template`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SaveTemplateRequest {
    /// Base name for the saved templates; defaults to the video name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}

/// POST /api/learnings
///
/// Registers the video and analyses it synchronously. Analysis failures are
/// recorded on the row (`failed`) rather than returned as errors.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateLearningRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<VideoLearning>>)> {
    input.validate()?;

    let learning = LearningRepo::create(
        &state.pool,
        &CreateVideoLearning {
            user_id: auth.user_id,
            video_url: input.video_url,
            video_name: input.video_name,
            analysis_status: AnalysisStatus::Analyzing,
        },
    )
    .await?;

    let outcome = match state.jimeng.analyze_video(&learning.video_url).await {
        Ok(response) => match response.into_result() {
            Ok(analysis) => AnalysisOutcome {
                analysis_status: AnalysisStatus::Completed,
                extracted_style_prompt: Some(analysis.style_prompt),
                extracted_transition_prompt: analysis.transition_prompt,
                key_frames: Some(serde_json::json!(analysis.key_frames)),
            },
            Err(reason) => {
                tracing::warn!(learning_id = learning.id, %reason, "Video analysis rejected");
                failed_outcome()
            }
        },
        Err(err) => {
            tracing::warn!(learning_id = learning.id, error = %err, "Video analysis failed");
            failed_outcome()
        }
    };

    let learning = LearningRepo::record_outcome(&state.pool, learning.id, &outcome)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoLearning",
            id: learning.id,
        }))?;

    tracing::info!(
        learning_id = learning.id,
        status = %learning.analysis_status,
        "Reference video analysed",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: learning })))
}

/// GET /api/learnings
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<VideoLearning>>>> {
    let learnings = LearningRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: learnings }))
}

/// POST /api/learnings/{id}/save-template
///
/// Saves the extracted style prompt (and the transition prompt, when there
/// is one) as prompt templates.
pub async fn save_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    input: Option<Json<SaveTemplateRequest>>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<PromptTemplate>>>)> {
    let input = input.map(|Json(body)| body).unwrap_or_default();
    input.validate()?;

    let learning = LearningRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|l| l.user_id == auth.user_id || auth.is_admin())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoLearning",
            id,
        }))?;

    let style_prompt = learning
        .extracted_style_prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| {
            AppError::BadRequest(format!("Video learning {id} has no extracted style prompt"))
        })?;

    let base_name = input.name.unwrap_or_else(|| learning.video_name.clone());
    let description = Some(format!("Learned from {}", learning.video_url));

    let mut saved = vec![
        PromptTemplateRepo::create(
            &state.pool,
            &CreatePromptTemplate {
                name: format!("{base_name} - style"),
                category: PromptCategory::Style,
                prompt_content: style_prompt.to_string(),
                description: description.clone(),
            },
        )
        .await?,
    ];

    if let Some(transition) = learning
        .extracted_transition_prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        saved.push(
            PromptTemplateRepo::create(
                &state.pool,
                &CreatePromptTemplate {
                    name: format!("{base_name} - transition"),
                    category: PromptCategory::Transition,
                    prompt_content: transition.to_string(),
                    description,
                },
            )
            .await?,
        );
    }

    tracing::info!(learning_id = id, templates = saved.len(), "Learned templates saved");
    Ok((StatusCode::CREATED, Json(DataResponse { data: saved })))
}

fn failed_outcome() -> AnalysisOutcome {
    AnalysisOutcome {
        analysis_status: AnalysisStatus::Failed,
        extracted_style_prompt: None,
        extracted_transition_prompt: None,
        key_frames: None,
    }
}
