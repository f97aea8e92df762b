//! Admin management of art styles and prompt templates.
//!
//! Unlike the public catalog endpoints these list inactive rows too.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use govai_core::error::CoreError;
use govai_core::status::{parse_filter, PromptCategory};
use govai_core::types::DbId;
use govai_db::models::art_style::{ArtStyle, CreateArtStyle, UpdateArtStyle};
use govai_db::models::prompt_template::{
    CreatePromptTemplate, PromptTemplate, UpdatePromptTemplate,
};
use govai_db::repositories::{ArtStyleRepo, PromptTemplateRepo};
use serde::Deserialize;
use validator::Validate;

use super::prompt::PromptListParams;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStyleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub preview_image: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub prompt_template: String,
    pub negative_prompt: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStyleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub preview_image: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub prompt_template: Option<String>,
    pub negative_prompt: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePromptRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub category: String,
    #[validate(length(min = 1, max = 4000))]
    pub prompt_content: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePromptRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(length(min = 1, max = 4000))]
    pub prompt_content: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Art styles
// ---------------------------------------------------------------------------

/// GET /api/admin/styles
pub async fn list_styles(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<ArtStyle>>>> {
    let styles = ArtStyleRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: styles }))
}

/// POST /api/admin/styles
pub async fn create_style(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateStyleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ArtStyle>>)> {
    input.validate()?;

    let style = ArtStyleRepo::create(
        &state.pool,
        &CreateArtStyle {
            name: input.name,
            description: input.description,
            preview_image: input.preview_image,
            prompt_template: input.prompt_template,
            negative_prompt: input.negative_prompt,
            is_active: input.is_active,
            sort_order: input.sort_order,
        },
    )
    .await?;

    tracing::info!(style_id = style.id, created_by = admin.user_id, "Art style created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: style })))
}

/// PATCH /api/admin/styles/{id}
pub async fn update_style(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStyleRequest>,
) -> AppResult<Json<DataResponse<ArtStyle>>> {
    input.validate()?;

    let style = ArtStyleRepo::update(
        &state.pool,
        id,
        &UpdateArtStyle {
            name: input.name,
            description: input.description,
            preview_image: input.preview_image,
            prompt_template: input.prompt_template,
            negative_prompt: input.negative_prompt,
            is_active: input.is_active,
            sort_order: input.sort_order,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "ArtStyle",
        id,
    }))?;

    Ok(Json(DataResponse { data: style }))
}

/// DELETE /api/admin/styles/{id}
///
/// Projects using the style keep their row with `art_style_id` cleared.
pub async fn delete_style(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ArtStyleRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ArtStyle",
            id,
        }));
    }
    tracing::info!(style_id = id, deleted_by = admin.user_id, "Art style deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Prompt templates
// ---------------------------------------------------------------------------

/// GET /api/admin/prompts?category=
pub async fn list_prompts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PromptListParams>,
) -> AppResult<Json<DataResponse<Vec<PromptTemplate>>>> {
    let category = parse_filter::<PromptCategory>(params.category.as_deref())?;
    let prompts = PromptTemplateRepo::list(&state.pool, category, false).await?;
    Ok(Json(DataResponse { data: prompts }))
}

/// POST /api/admin/prompts
pub async fn create_prompt(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreatePromptRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PromptTemplate>>)> {
    input.validate()?;
    let category = input.category.parse::<PromptCategory>()?;

    let prompt = PromptTemplateRepo::create(
        &state.pool,
        &CreatePromptTemplate {
            name: input.name,
            category,
            prompt_content: input.prompt_content,
            description: input.description,
        },
    )
    .await?;

    tracing::info!(prompt_id = prompt.id, created_by = admin.user_id, "Prompt template created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: prompt })))
}

/// PATCH /api/admin/prompts/{id}
pub async fn update_prompt(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePromptRequest>,
) -> AppResult<Json<DataResponse<PromptTemplate>>> {
    input.validate()?;
    let category = parse_filter::<PromptCategory>(input.category.as_deref())?;

    let prompt = PromptTemplateRepo::update(
        &state.pool,
        id,
        &UpdatePromptTemplate {
            name: input.name,
            category,
            prompt_content: input.prompt_content,
            description: input.description,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "PromptTemplate",
        id,
    }))?;

    Ok(Json(DataResponse { data: prompt }))
}

/// DELETE /api/admin/prompts/{id}
pub async fn delete_prompt(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PromptTemplateRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PromptTemplate",
            id,
        }));
    }
    tracing::info!(prompt_id = id, deleted_by = admin.user_id, "Prompt template deleted");
    Ok(StatusCode::NO_CONTENT)
}
