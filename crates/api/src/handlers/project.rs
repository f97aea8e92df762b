//! Handlers for the `/projects` resource.
//!
//! Projects are private to their owner; admins may act on any project.
//! A project the caller cannot see is reported as 404, not 403.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use govai_core::audit::actions;
use govai_core::error::CoreError;
use govai_core::patch::double_option;
use govai_core::status::{parse_filter, ProjectStatus, ResourceType};
use govai_core::types::DbId;
use govai_db::models::audit::CreateAuditLog;
use govai_db::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};
use govai_db::repositories::{ArtStyleRepo, AuditLogRepo, ProjectRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::StatusFilter;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub script_content: Option<String>,
    pub art_style_id: Option<DbId>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub script_content: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub art_style_id: Option<Option<DbId>>,
    pub status: Option<String>,
}

/// GET /api/projects?status=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<ProjectSummary>>>> {
    let status = parse_filter::<ProjectStatus>(params.status.as_deref())?;
    let projects = ProjectRepo::list_for_user(&state.pool, auth.user_id, status).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    input.validate()?;
    if let Some(style_id) = input.art_style_id {
        ensure_style_exists(&state, style_id).await?;
    }

    let mut tx = state.pool.begin().await?;
    let project = ProjectRepo::create(
        &mut *tx,
        &CreateProject {
            user_id: auth.user_id,
            title: input.title,
            description: input.description,
            script_content: input.script_content,
            art_style_id: input.art_style_id,
        },
    )
    .await?;

    AuditLogRepo::create(
        &mut *tx,
        &CreateAuditLog {
            user_id: Some(auth.user_id),
            action: actions::PROJECT_CREATE.to_string(),
            resource_type: ResourceType::Project,
            resource_id: project.id,
            details: Some(serde_json::json!({ "title": project.title })),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(project_id = project.id, user_id = auth.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_accessible_project(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/projects/{id}
///
/// Omitted fields are kept. An explicit `null` clears `description`,
/// `script_content` or `art_style_id`.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    input.validate()?;
    load_accessible_project(&state, &auth, id).await?;

    let status = input
        .status
        .as_deref()
        .map(str::parse::<ProjectStatus>)
        .transpose()?;
    if let Some(Some(style_id)) = input.art_style_id {
        ensure_style_exists(&state, style_id).await?;
    }

    let project = ProjectRepo::update(
        &state.pool,
        id,
        &UpdateProject {
            title: input.title,
            description: input.description,
            script_content: input.script_content,
            art_style_id: input.art_style_id,
            status,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    }))?;

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/projects/{id}
///
/// Removes the project and, by cascade, its generated media.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = load_accessible_project(&state, &auth, id).await?;

    let mut tx = state.pool.begin().await?;
    if !ProjectRepo::delete(&mut *tx, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    AuditLogRepo::create(
        &mut *tx,
        &CreateAuditLog {
            user_id: Some(auth.user_id),
            action: actions::PROJECT_DELETE.to_string(),
            resource_type: ResourceType::Project,
            resource_id: id,
            details: Some(serde_json::json!({ "title": project.title })),
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a project the caller owns (or any project, for admins).
pub(crate) async fn load_accessible_project(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| auth.is_admin() || p.user_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Load a project for media operations: reviewers and admins see every
/// project, other users only their own.
pub(crate) async fn load_media_project(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| auth.can_review() || p.user_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

async fn ensure_style_exists(state: &AppState, style_id: DbId) -> AppResult<()> {
    ArtStyleRepo::find_by_id(&state.pool, style_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::BadRequest(format!("Art style {style_id} does not exist")))
}
