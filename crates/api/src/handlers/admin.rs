//! Handlers for `/admin` user management and the dashboard.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use govai_core::error::CoreError;
use govai_core::roles::{validate_role, ROLE_USER};
use govai_core::types::DbId;
use govai_db::models::dashboard::{PlatformTotals, ReviewCounts};
use govai_db::models::user::{CreateUser, UpdateUser, UserResponse};
use govai_db::repositories::{DashboardRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    /// Defaults to `user`.
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    pub role: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Body of `GET /admin/dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub totals: PlatformTotals,
    pub reviews: ReviewCounts,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = input.role.unwrap_or_else(|| ROLE_USER.to_string());
    validate_role(&role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.trim().to_lowercase(),
            full_name: input.full_name,
            role,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = admin.user_id, role = %user.role, "User created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: user.into() }),
    ))
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PATCH /api/admin/users/{id}
///
/// Admins cannot demote or deactivate themselves, so the console always
/// keeps at least the acting admin.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    if let Some(role) = &input.role {
        validate_role(role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    if id == admin.user_id
        && (input.is_active == Some(false)
            || input.role.as_deref().is_some_and(|r| r != admin.role))
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot change their own role or deactivate themselves".into(),
        )));
    }

    let user = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            full_name: input.full_name,
            role: input.role,
            avatar_url: input.avatar_url,
            is_active: input.is_active,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = id, updated_by = admin.user_id, "User updated");
    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /api/admin/users/{id}/reset-password
///
/// Sets a new password and revokes the user's sessions.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, id, &hashed).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, reset_by = admin.user_id, "Password reset");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let totals = DashboardRepo::platform_totals(&state.pool).await?;
    let reviews = DashboardRepo::review_counts(&state.pool).await?;
    Ok(Json(DataResponse {
        data: DashboardResponse { totals, reviews },
    }))
}
