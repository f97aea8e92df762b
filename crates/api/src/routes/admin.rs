//! Route definitions for the `/admin` console.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{admin, audit, catalog_admin};
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `admin` role.
///
/// ```text
/// GET, POST    /users
/// GET, PATCH   /users/{id}
/// POST         /users/{id}/reset-password
/// GET, POST    /styles
/// PATCH, DELETE /styles/{id}
/// GET, POST    /prompts
/// PATCH, DELETE /prompts/{id}
/// GET          /dashboard
/// GET          /audit-logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", get(admin::get_user).patch(admin::update_user))
        .route("/users/{id}/reset-password", post(admin::reset_password))
        .route(
            "/styles",
            get(catalog_admin::list_styles).post(catalog_admin::create_style),
        )
        .route(
            "/styles/{id}",
            patch(catalog_admin::update_style).delete(catalog_admin::delete_style),
        )
        .route(
            "/prompts",
            get(catalog_admin::list_prompts).post(catalog_admin::create_prompt),
        )
        .route(
            "/prompts/{id}",
            patch(catalog_admin::update_prompt).delete(catalog_admin::delete_prompt),
        )
        .route("/dashboard", get(admin::dashboard))
        .route("/audit-logs", get(audit::list))
}
