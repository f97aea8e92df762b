pub mod admin;
pub mod auth;
pub mod health;
pub mod learning;
pub mod media;
pub mod project;
pub mod review;

use axum::routing::get;
use axum::Router;

use crate::handlers::{prompt, style};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth                          current session, login, refresh, logout
/// /projects                      owner-scoped CRUD + batch generation
/// /images, /videos               media CRUD, sparse PATCH, generate, sync
/// /styles                        active art styles (public)
/// /prompts                       active prompt templates (public)
/// /review/queue, /review/stats   review queue (reviewer or admin)
/// /learnings                     reference video analysis
/// /admin/...                     admin console
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/images", media::image_router())
        .nest("/videos", media::video_router())
        .route("/styles", get(style::list_active))
        .route("/prompts", get(prompt::list_active))
        .nest("/review", review::router())
        .nest("/learnings", learning::router())
        .nest("/admin", admin::router())
}
