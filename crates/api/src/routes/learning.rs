use axum::routing::{get, post};
use axum::Router;

use crate::handlers::learning;
use crate::state::AppState;

/// Routes mounted at `/learnings`.
///
/// ```text
/// GET  /                     -> list
/// POST /                     -> create
/// POST /{id}/save-template   -> save_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(learning::list).post(learning::create))
        .route("/{id}/save-template", post(learning::save_template))
}
