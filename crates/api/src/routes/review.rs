use axum::routing::get;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/review` (reviewer or admin).
///
/// ```text
/// GET /queue  -> queue
/// GET /stats  -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/queue", get(review::queue))
        .route("/stats", get(review::stats))
}
