//! Route definitions for generated media (`/images`, `/videos`).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generation, image, video};
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// GET   /               -> list
/// POST  /               -> create
/// PATCH /               -> patch (id in body)
/// GET   /{id}           -> get_by_id
/// POST  /{id}/generate  -> generation::generate_image
/// POST  /{id}/sync      -> generation::sync_image
/// ```
pub fn image_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(image::list).post(image::create).patch(image::patch),
        )
        .route("/{id}", get(image::get_by_id))
        .route("/{id}/generate", post(generation::generate_image))
        .route("/{id}/sync", post(generation::sync_image))
}

/// Routes mounted at `/videos`; same shape as [`image_router`].
pub fn video_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(video::list).post(video::create).patch(video::patch),
        )
        .route("/{id}", get(video::get_by_id))
        .route("/{id}/generate", post(generation::generate_video))
        .route("/{id}/sync", post(generation::sync_video))
}
