//! Public art style catalog.

use axum::extract::State;
use axum::Json;
use govai_db::models::art_style::ArtStyle;
use govai_db::repositories::ArtStyleRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/styles
///
/// Active styles ordered by `sort_order`. No authentication required.
pub async fn list_active(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ArtStyle>>>> {
    let styles = ArtStyleRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: styles }))
}
