//! Public prompt template catalog.

use axum::extract::{Query, State};
use axum::Json;
use govai_core::status::{parse_filter, PromptCategory};
use govai_db::models::prompt_template::PromptTemplate;
use govai_db::repositories::PromptTemplateRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptListParams {
    pub category: Option<String>,
}

/// GET /api/prompts?category=
///
/// Active templates, optionally restricted to one category. An unknown
/// category is rejected with 400.
pub async fn list_active(
    State(state): State<AppState>,
    Query(params): Query<PromptListParams>,
) -> AppResult<Json<DataResponse<Vec<PromptTemplate>>>> {
    let category = parse_filter::<PromptCategory>(params.category.as_deref())?;
    let prompts = PromptTemplateRepo::list(&state.pool, category, true).await?;
    Ok(Json(DataResponse { data: prompts }))
}
