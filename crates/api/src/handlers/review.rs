//! Review queue and review-decision auditing.

use axum::extract::{Query, State};
use axum::Json;
use govai_core::audit::review_action;
use govai_core::error::CoreError;
use govai_core::status::{parse_filter, ResourceType, ReviewStatus};
use govai_core::types::DbId;
use govai_db::models::audit::CreateAuditLog;
use govai_db::models::dashboard::{ReviewCounts, ReviewQueueItem};
use govai_db::repositories::dashboard_repo::QueueMedia;
use govai_db::repositories::{AuditLogRepo, DashboardRepo};
use serde::Deserialize;
use sqlx::PgConnection;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireReviewer;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueueParams {
    pub review_status: Option<String>,
    /// `image` or `video`; both when absent.
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/review/queue?review_status=&type=
///
/// Images and videos awaiting (or past) review, newest first. Defaults to
/// `pending`.
pub async fn queue(
    State(state): State<AppState>,
    RequireReviewer(_reviewer): RequireReviewer,
    Query(params): Query<QueueParams>,
) -> AppResult<Json<DataResponse<Vec<ReviewQueueItem>>>> {
    let review_status = parse_filter::<ReviewStatus>(params.review_status.as_deref())?
        .unwrap_or(ReviewStatus::Pending);
    let media = parse_queue_media(params.media_type.as_deref())?;

    let items =
        DashboardRepo::review_queue(&state.pool, review_status, media, params.limit, params.offset)
            .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/review/stats
pub async fn stats(
    State(state): State<AppState>,
    RequireReviewer(_reviewer): RequireReviewer,
) -> AppResult<Json<DataResponse<ReviewCounts>>> {
    let counts = DashboardRepo::review_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}

/// Append an audit entry for a review decision on an image or video.
///
/// Runs on the caller's connection so the entry commits or rolls back
/// together with the status change.
pub(crate) async fn record_review_decision(
    conn: &mut PgConnection,
    auth: &AuthUser,
    resource_type: ResourceType,
    resource_id: DbId,
    previous: &str,
    decision: ReviewStatus,
    comment: Option<&str>,
) -> AppResult<()> {
    let action = review_action(decision);

    AuditLogRepo::create(
        conn,
        &CreateAuditLog {
            user_id: Some(auth.user_id),
            action: action.to_string(),
            resource_type,
            resource_id,
            details: Some(serde_json::json!({
                "previous_review_status": previous,
                "review_status": decision,
                "review_comment": comment,
            })),
        },
    )
    .await?;

    tracing::info!(
        resource_type = %resource_type,
        resource_id,
        reviewer_id = auth.user_id,
        action,
        "Review decision recorded",
    );
    Ok(())
}

fn parse_queue_media(raw: Option<&str>) -> Result<QueueMedia, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(QueueMedia::All),
        Some("image") => Ok(QueueMedia::Images),
        Some("video") => Ok(QueueMedia::Videos),
        Some(other) => Err(CoreError::Validation(format!(
            "Invalid type '{other}'. Must be one of: image, video"
        ))),
    }
}
