//! Audit log query endpoint (admin only).

use axum::extract::{Query, State};
use axum::Json;
use govai_core::status::{parse_filter, ResourceType};
use govai_core::types::DbId;
use govai_db::models::audit::{AuditLog, AuditQuery};
use govai_db::repositories::AuditLogRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditLogParams {
    pub resource_type: Option<String>,
    pub resource_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/admin/audit-logs?resource_type=&resource_id=&user_id=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditLogParams>,
) -> AppResult<Json<DataResponse<Vec<AuditLog>>>> {
    let query = AuditQuery {
        user_id: params.user_id,
        resource_type: parse_filter::<ResourceType>(params.resource_type.as_deref())?,
        resource_id: params.resource_id,
        limit: params.limit,
        offset: params.offset,
    };
    let logs = AuditLogRepo::query(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: logs }))
}
