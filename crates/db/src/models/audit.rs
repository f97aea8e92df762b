//! Audit log entity model and DTOs.
//!
//! Audit logs have no `updated_at` field (immutable records).

use govai_core::status::ResourceType;
use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single audit log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub action: String,
    pub resource_type: String,
    pub resource_id: DbId,
    pub details: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for inserting an audit log entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub user_id: Option<DbId>,
    pub action: String,
    pub resource_type: ResourceType,
    pub resource_id: DbId,
    pub details: Option<serde_json::Value>,
}

/// Filter parameters for querying audit logs.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub user_id: Option<DbId>,
    pub resource_type: Option<ResourceType>,
    pub resource_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
