//! Repository for the append-only `audit_logs` table.

use govai_core::audit::redact_sensitive_fields;
use govai_core::status::ResourceType;
use govai_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, user_id, action, resource_type, resource_id, details, created_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

/// Insert-and-query access to audit logs. Rows are never updated.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append an entry, returning the stored row. Sensitive keys in
    /// `details` are redacted before storage.
    ///
    /// Takes any executor so the entry can share a transaction with the
    /// change it records.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAuditLog,
    ) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (user_id, action, resource_type, resource_id, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let details = input.details.as_ref().map(redact_sensitive_fields);
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(input.resource_type.as_str())
            .bind(input.resource_id)
            .bind(details)
            .fetch_one(executor)
            .await
    }

    /// Query entries, newest first, with optional filters and pagination.
    pub async fn query(pool: &PgPool, params: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR resource_type = $2)
               AND ($3::BIGINT IS NULL OR resource_id = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(params.user_id)
            .bind(params.resource_type.map(ResourceType::as_str))
            .bind(params.resource_id)
            .bind(clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }
}
