//! Audit logging constants and helpers.
//!
//! Review decisions on generated images and videos are recorded in
//! `audit_logs`. The helpers here decide what action name a decision maps to
//! and strip secrets from the free-form `details` payload.

use serde_json::Value;

use crate::status::ReviewStatus;

/// Known action names for audit log entries.
pub mod actions {
    pub const APPROVE: &str = "approve";
    pub const REJECT: &str = "reject";
    pub const REVIEW_RESET: &str = "review_reset";
    pub const GENERATE: &str = "generate";
    pub const PROJECT_CREATE: &str = "project_create";
    pub const PROJECT_DELETE: &str = "project_delete";
}

/// Map a review decision to the audit action it is logged under.
pub fn review_action(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Approved => actions::APPROVE,
        ReviewStatus::Rejected => actions::REJECT,
        ReviewStatus::Pending => actions::REVIEW_RESET,
    }
}

/// Fields that are redacted from audit details before storage.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "authorization",
];

/// Redact sensitive keys from a JSON value, recursing into objects and arrays.
///
/// Any key whose lowercase form contains one of [`SENSITIVE_FIELDS`] has its
/// value replaced with `"[REDACTED]"`.
pub fn redact_sensitive_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let redacted = map
                .iter()
                .map(|(key, val)| {
                    let lower = key.to_lowercase();
                    if SENSITIVE_FIELDS.iter().any(|f| lower.contains(f)) {
                        (key.clone(), Value::String("[REDACTED]".to_string()))
                    } else {
                        (key.clone(), redact_sensitive_fields(val))
                    }
                })
                .collect();
            Value::Object(redacted)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_sensitive_fields).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decisions_map_to_actions() {
        assert_eq!(review_action(ReviewStatus::Approved), actions::APPROVE);
        assert_eq!(review_action(ReviewStatus::Rejected), actions::REJECT);
        assert_eq!(review_action(ReviewStatus::Pending), actions::REVIEW_RESET);
    }

    #[test]
    fn redacts_nested_secrets() {
        let input = json!({
            "comment": "too dark",
            "auth": { "access_token": "abc", "kind": "bearer" },
            "items": [{ "api_key": "k" }],
        });
        let out = redact_sensitive_fields(&input);
        assert_eq!(out["comment"], "too dark");
        assert_eq!(out["auth"]["access_token"], "[REDACTED]");
        assert_eq!(out["auth"]["kind"], "bearer");
        assert_eq!(out["items"][0]["api_key"], "[REDACTED]");
    }

    #[test]
    fn key_match_is_case_insensitive() {
        let out = redact_sensitive_fields(&json!({ "Password": "x" }));
        assert_eq!(out["Password"], "[REDACTED]");
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(redact_sensitive_fields(&json!(42)), json!(42));
    }
}
