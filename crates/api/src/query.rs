//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?status=` filter shared by list endpoints.
///
/// Kept as a raw string so an unknown value is answered with 400 by the
/// handler's enum parsing rather than a generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}
