pub mod admin;
pub mod audit;
pub mod auth;
pub mod catalog_admin;
pub mod generation;
pub mod image;
pub mod learning;
pub mod project;
pub mod prompt;
pub mod review;
pub mod style;
pub mod video;

/// Treat an empty string in a sparse update as "not provided".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
