//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for sparse patches

pub mod art_style;
pub mod audit;
pub mod dashboard;
pub mod image;
pub mod learning;
pub mod project;
pub mod prompt_template;
pub mod session;
pub mod user;
pub mod video;
