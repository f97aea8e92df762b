//! Project entity model and DTOs.

use govai_core::status::ProjectStatus;
use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub script_content: Option<String>,
    pub art_style_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with its art style name and generated media counts,
/// as shown on the project list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub script_content: Option<String>,
    pub art_style_id: Option<DbId>,
    pub art_style_name: Option<String>,
    pub status: String,
    pub image_count: i64,
    pub video_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. Status always starts as `draft`.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub script_content: Option<String>,
    pub art_style_id: Option<DbId>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// The nullable columns are doubly optional: `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub script_content: Option<Option<String>>,
    pub art_style_id: Option<Option<DbId>>,
    pub status: Option<ProjectStatus>,
}
