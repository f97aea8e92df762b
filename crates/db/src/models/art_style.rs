//! Art style entity model and DTOs.

use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `art_styles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtStyle {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub preview_image: Option<String>,
    pub prompt_template: String,
    pub negative_prompt: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new art style.
#[derive(Debug, Clone)]
pub struct CreateArtStyle {
    pub name: String,
    pub description: Option<String>,
    pub preview_image: Option<String>,
    pub prompt_template: String,
    pub negative_prompt: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
    /// Defaults to `0` if omitted.
    pub sort_order: Option<i32>,
}

/// DTO for updating an art style. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateArtStyle {
    pub name: Option<String>,
    pub description: Option<String>,
    pub preview_image: Option<String>,
    pub prompt_template: Option<String>,
    pub negative_prompt: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}
