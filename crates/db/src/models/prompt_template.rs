//! Prompt template entity model and DTOs.

use govai_core::status::PromptCategory;
use govai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `prompt_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptTemplate {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub prompt_content: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new prompt template.
#[derive(Debug, Clone)]
pub struct CreatePromptTemplate {
    pub name: String,
    pub category: PromptCategory,
    pub prompt_content: String,
    pub description: Option<String>,
}

/// DTO for updating a prompt template. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdatePromptTemplate {
    pub name: Option<String>,
    pub category: Option<PromptCategory>,
    pub prompt_content: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
