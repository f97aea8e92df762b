//! Repository for the `prompt_templates` table.

use govai_core::status::PromptCategory;
use govai_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt_template::{
    CreatePromptTemplate, PromptTemplate, UpdatePromptTemplate,
};

const COLUMNS: &str =
    "id, name, category, prompt_content, description, is_active, created_at, updated_at";

/// Provides CRUD operations for prompt templates.
pub struct PromptTemplateRepo;

impl PromptTemplateRepo {
    /// Insert a new active template, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePromptTemplate,
    ) -> Result<PromptTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompt_templates (name, category, prompt_content, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(&input.name)
            .bind(input.category.as_str())
            .bind(&input.prompt_content)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a template by ID, active or not.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PromptTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompt_templates WHERE id = $1");
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List templates, optionally restricted to one category.
    ///
    /// With `active_only` set, inactive templates are excluded.
    pub async fn list(
        pool: &PgPool,
        category: Option<PromptCategory>,
        active_only: bool,
    ) -> Result<Vec<PromptTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_templates
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND (NOT $2 OR is_active = true)
             ORDER BY category ASC, id ASC"
        );
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(category.map(PromptCategory::as_str))
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePromptTemplate,
    ) -> Result<Option<PromptTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE prompt_templates SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                prompt_content = COALESCE($4, prompt_content),
                description = COALESCE($5, description),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptTemplate>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.category.map(PromptCategory::as_str))
            .bind(&input.prompt_content)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompt_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
