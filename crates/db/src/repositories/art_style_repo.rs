//! Repository for the `art_styles` table.

use govai_core::types::DbId;
use sqlx::PgPool;

use crate::models::art_style::{ArtStyle, CreateArtStyle, UpdateArtStyle};

const COLUMNS: &str = "id, name, description, preview_image, prompt_template, negative_prompt, \
                       is_active, sort_order, created_at, updated_at";

/// Provides CRUD operations for art styles.
pub struct ArtStyleRepo;

impl ArtStyleRepo {
    /// Insert a new art style, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArtStyle) -> Result<ArtStyle, sqlx::Error> {
        let query = format!(
            "INSERT INTO art_styles
                (name, description, preview_image, prompt_template, negative_prompt, is_active, sort_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtStyle>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.preview_image)
            .bind(&input.prompt_template)
            .bind(&input.negative_prompt)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find an art style by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ArtStyle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM art_styles WHERE id = $1");
        sqlx::query_as::<_, ArtStyle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active styles in display order (`sort_order` ascending).
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ArtStyle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM art_styles WHERE is_active = true ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ArtStyle>(&query).fetch_all(pool).await
    }

    /// List every style including inactive ones, in display order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ArtStyle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM art_styles ORDER BY sort_order ASC, id ASC");
        sqlx::query_as::<_, ArtStyle>(&query).fetch_all(pool).await
    }

    /// Update an art style. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArtStyle,
    ) -> Result<Option<ArtStyle>, sqlx::Error> {
        let query = format!(
            "UPDATE art_styles SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                preview_image = COALESCE($4, preview_image),
                prompt_template = COALESCE($5, prompt_template),
                negative_prompt = COALESCE($6, negative_prompt),
                is_active = COALESCE($7, is_active),
                sort_order = COALESCE($8, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtStyle>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.preview_image)
            .bind(&input.prompt_template)
            .bind(&input.negative_prompt)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an art style. Projects referencing it keep their row with a
    /// `NULL` style. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM art_styles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
