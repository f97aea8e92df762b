//! Repository for the `projects` table.

use govai_core::status::ProjectStatus;
use govai_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::project::{CreateProject, Project, ProjectSummary, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, title, description, script_content, art_style_id, status, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `draft` status, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, title, description, script_content, art_style_id, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.script_content)
            .bind(input.art_style_id)
            .bind(ProjectStatus::Draft.as_str())
            .fetch_one(executor)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects, newest first, optionally filtered by status.
    ///
    /// Each row is joined with its art style name and the number of
    /// generated images and videos attached to it.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            "SELECT p.id, p.user_id, p.title, p.description, p.script_content, p.art_style_id,
                    s.name AS art_style_name, p.status,
                    (SELECT COUNT(*) FROM generated_images gi WHERE gi.project_id = p.id) AS image_count,
                    (SELECT COUNT(*) FROM generated_videos gv WHERE gv.project_id = p.id) AS video_count,
                    p.created_at, p.updated_at
             FROM projects p
             LEFT JOIN art_styles s ON s.id = p.art_style_id
             WHERE p.user_id = $1
               AND ($2::TEXT IS NULL OR p.status = $2)
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(user_id)
        .bind(status.map(ProjectStatus::as_str))
        .fetch_all(pool)
        .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `Some(None)` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                script_content = CASE WHEN $5 THEN $6 ELSE script_content END,
                art_style_id = CASE WHEN $7 THEN $8 ELSE art_style_id END,
                status = COALESCE($9, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.script_content.is_some())
            .bind(input.script_content.clone().flatten())
            .bind(input.art_style_id.is_some())
            .bind(input.art_style_id.flatten())
            .bind(input.status.map(ProjectStatus::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a project's status. Returns `true` if the row exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a project and, by cascade, its generated media.
    /// Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
