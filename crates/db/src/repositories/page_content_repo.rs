//! Repository for the `page_content` table (keyed by `section`).

use folio_core::upsert::ResolvedMedia;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::page_content::{CreatePageContent, PageContent, UpdatePageContent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, section, title, subtitle, content, image_url, media_id, meta, \
                       created_at, updated_at";

/// Provides upsert-oriented operations for page-content sections.
pub struct PageContentRepo;

impl PageContentRepo {
    /// Insert a new section. A duplicate key violates `uq_page_content_section`.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePageContent,
        media: &ResolvedMedia,
    ) -> Result<PageContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO page_content (section, title, subtitle, content, image_url, media_id, meta)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageContent>(&query)
            .bind(&input.section)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.content)
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .bind(Json(&input.meta))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_section(
        pool: &PgPool,
        section: &str,
    ) -> Result<Option<PageContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM page_content WHERE section = $1");
        sqlx::query_as::<_, PageContent>(&query)
            .bind(section)
            .fetch_optional(pool)
            .await
    }

    /// All sections ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<PageContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM page_content ORDER BY section ASC");
        sqlx::query_as::<_, PageContent>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply scalar changes, merge `meta` keys into the stored map and
    /// replace the image when one is given. The row keeps its `id`.
    pub async fn update(
        pool: &PgPool,
        section: &str,
        input: &UpdatePageContent,
        media: &ResolvedMedia,
    ) -> Result<Option<PageContent>, sqlx::Error> {
        let query = format!(
            "UPDATE page_content SET
                title = COALESCE($2, title),
                subtitle = COALESCE($3, subtitle),
                content = COALESCE($4, content),
                meta = meta || $5,
                image_url = COALESCE($6, image_url),
                media_id = COALESCE($7, media_id)
             WHERE section = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageContent>(&query)
            .bind(section)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.content)
            .bind(Json(&input.meta))
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a section. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, section: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_content WHERE section = $1")
            .bind(section)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
