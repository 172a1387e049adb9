//! Repository for the `gallery_items` table.

use folio_core::gallery::GalleryCategory;
use folio_core::types::DbId;
use folio_core::upsert::ResolvedMedia;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, image_url, media_id, about_project, \
                       project_date, client, branding_images, created_at, updated_at";

/// Provides CRUD operations for gallery items.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a new item with its resolved media, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGalleryItem,
        media: &ResolvedMedia,
    ) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery_items
                (title, description, category, image_url, media_id,
                 about_project, project_date, client, branding_images)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category.as_str())
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .bind(&input.about_project)
            .bind(&input.project_date)
            .bind(&input.client)
            .bind(Json(&media.collection))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gallery_items WHERE id = $1");
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items newest first, optionally restricted to one category.
    pub async fn list(
        pool: &PgPool,
        category: Option<GalleryCategory>,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_items
             WHERE ($1::text IS NULL OR category = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(category.map(GalleryCategory::as_str))
            .fetch_all(pool)
            .await
    }

    /// Apply scalar changes, replace the primary image when one is given and
    /// append new branding images.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryItem,
        media: &ResolvedMedia,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_items SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                about_project = COALESCE($5, about_project),
                project_date = COALESCE($6, project_date),
                client = COALESCE($7, client),
                image_url = COALESCE($8, image_url),
                media_id = COALESCE($9, media_id),
                branding_images = branding_images || $10
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category.map(GalleryCategory::as_str))
            .bind(&input.about_project)
            .bind(&input.project_date)
            .bind(&input.client)
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .bind(Json(&media.collection))
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gallery_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
