//! Repository for the `testimonials` table.

use folio_core::types::DbId;
use folio_core::upsert::ResolvedMedia;
use sqlx::PgPool;

use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, role, company, message, image_url, media_id, approved, \
                       created_at, updated_at";

/// Provides CRUD operations for testimonials.
pub struct TestimonialRepo;

impl TestimonialRepo {
    /// Insert a new, unapproved testimonial.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTestimonial,
        media: &ResolvedMedia,
    ) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials (name, role, company, message, image_url, media_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.company)
            .bind(&input.message)
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM testimonials WHERE id = $1");
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List testimonials newest first. Unless `include_unapproved` is set,
    /// only approved rows are returned.
    pub async fn list(
        pool: &PgPool,
        include_unapproved: bool,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials
             WHERE $1 OR approved
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(include_unapproved)
            .fetch_all(pool)
            .await
    }

    /// Edit or approve a testimonial. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTestimonial,
        media: &ResolvedMedia,
    ) -> Result<Option<Testimonial>, sqlx::Error> {
        let query = format!(
            "UPDATE testimonials SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                company = COALESCE($4, company),
                message = COALESCE($5, message),
                approved = COALESCE($6, approved),
                image_url = COALESCE($7, image_url),
                media_id = COALESCE($8, media_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.company)
            .bind(&input.message)
            .bind(input.approved)
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a testimonial. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
