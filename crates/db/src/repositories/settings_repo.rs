//! Repository for the `site_settings` singleton.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::settings::{SiteSettings, UpdateSiteSettings, SETTINGS_ID};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, seo_title, seo_description, seo_keywords, contact_email, \
                       contact_phone, location, social_links, created_at, updated_at";

/// Access to the single settings row (`id = 1`).
pub struct SettingsRepo;

impl SettingsRepo {
    /// Return the settings row, creating it from column defaults if absent.
    ///
    /// Concurrent first reads are safe: the insert is a no-op on conflict.
    pub async fn get_or_create(pool: &PgPool) -> Result<SiteSettings, sqlx::Error> {
        Self::ensure_row(pool).await?;
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE id = $1");
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SETTINGS_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial update. Social-link keys are merged individually.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateSiteSettings,
    ) -> Result<SiteSettings, sqlx::Error> {
        Self::ensure_row(pool).await?;
        let social = input.social_links.clone().unwrap_or_default();
        let query = format!(
            "UPDATE site_settings SET
                seo_title = COALESCE($2, seo_title),
                seo_description = COALESCE($3, seo_description),
                seo_keywords = COALESCE($4, seo_keywords),
                contact_email = COALESCE($5, contact_email),
                contact_phone = COALESCE($6, contact_phone),
                location = COALESCE($7, location),
                social_links = social_links || $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SETTINGS_ID)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .bind(&input.seo_keywords)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.location)
            .bind(Json(&social))
            .fetch_one(pool)
            .await
    }

    async fn ensure_row(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO site_settings (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(SETTINGS_ID)
            .execute(pool)
            .await?;
        Ok(())
    }
}
