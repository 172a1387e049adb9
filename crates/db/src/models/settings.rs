//! Site settings singleton.

use folio_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Primary key of the only settings row.
pub const SETTINGS_ID: i16 = 1;

/// Links to the owner's social profiles. Missing keys default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub instagram: String,
    pub twitter: String,
    pub linkedin: String,
    pub dribbble: String,
    pub behance: String,
}

/// The `site_settings` row. Column defaults in the migration hold the
/// initial SEO and contact values.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(skip)]
    pub id: i16,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub location: String,
    pub social_links: Json<SocialLinks>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial social-links change; unset keys keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dribbble: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behance: Option<String>,
}

/// Partial settings change accepted by `PUT /api/settings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteSettings {
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub location: Option<String>,
    pub social_links: Option<UpdateSocialLinks>,
}
