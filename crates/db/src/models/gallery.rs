//! Gallery item model and DTOs.

use folio_core::gallery::GalleryCategory;
use folio_core::media::MediaRef;
use folio_core::types::{DbId, Timestamp};
use folio_core::upsert::MediaHolder;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `gallery_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub media_id: String,
    pub about_project: String,
    /// Free-form project date as entered by the editor (e.g. "March 2024").
    #[serde(rename = "date")]
    pub project_date: String,
    pub client: String,
    pub branding_images: Json<Vec<MediaRef>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaHolder for GalleryItem {
    fn primary_media(&self) -> Option<MediaRef> {
        Some(MediaRef {
            url: self.image_url.clone(),
            media_id: self.media_id.clone(),
        })
    }

    fn collection_media(&self) -> Vec<MediaRef> {
        self.branding_images.0.clone()
    }
}

/// Scalar fields for a new gallery item. Media comes from the workflow.
#[derive(Debug, Clone)]
pub struct CreateGalleryItem {
    pub title: String,
    pub description: String,
    pub category: GalleryCategory,
    pub about_project: String,
    pub project_date: String,
    pub client: String,
}

/// Partial update for a gallery item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGalleryItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GalleryCategory>,
    pub about_project: Option<String>,
    pub project_date: Option<String>,
    pub client: Option<String>,
}
