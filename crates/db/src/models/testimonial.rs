//! Testimonial model and DTOs.

use folio_core::media::MediaRef;
use folio_core::types::{DbId, Timestamp};
use folio_core::upsert::MediaHolder;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub company: Option<String>,
    pub message: String,
    pub image_url: Option<String>,
    pub media_id: Option<String>,
    pub approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaHolder for Testimonial {
    fn primary_media(&self) -> Option<MediaRef> {
        match (&self.image_url, &self.media_id) {
            (Some(url), Some(media_id)) => Some(MediaRef {
                url: url.clone(),
                media_id: media_id.clone(),
            }),
            _ => None,
        }
    }
}

/// Public submission. New testimonials always start unapproved.
#[derive(Debug, Clone)]
pub struct CreateTestimonial {
    pub name: String,
    pub role: String,
    pub company: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTestimonial {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub approved: Option<bool>,
}
