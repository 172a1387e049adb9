//! Page-content section model and DTOs.

use std::collections::BTreeMap;

use folio_core::media::MediaRef;
use folio_core::types::{DbId, Timestamp};
use folio_core::upsert::MediaHolder;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// Free-form per-section metadata (button labels, video URLs, ...).
///
/// No schema and no bound on the number of keys; values are plain strings.
pub type ContentMeta = BTreeMap<String, String>;

/// A row from the `page_content` table, keyed by `section`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub id: DbId,
    pub section: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub image_url: Option<String>,
    pub media_id: Option<String>,
    pub meta: Json<ContentMeta>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaHolder for PageContent {
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

#[derive(Debug, Clone, Default)]
pub struct CreatePageContent {
    pub section: String,
    pub title: String,
    pub subtitle: String,
    pub content: String,
    pub meta: ContentMeta,
}

/// Partial update. `meta` keys are merged into the stored map.
#[derive(Debug, Clone, Default)]
pub struct UpdatePageContent {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub meta: ContentMeta,
}
