//! Blog post model and DTOs.

use folio_core::media::MediaRef;
use folio_core::types::{DbId, Timestamp};
use folio_core::upsert::MediaHolder;
use serde::Serialize;
use sqlx::FromRow;

/// Maximum excerpt length in characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub featured: bool,
    pub image_url: String,
    pub media_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaHolder for BlogPost {
    fn primary_media(&self) -> Option<MediaRef> {
        Some(MediaRef {
            url: self.image_url.clone(),
            media_id: self.media_id.clone(),
        })
    }
}

/// Scalar fields for a new post. `slug` is derived from `title` by the caller.
#[derive(Debug, Clone)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub featured: bool,
}

/// Partial update for a post. When `title` is set, `slug` must be set too.
#[derive(Debug, Clone, Default)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
}

/// Filters and paging for the public listing.
#[derive(Debug, Clone)]
pub struct BlogListQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl BlogListQuery {
    /// Rows to skip. Saturates for page numbers far past the last row, which
    /// then simply yield an empty page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).max(0).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, limit: i64) -> BlogListQuery {
        BlogListQuery {
            category: None,
            featured: None,
            page,
            limit,
        }
    }

    #[test]
    fn offset_skips_earlier_pages() {
        assert_eq!(query(1, 10).offset(), 0);
        assert_eq!(query(3, 10).offset(), 20);
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        assert_eq!(query(100_000_000_000_000_000, 100).offset(), i64::MAX);
        assert_eq!(query(i64::MIN, 100).offset(), 0);
    }
}
