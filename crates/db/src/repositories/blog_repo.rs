//! Repository for the `blog_posts` table.

use folio_core::types::DbId;
use folio_core::upsert::ResolvedMedia;
use sqlx::PgPool;

use crate::models::blog::{BlogListQuery, BlogPost, CreateBlogPost, UpdateBlogPost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, content, excerpt, category, featured, \
                       image_url, media_id, created_at, updated_at";

/// Shared filter clause for listing and counting.
const FILTER: &str = "($1::text IS NULL OR category = $1) AND ($2::bool IS NULL OR featured = $2)";

/// Provides CRUD operations for blog posts.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new post. A duplicate slug violates `uq_blog_posts_slug`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogPost,
        media: &ResolvedMedia,
    ) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts
                (title, slug, content, excerpt, category, featured, image_url, media_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.category)
            .bind(input.featured)
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// One page of posts, newest first.
    pub async fn list(pool: &PgPool, params: &BlogListQuery) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&params.category)
            .bind(params.featured)
            .bind(params.limit)
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }

    /// Total number of posts matching the listing filters (ignores paging).
    pub async fn count(pool: &PgPool, params: &BlogListQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM blog_posts WHERE {FILTER}");
        let (total,): (i64,) = sqlx::query_as(&query)
            .bind(&params.category)
            .bind(params.featured)
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    /// Apply scalar changes and replace the cover image when one is given.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
        media: &ResolvedMedia,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                excerpt = COALESCE($5, excerpt),
                category = COALESCE($6, category),
                featured = COALESCE($7, featured),
                image_url = COALESCE($8, image_url),
                media_id = COALESCE($9, media_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.category)
            .bind(input.featured)
            .bind(media.primary.as_ref().map(|m| m.url.as_str()))
            .bind(media.primary.as_ref().map(|m| m.media_id.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
