//! Handlers for the `/blog` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::slug::slugify;
use folio_core::types::DbId;
use folio_core::upsert::{MediaPolicy, UpsertWorkflow};
use folio_db::models::blog::{
    BlogListQuery, BlogPost, CreateBlogPost, UpdateBlogPost, EXCERPT_MAX_CHARS,
};
use folio_db::repositories::BlogRepo;
use folio_db::stores::BlogStore;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::{ApiResponse, PagedResponse};
use crate::state::AppState;
use crate::upload::MultipartForm;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

pub fn media_policy() -> MediaPolicy {
    MediaPolicy {
        folder: "blog".into(),
        primary_required: true,
        max_collection: 0,
    }
}

/// Query parameters for `GET /blog`.
#[derive(Debug, Default, Deserialize)]
pub struct BlogListParams {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl BlogListParams {
    /// Normalise into a repository query: page is at least 1, the page size
    /// falls in `1..=100`, and `featured` filters only when present.
    pub fn into_query(self) -> BlogListQuery {
        BlogListQuery {
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            featured: self
                .featured
                .filter(|f| !f.is_empty())
                .map(|f| f == "true"),
            page: self.page.unwrap_or(1).max(1),
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// GET /api/blog
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> AppResult<Json<PagedResponse<BlogPost>>> {
    let query = params.into_query();
    let posts = BlogRepo::list(&state.pool, &query).await?;
    let total = BlogRepo::count(&state.pool, &query).await?;
    Ok(Json(PagedResponse::new(posts, total, query.page, query.limit)))
}

/// GET /api/blog/{slug}
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let post = BlogRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| CoreError::not_found("Blog post", &slug))?;
    Ok(Json(ApiResponse::ok(post)))
}

/// POST /api/blog
///
/// Multipart: `image` (required), `title`, `content`, `excerpt`, `category`,
/// `featured`. The slug is derived from the title.
pub async fn create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<BlogPost>>)> {
    let mut form = MultipartForm::read(multipart, &state.config.uploads).await?;

    let title = form.required("title")?;
    let excerpt = form.required("excerpt")?;
    check_excerpt(&excerpt)?;

    let draft = CreateBlogPost {
        slug: slug_for(&title)?,
        title,
        content: form.required("content")?,
        excerpt,
        category: form.required("category")?,
        featured: form.flag("featured")?.unwrap_or(false),
    };

    let store = BlogStore::new(state.pool.clone());
    let policy = media_policy();
    let post = UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .create(draft, form.take_files())
        .await?;

    tracing::info!(id = post.id, slug = %post.slug, "Blog post created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

/// PUT /api/blog/id/{id}
///
/// Multipart. A new `title` regenerates the slug; a new `image` replaces
/// the current one.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let mut form = MultipartForm::read(multipart, &state.config.uploads).await?;

    let title = form.optional("title");
    let excerpt = form.optional("excerpt");
    if let Some(excerpt) = &excerpt {
        check_excerpt(excerpt)?;
    }

    let patch = UpdateBlogPost {
        slug: title.as_deref().map(slug_for).transpose()?,
        title,
        content: form.optional("content"),
        excerpt,
        category: form.optional("category"),
        featured: form.flag("featured")?,
    };

    let store = BlogStore::new(state.pool.clone());
    let policy = media_policy();
    let post = UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .update(&id, patch, form.take_files())
        .await?;

    tracing::info!(id, slug = %post.slug, "Blog post updated");
    Ok(Json(ApiResponse::ok(post)))
}

/// DELETE /api/blog/id/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let store = BlogStore::new(state.pool.clone());
    let policy = media_policy();
    UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .delete(&id)
        .await?;

    tracing::info!(id, "Blog post deleted");
    Ok(Json(ApiResponse::message("Blog post deleted")))
}

fn slug_for(title: &str) -> Result<String, CoreError> {
    let slug = slugify(title);
    if slug.is_empty() {
        return Err(CoreError::Validation(format!(
            "Title '{title}' has no characters usable in a URL slug"
        )));
    }
    Ok(slug)
}

fn check_excerpt(excerpt: &str) -> Result<(), CoreError> {
    if excerpt.chars().count() > EXCERPT_MAX_CHARS {
        return Err(CoreError::Validation(format!(
            "Excerpt cannot be more than {EXCERPT_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn list_params_apply_defaults_and_bounds() {
        let query = BlogListParams::default().into_query();
        assert_eq!((query.page, query.limit), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(query.featured, None);

        let query = BlogListParams {
            page: Some(0),
            limit: Some(5000),
            featured: Some("true".into()),
            category: Some("  ".into()),
        }
        .into_query();
        assert_eq!((query.page, query.limit), (1, MAX_PAGE_SIZE));
        assert_eq!(query.featured, Some(true));
        assert_eq!(query.category, None);
    }

    #[test]
    fn huge_page_number_yields_a_valid_offset() {
        let query = BlogListParams {
            page: Some(100_000_000_000_000_000),
            limit: Some(100),
            ..Default::default()
        }
        .into_query();
        assert!(query.offset() >= 0);
    }

    #[test]
    fn symbol_only_title_has_no_slug() {
        assert_matches!(slug_for("!!!"), Err(CoreError::Validation(_)));
        assert_eq!(slug_for("Brand Refresh 2024").unwrap(), "brand-refresh-2024");
    }

    #[test]
    fn excerpt_limit_counts_characters() {
        assert!(check_excerpt(&"é".repeat(EXCERPT_MAX_CHARS)).is_ok());
        assert_matches!(
            check_excerpt(&"a".repeat(EXCERPT_MAX_CHARS + 1)),
            Err(CoreError::Validation(_))
        );
    }
}
