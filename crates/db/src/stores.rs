//! [`ResourceStore`] adapters binding the upsert workflow to the repositories.

use async_trait::async_trait;
use folio_core::types::DbId;
use folio_core::upsert::{ResolvedMedia, ResourceStore, StoreError};
use sqlx::PgPool;

use crate::models::blog::{BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use crate::models::page_content::{CreatePageContent, PageContent, UpdatePageContent};
use crate::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use crate::repositories::{BlogRepo, GalleryRepo, PageContentRepo, TestimonialRepo};

/// Translate a sqlx error into the workflow's store error.
///
/// PostgreSQL unique violations (SQLSTATE `23505`) become
/// [`StoreError::Conflict`] carrying the constraint name.
pub fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::Conflict(db_err.constraint().unwrap_or("unique").to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

pub struct GalleryStore {
    pool: PgPool,
}

impl GalleryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for GalleryStore {
    const ENTITY: &'static str = "Gallery item";
    type Key = DbId;
    type Record = GalleryItem;
    type Draft = CreateGalleryItem;
    type Patch = UpdateGalleryItem;

    async fn insert(
        &self,
        draft: CreateGalleryItem,
        media: ResolvedMedia,
    ) -> Result<GalleryItem, StoreError> {
        GalleryRepo::create(&self.pool, &draft, &media)
            .await
            .map_err(store_error)
    }

    async fn find(&self, key: &DbId) -> Result<Option<GalleryItem>, StoreError> {
        GalleryRepo::find_by_id(&self.pool, *key)
            .await
            .map_err(store_error)
    }

    async fn update(
        &self,
        key: &DbId,
        patch: UpdateGalleryItem,
        media: ResolvedMedia,
    ) -> Result<Option<GalleryItem>, StoreError> {
        GalleryRepo::update(&self.pool, *key, &patch, &media)
            .await
            .map_err(store_error)
    }

    async fn remove(&self, key: &DbId) -> Result<bool, StoreError> {
        GalleryRepo::delete(&self.pool, *key)
            .await
            .map_err(store_error)
    }
}

// ---------------------------------------------------------------------------
// Blog
// ---------------------------------------------------------------------------

pub struct BlogStore {
    pool: PgPool,
}

impl BlogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for BlogStore {
    const ENTITY: &'static str = "Blog post";
    type Key = DbId;
    type Record = BlogPost;
    type Draft = CreateBlogPost;
    type Patch = UpdateBlogPost;

    async fn insert(
        &self,
        draft: CreateBlogPost,
        media: ResolvedMedia,
    ) -> Result<BlogPost, StoreError> {
        BlogRepo::create(&self.pool, &draft, &media)
            .await
            .map_err(store_error)
    }

    async fn find(&self, key: &DbId) -> Result<Option<BlogPost>, StoreError> {
        BlogRepo::find_by_id(&self.pool, *key)
            .await
            .map_err(store_error)
    }

    async fn update(
        &self,
        key: &DbId,
        patch: UpdateBlogPost,
        media: ResolvedMedia,
    ) -> Result<Option<BlogPost>, StoreError> {
        BlogRepo::update(&self.pool, *key, &patch, &media)
            .await
            .map_err(store_error)
    }

    async fn remove(&self, key: &DbId) -> Result<bool, StoreError> {
        BlogRepo::delete(&self.pool, *key).await.map_err(store_error)
    }
}

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

pub struct TestimonialStore {
    pool: PgPool,
}

impl TestimonialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for TestimonialStore {
    const ENTITY: &'static str = "Testimonial";
    type Key = DbId;
    type Record = Testimonial;
    type Draft = CreateTestimonial;
    type Patch = UpdateTestimonial;

    async fn insert(
        &self,
        draft: CreateTestimonial,
        media: ResolvedMedia,
    ) -> Result<Testimonial, StoreError> {
        TestimonialRepo::create(&self.pool, &draft, &media)
            .await
            .map_err(store_error)
    }

    async fn find(&self, key: &DbId) -> Result<Option<Testimonial>, StoreError> {
        TestimonialRepo::find_by_id(&self.pool, *key)
            .await
            .map_err(store_error)
    }

    async fn update(
        &self,
        key: &DbId,
        patch: UpdateTestimonial,
        media: ResolvedMedia,
    ) -> Result<Option<Testimonial>, StoreError> {
        TestimonialRepo::update(&self.pool, *key, &patch, &media)
            .await
            .map_err(store_error)
    }

    async fn remove(&self, key: &DbId) -> Result<bool, StoreError> {
        TestimonialRepo::delete(&self.pool, *key)
            .await
            .map_err(store_error)
    }
}

// ---------------------------------------------------------------------------
// Page content
// ---------------------------------------------------------------------------

/// Page-content store keyed by section name.
pub struct PageContentStore {
    pool: PgPool,
}

impl PageContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PageContentStore {
    const ENTITY: &'static str = "Content section";
    type Key = String;
    type Record = PageContent;
    type Draft = CreatePageContent;
    type Patch = UpdatePageContent;

    async fn insert(
        &self,
        draft: CreatePageContent,
        media: ResolvedMedia,
    ) -> Result<PageContent, StoreError> {
        PageContentRepo::create(&self.pool, &draft, &media)
            .await
            .map_err(store_error)
    }

    async fn find(&self, key: &String) -> Result<Option<PageContent>, StoreError> {
        PageContentRepo::find_by_section(&self.pool, key)
            .await
            .map_err(store_error)
    }

    async fn update(
        &self,
        key: &String,
        patch: UpdatePageContent,
        media: ResolvedMedia,
    ) -> Result<Option<PageContent>, StoreError> {
        PageContentRepo::update(&self.pool, key, &patch, &media)
            .await
            .map_err(store_error)
    }

    async fn remove(&self, key: &String) -> Result<bool, StoreError> {
        PageContentRepo::delete(&self.pool, key)
            .await
            .map_err(store_error)
    }
}
