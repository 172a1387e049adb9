//! Handlers for the `/gallery` resource (portfolio items).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::gallery::GalleryCategory;
use folio_core::types::DbId;
use folio_core::upsert::{MediaPolicy, UpsertWorkflow};
use folio_db::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use folio_db::repositories::GalleryRepo;
use folio_db::stores::GalleryStore;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::upload::MultipartForm;

/// Branding images accepted per request.
pub const MAX_BRANDING_IMAGES: usize = 10;

pub fn media_policy() -> MediaPolicy {
    MediaPolicy {
        folder: "gallery".into(),
        primary_required: true,
        max_collection: MAX_BRANDING_IMAGES,
    }
}

/// Query parameters for `GET /gallery`.
#[derive(Debug, Deserialize)]
pub struct GalleryListParams {
    pub category: Option<String>,
}

/// GET /api/gallery
///
/// Newest first. `?category=` filters on one category; blank or `All` means
/// every category.
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(params): Query<GalleryListParams>,
) -> AppResult<Json<ApiResponse<Vec<GalleryItem>>>> {
    let category = match params.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(all) if all.eq_ignore_ascii_case("all") => None,
        Some(name) => Some(name.parse::<GalleryCategory>()?),
    };

    let items = GalleryRepo::list(&state.pool, category).await?;
    Ok(Json(ApiResponse::list(items)))
}

/// GET /api/gallery/{id}
pub async fn get_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    let item = GalleryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Gallery item", id))?;
    Ok(Json(ApiResponse::ok(item)))
}

/// POST /api/gallery
///
/// Multipart: `image` (required), up to ten `brandingImages`, and the text
/// fields `title`, `description`, `category`, `aboutProject`, `date`,
/// `client`.
pub async fn create_gallery_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<GalleryItem>>)> {
    let mut form = MultipartForm::read(multipart, &state.config.uploads).await?;

    let draft = CreateGalleryItem {
        title: form.required("title")?,
        description: form.required("description")?,
        category: form
            .parsed::<GalleryCategory>("category")?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "Please add a category".into(),
                ))
            })?,
        about_project: form.optional("aboutProject").unwrap_or_default(),
        project_date: form.optional("date").unwrap_or_default(),
        client: form.optional("client").unwrap_or_default(),
    };

    let store = GalleryStore::new(state.pool.clone());
    let policy = media_policy();
    let item = UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .create(draft, form.take_files())
        .await?;

    tracing::info!(id = item.id, category = %item.category, "Gallery item created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item))))
}

/// PUT /api/gallery/{id}
///
/// Multipart. A new `image` replaces the current one; `brandingImages` are
/// appended. Absent text fields are left unchanged.
pub async fn update_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    let mut form = MultipartForm::read(multipart, &state.config.uploads).await?;

    let patch = UpdateGalleryItem {
        title: form.optional("title"),
        description: form.optional("description"),
        category: form.parsed::<GalleryCategory>("category")?,
        about_project: form.text("aboutProject").map(|v| v.trim().to_string()),
        project_date: form.text("date").map(|v| v.trim().to_string()),
        client: form.text("client").map(|v| v.trim().to_string()),
    };

    let store = GalleryStore::new(state.pool.clone());
    let policy = media_policy();
    let item = UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .update(&id, patch, form.take_files())
        .await?;

    tracing::info!(id, "Gallery item updated");
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/gallery/{id}
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let store = GalleryStore::new(state.pool.clone());
    let policy = media_policy();
    UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .delete(&id)
        .await?;

    tracing::info!(id, "Gallery item deleted");
    Ok(Json(ApiResponse::deleted("Gallery item deleted")))
}
