//! Handlers for the `/testimonials` resource.
//!
//! Public submissions always start unapproved; `GET` hides them unless
//! `?all=true` is passed.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::media::ImageUpload;
use folio_core::types::DbId;
use folio_core::upsert::{MediaPolicy, UpsertWorkflow};
use folio_db::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use folio_db::repositories::TestimonialRepo;
use folio_db::stores::TestimonialStore;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::upload::MultipartForm;

const SUBMITTED: &str = "Testimonial submitted for approval";

pub fn media_policy() -> MediaPolicy {
    MediaPolicy {
        folder: "testimonials".into(),
        primary_required: false,
        max_collection: 0,
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TestimonialListParams {
    pub all: Option<String>,
}

/// Request body for `POST /testimonials`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestimonialRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Please add a name"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Please add a role"))]
    pub role: String,
    pub company: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "Please add a message"))]
    pub message: String,
}

impl CreateTestimonialRequest {
    fn into_draft(self) -> CreateTestimonial {
        CreateTestimonial {
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            company: self
                .company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            message: self.message.trim().to_string(),
        }
    }
}

/// Request body for `PUT /testimonials/{id}`. Absent fields are unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTestimonialRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub approved: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(params): Query<TestimonialListParams>,
) -> AppResult<Json<ApiResponse<Vec<Testimonial>>>> {
    let include_unapproved = params.all.as_deref() == Some("true");
    let items = TestimonialRepo::list(&state.pool, include_unapproved).await?;
    Ok(Json(ApiResponse::list(items)))
}

/// POST /api/testimonials
///
/// Text-only public submission.
pub async fn create_testimonial(
    State(state): State<AppState>,
    Json(input): Json<CreateTestimonialRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Testimonial>>)> {
    input.validate()?;
    create(&state, input.into_draft(), Vec::new()).await
}

/// POST /api/testimonials/upload
///
/// Multipart submission with an optional `image`.
pub async fn create_testimonial_with_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Testimonial>>)> {
    let mut form = MultipartForm::read(multipart, &state.config.uploads).await?;
    let input = CreateTestimonialRequest {
        name: form.required("name")?,
        role: form.required("role")?,
        company: form.optional("company"),
        message: form.required("message")?,
    };
    input.validate()?;
    create(&state, input.into_draft(), form.take_files()).await
}

/// PUT /api/testimonials/{id}
pub async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTestimonialRequest>,
) -> AppResult<Json<ApiResponse<Testimonial>>> {
    let blank = |name: &str, value: &Option<String>| match value {
        Some(v) if v.trim().is_empty() => {
            Err(CoreError::Validation(format!("{name} cannot be empty")))
        }
        _ => Ok(()),
    };
    blank("name", &input.name)?;
    blank("role", &input.role)?;
    blank("message", &input.message)?;

    let patch = UpdateTestimonial {
        name: input.name.map(|v| v.trim().to_string()),
        role: input.role.map(|v| v.trim().to_string()),
        company: input.company.map(|v| v.trim().to_string()),
        message: input.message.map(|v| v.trim().to_string()),
        approved: input.approved,
    };

    let store = TestimonialStore::new(state.pool.clone());
    let policy = media_policy();
    let item = UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .update(&id, patch, Vec::new())
        .await?;

    tracing::info!(id, approved = item.approved, "Testimonial updated");
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/testimonials/{id}
pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let store = TestimonialStore::new(state.pool.clone());
    let policy = media_policy();
    UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .delete(&id)
        .await?;

    tracing::info!(id, "Testimonial deleted");
    Ok(Json(ApiResponse::deleted("Testimonial deleted")))
}

async fn create(
    state: &AppState,
    draft: CreateTestimonial,
    uploads: Vec<ImageUpload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Testimonial>>)> {
    let store = TestimonialStore::new(state.pool.clone());
    let policy = media_policy();
    let item = UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .create(draft, uploads)
        .await?;

    tracing::info!(id = item.id, with_image = item.image_url.is_some(), "Testimonial submitted");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(item).with_message(SUBMITTED)),
    ))
}
