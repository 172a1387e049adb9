//! Handlers for the `/content` resource: editable page sections keyed by
//! name (e.g. `hero`, `about`).

use std::collections::BTreeMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::upsert::{MediaPolicy, Upserted, UpsertWorkflow};
use folio_db::models::page_content::{
    ContentMeta, CreatePageContent, PageContent, UpdatePageContent,
};
use folio_db::repositories::PageContentRepo;
use folio_db::stores::PageContentStore;

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::upload::MultipartForm;

/// Longest accepted section name.
const MAX_SECTION_LEN: usize = 64;

pub fn media_policy() -> MediaPolicy {
    MediaPolicy {
        folder: "content".into(),
        primary_required: false,
        max_collection: 0,
    }
}

/// GET /api/content
///
/// Every section, keyed by section name.
pub async fn list_content(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BTreeMap<String, PageContent>>>> {
    let sections = PageContentRepo::list(&state.pool).await?;
    let by_section = sections
        .into_iter()
        .map(|s| (s.section.clone(), s))
        .collect();
    Ok(Json(ApiResponse::ok(by_section)))
}

/// POST /api/content/{section}
///
/// Multipart upsert. Text fields `title`, `subtitle`, `content`; an optional
/// `image`; metadata either as a JSON object in `meta` or as `meta[key]`
/// fields. Metadata keys merge into the stored map.
pub async fn upsert_content(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    Path(section): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<PageContent>>)> {
    check_section(&section)?;
    let mut form = MultipartForm::read(multipart, &state.config.uploads).await?;

    let mut meta = match form.text("meta") {
        Some(raw) if !raw.trim().is_empty() => parse_meta(raw)?,
        _ => ContentMeta::new(),
    };
    meta.extend(std::mem::take(&mut form.meta_fields));

    let title = form.text("title").map(str::to_string);
    let subtitle = form.text("subtitle").map(str::to_string);
    let content = form.text("content").map(str::to_string);

    let draft = CreatePageContent {
        section: section.clone(),
        title: title.clone().unwrap_or_default(),
        subtitle: subtitle.clone().unwrap_or_default(),
        content: content.clone().unwrap_or_default(),
        meta: meta.clone(),
    };
    let patch = UpdatePageContent {
        title,
        subtitle,
        content,
        meta,
    };

    let store = PageContentStore::new(state.pool.clone());
    let policy = media_policy();
    let (record, outcome) = UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .upsert(&section, draft, patch, form.take_files())
        .await?;

    tracing::info!(section = %record.section, ?outcome, editor_id = editor.user_id, "Content section saved");
    let status = match outcome {
        Upserted::Created => StatusCode::CREATED,
        Upserted::Updated => StatusCode::OK,
    };
    Ok((status, Json(ApiResponse::ok(record))))
}

/// DELETE /api/content/{section}
pub async fn delete_content(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    Path(section): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let store = PageContentStore::new(state.pool.clone());
    let policy = media_policy();
    UpsertWorkflow::new(&store, state.media.as_ref(), &policy)
        .delete(&section)
        .await?;

    tracing::info!(section = %section, editor_id = editor.user_id, "Content section deleted");
    Ok(Json(ApiResponse::deleted("Content section deleted")))
}

/// Section names are short identifiers: ASCII letters, digits, `-` and `_`.
fn check_section(section: &str) -> Result<(), CoreError> {
    let valid = !section.is_empty()
        && section.len() <= MAX_SECTION_LEN
        && section
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid section name '{section}'"
        )))
    }
}

/// Parse a JSON object of metadata. Non-string values are kept in their
/// JSON text form.
fn parse_meta(raw: &str) -> Result<ContentMeta, CoreError> {
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("'meta' must be a JSON object: {e}")))?;

    Ok(object
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}
