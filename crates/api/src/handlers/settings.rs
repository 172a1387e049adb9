//! Handlers for the `/settings` resource (site-wide singleton).

use axum::extract::State;
use axum::Json;
use folio_db::models::settings::{SiteSettings, UpdateSiteSettings};
use folio_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/settings
///
/// The settings row is created with its defaults on first read.
pub async fn get_settings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SiteSettings>>> {
    let settings = SettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// PUT /api/settings
///
/// Partial update; `socialLinks` keys merge into the stored links.
pub async fn update_settings(
    State(state): State<AppState>,
    RequireEditor(editor): RequireEditor,
    Json(input): Json<UpdateSiteSettings>,
) -> AppResult<Json<ApiResponse<SiteSettings>>> {
    let settings = SettingsRepo::update(&state.pool, &input).await?;

    tracing::info!(editor_id = editor.user_id, "Site settings updated");
    Ok(Json(ApiResponse::ok(settings)))
}
