//! Route definitions for the `/content` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET    /            -> list_content
/// POST   /{section}   -> upsert_content (requires auth)
/// DELETE /{section}   -> delete_content (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list_content))
        .route(
            "/{section}",
            post(content::upsert_content).delete(content::delete_content),
        )
}
