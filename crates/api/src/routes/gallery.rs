//! Route definitions for the `/gallery` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery`.
///
/// ```text
/// GET    /        -> list_gallery (?category=)
/// POST   /        -> create_gallery_item
/// GET    /{id}    -> get_gallery_item
/// PUT    /{id}    -> update_gallery_item
/// DELETE /{id}    -> delete_gallery_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(gallery::list_gallery).post(gallery::create_gallery_item),
        )
        .route(
            "/{id}",
            get(gallery::get_gallery_item)
                .put(gallery::update_gallery_item)
                .delete(gallery::delete_gallery_item),
        )
}
