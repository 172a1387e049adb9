//! Route definitions for the `/blog` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blog`.
///
/// ```text
/// GET    /          -> list_posts (?category=&featured=&page=&limit=)
/// POST   /          -> create_post
/// GET    /{slug}    -> get_post
/// PUT    /id/{id}   -> update_post
/// DELETE /id/{id}   -> delete_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list_posts).post(blog::create_post))
        .route("/{slug}", get(blog::get_post))
        .route("/id/{id}", put(blog::update_post).delete(blog::delete_post))
}
