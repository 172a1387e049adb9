//! Route definitions for the `/testimonials` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::testimonials;
use crate::state::AppState;

/// Routes mounted at `/testimonials`.
///
/// ```text
/// GET    /          -> list_testimonials (?all=true)
/// POST   /          -> create_testimonial (JSON)
/// POST   /upload    -> create_testimonial_with_image (multipart)
/// PUT    /{id}      -> update_testimonial
/// DELETE /{id}      -> delete_testimonial
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(testimonials::list_testimonials).post(testimonials::create_testimonial),
        )
        .route(
            "/upload",
            post(testimonials::create_testimonial_with_image),
        )
        .route(
            "/{id}",
            put(testimonials::update_testimonial).delete(testimonials::delete_testimonial),
        )
}
