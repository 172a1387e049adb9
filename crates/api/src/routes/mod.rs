pub mod auth;
pub mod blog;
pub mod contact;
pub mod content;
pub mod gallery;
pub mod health;
pub mod settings;
pub mod testimonials;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                         liveness
/// /health/ready                   readiness (database ping)
///
/// /auth/register                  register (public)
/// /auth/login                     login (public)
/// /auth/forgotpassword            request reset code (public)
/// /auth/resetpassword             consume reset code (public)
/// /auth/me                        current user (requires auth)
/// /auth/users                     list (admin only)
/// /auth/users/{id}                delete (admin only)
/// /auth/users/{id}/role           change role (admin only)
/// /auth/invite                    invite (admin only)
///
/// /gallery                        list, create (multipart)
/// /gallery/{id}                   get, update (multipart), delete
///
/// /blog                           list (paged), create (multipart)
/// /blog/{slug}                    get by slug
/// /blog/id/{id}                   update (multipart), delete
///
/// /contact                        submit, list
///
/// /testimonials                   list, submit (JSON)
/// /testimonials/upload            submit with image (multipart)
/// /testimonials/{id}              update/approve, delete
///
/// /content                        all sections keyed by name
/// /content/{section}              upsert (multipart), delete (requires auth)
///
/// /settings                       get, update (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health::router())
        .nest("/auth", auth::router())
        .nest("/gallery", gallery::router())
        .nest("/blog", blog::router())
        .nest("/contact", contact::router())
        .nest("/testimonials", testimonials::router())
        .nest("/content", content::router())
        .nest("/settings", settings::router())
}
