//! Route definitions for the `/auth` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register          -> register
/// POST   /login             -> login
/// POST   /forgotpassword    -> forgot_password
/// PUT    /resetpassword     -> reset_password
/// GET    /me                -> me (requires auth)
/// GET    /users             -> list_users (admin)
/// DELETE /users/{id}        -> delete_user (admin)
/// PUT    /users/{id}/role   -> update_user_role (admin)
/// POST   /invite            -> invite_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/forgotpassword", post(auth::forgot_password))
        .route("/resetpassword", put(auth::reset_password))
        .route("/me", get(auth::me))
        .route("/users", get(auth::list_users))
        .route("/users/{id}", delete(auth::delete_user))
        .route("/users/{id}/role", put(auth::update_user_role))
        .route("/invite", post(auth::invite_user))
}
