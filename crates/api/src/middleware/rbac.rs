//! Capability-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`], reloads the account and rejects
//! requests whose stored role does not hold the required [`Capability`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::roles::{authorize, Capability};
use folio_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then check capabilities against the role currently stored
/// for the account. A role change or deletion takes effect on the next
/// request, whatever the token claims.
async fn require(
    parts: &mut Parts,
    state: &AppState,
    capabilities: &[Capability],
) -> Result<AuthUser, AppError> {
    let claimed = AuthUser::from_request_parts(parts, state).await?;
    let user = UserRepo::find_by_id(&state.pool, claimed.user_id)
        .await?
        .ok_or_else(|| {
            tracing::debug!(user_id = claimed.user_id, "Token refers to a removed account");
            CoreError::Unauthorized("Not authorized to access this route".into())
        })?;

    let role = user.role();
    if role != claimed.role {
        tracing::debug!(user_id = user.id, claimed = %claimed.role, stored = %role, "Token role is stale");
    }
    for &capability in capabilities {
        authorize(role, capability)?;
    }
    Ok(AuthUser {
        user_id: user.id,
        role,
    })
}

/// Requires [`Capability::ManageUsers`] (the `admin` role). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, &[Capability::ManageUsers])
            .await
            .map(RequireAdmin)
    }
}

/// Requires the editing capabilities held by `user` and `admin`.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(
            parts,
            state,
            &[Capability::EditContent, Capability::EditSettings],
        )
        .await
        .map(RequireEditor)
    }
}
