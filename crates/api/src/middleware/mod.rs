//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `ManageUsers` capability.
//! - [`rbac::RequireEditor`] -- Requires the `EditContent`/`EditSettings` capabilities.

pub mod auth;
pub mod rbac;
