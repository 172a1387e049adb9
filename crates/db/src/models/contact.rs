//! Contact form submissions (append-only).

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}
