use std::sync::Arc;

use folio_core::media::MediaStore;
use folio_notify::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image host (Cloudinary, or a disabled stand-in).
    pub media: Arc<dyn MediaStore>,
    /// Outgoing email (SMTP, or a disabled stand-in).
    pub mailer: Arc<dyn Mailer>,
}
