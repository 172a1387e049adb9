use crate::media::Slot;

/// Domain error taxonomy shared by the workflow, the repositories and the
/// HTTP layer. The API crate maps each variant onto a status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing required media for slot '{0}'")]
    MissingRequiredMedia(Slot),

    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Media upload failed: {0}")]
    MediaUploadFailed(String),

    #[error("Record persist failed: {0}")]
    RecordPersistFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] with any displayable key.
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
