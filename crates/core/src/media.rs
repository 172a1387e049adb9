//! Media references, upload payloads and the media-host seam.
//!
//! The media host itself lives outside this crate (see `folio-media`); the
//! workflow only talks to it through [`MediaStore`].

use std::fmt;

use async_trait::async_trait;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Extensions accepted for uploaded images.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Stable pointer to an object on the media host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub url: String,
    pub media_id: String,
}

/// Named position for an image within a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The single replaceable image of a record (multipart field `image`).
    Primary,
    /// Appendable secondary images (multipart field `brandingImages`).
    Collection,
}

impl Slot {
    /// Multipart field name carrying this slot.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Primary => "image",
            Self::Collection => "brandingImages",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "image" => Some(Self::Primary),
            "brandingImages" => Some(Self::Collection),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// A binary image attached to a request, tagged with its slot.
#[derive(Clone)]
pub struct ImageUpload {
    pub slot: Slot,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("slot", &self.slot)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Check that an upload declares an image content type and that its bytes
/// sniff as one of the accepted formats.
pub fn validate_image(upload: &ImageUpload) -> Result<ImageFormat, CoreError> {
    let declared = upload.content_type.as_deref().unwrap_or_default();
    if !declared.starts_with("image/") {
        return Err(CoreError::InvalidMediaType(format!(
            "'{}' is not an image. Please upload an image.",
            upload.file_name.as_deref().unwrap_or(upload.slot.field_name())
        )));
    }

    if let Some(ext) = upload
        .file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
    {
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(CoreError::InvalidMediaType(format!(
                "Extension '.{ext}' is not allowed. Accepted: {}",
                ACCEPTED_EXTENSIONS.join(", ")
            )));
        }
    }

    match image::guess_format(&upload.bytes) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP)) => Ok(format),
        _ => Err(CoreError::InvalidMediaType(format!(
            "Content of '{}' is not a JPEG, PNG or WebP image",
            upload.file_name.as_deref().unwrap_or(upload.slot.field_name())
        ))),
    }
}

/// Failure reported by a media host.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media host request failed: {0}")]
    Transport(String),

    #[error("media host rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("media host is not configured")]
    NotConfigured,
}

/// External binary-object host addressed by URL and opaque identifier.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `upload` under `folder`, returning its public reference.
    async fn upload(&self, folder: &str, upload: &ImageUpload) -> Result<MediaRef, MediaError>;

    /// Remove the object identified by `media_id`.
    async fn delete(&self, media_id: &str) -> Result<(), MediaError>;
}
