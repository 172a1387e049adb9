//! Cloudinary-backed implementation of [`folio_core::media::MediaStore`].
//!
//! - [`config`] -- credentials and folder layout from the environment.
//! - [`cloudinary`] -- signed upload/destroy calls over the Upload API.
//!
//! [`DisabledMediaStore`] stands in when Cloudinary is not configured.

use async_trait::async_trait;
use folio_core::media::{ImageUpload, MediaError, MediaRef, MediaStore};

pub mod cloudinary;
pub mod config;

pub use cloudinary::CloudinaryMediaStore;
pub use config::CloudinaryConfig;

/// Media store used when Cloudinary credentials are missing. Uploads fail
/// with [`MediaError::NotConfigured`]; deletions are no-ops.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMediaStore;

#[async_trait]
impl MediaStore for DisabledMediaStore {
    async fn upload(&self, folder: &str, upload: &ImageUpload) -> Result<MediaRef, MediaError> {
        tracing::warn!(folder, slot = %upload.slot, "Upload refused: Cloudinary is not configured");
        Err(MediaError::NotConfigured)
    }

    async fn delete(&self, media_id: &str) -> Result<(), MediaError> {
        tracing::debug!(media_id, "Skipping media release: Cloudinary is not configured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::media::Slot;

    use super::*;

    #[tokio::test]
    async fn disabled_store_refuses_uploads() {
        let upload = ImageUpload {
            slot: Slot::Primary,
            file_name: Some("cover.png".into()),
            content_type: Some("image/png".into()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        };
        let result = DisabledMediaStore.upload("gallery", &upload).await;
        assert!(matches!(result, Err(MediaError::NotConfigured)));
        assert!(DisabledMediaStore.delete("ak/gallery/abc").await.is_ok());
    }
}
