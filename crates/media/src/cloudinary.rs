//! Signed calls to the Cloudinary Upload API.
//!
//! Uploads post the raw bytes as multipart form data together with the
//! signed parameters; deletions call `image/destroy` with the public id.
//! Resizing is delegated to Cloudinary through an incoming transformation.

use async_trait::async_trait;
use folio_core::media::{ImageUpload, MediaError, MediaRef, MediaStore};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::CloudinaryConfig;

/// Formats Cloudinary accepts for our uploads.
pub const ALLOWED_FORMATS: &str = "jpg,png,jpeg,webp";

/// Incoming transformation applied before storage: cap width at 1000px.
pub const INCOMING_TRANSFORMATION: &str = "c_limit,w_1000";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Media store backed by one Cloudinary cloud.
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Reuse an existing [`reqwest::Client`] (shares its connection pool).
    pub fn with_client(client: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self { client, config }
    }

    fn folder_for(&self, kind: &str) -> String {
        format!("{}/{kind}", self.config.folder)
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    /// Decode a success body, or turn a non-2xx reply into
    /// [`MediaError::Rejected`] carrying Cloudinary's message.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, MediaError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MediaError::Transport(format!("invalid response body: {e}")))
    }
}

/// Compute the request signature.
///
/// Parameters with empty values are skipped; the rest are sorted by name,
/// joined as `k=v` pairs with `&`, suffixed with the API secret and hashed
/// with SHA-256 (hex encoded).
pub fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut pairs: Vec<&(&str, String)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, folder: &str, upload: &ImageUpload) -> Result<MediaRef, MediaError> {
        let params = vec![
            ("allowed_formats", ALLOWED_FORMATS.to_string()),
            ("folder", self.folder_for(folder)),
            ("timestamp", Self::timestamp()),
            ("transformation", INCOMING_TRANSFORMATION.to_string()),
        ];
        let signature = sign(&params, &self.config.api_secret);

        let mut part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone().unwrap_or_else(|| "upload".into()));
        if let Some(content_type) = &upload.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| MediaError::Transport(e.to_string()))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (name, value) in params {
            form = form.text(name, value);
        }

        let response = self
            .client
            .post(self.config.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let body: UploadResponse = Self::parse_response(response).await?;
        tracing::debug!(media_id = %body.public_id, "Uploaded image to Cloudinary");

        Ok(MediaRef {
            url: body.secure_url,
            media_id: body.public_id,
        })
    }

    async fn delete(&self, media_id: &str) -> Result<(), MediaError> {
        let params = vec![
            ("public_id", media_id.to_string()),
            ("timestamp", Self::timestamp()),
        ];
        let signature = sign(&params, &self.config.api_secret);

        let mut form: Vec<(&str, String)> = params;
        form.push(("api_key", self.config.api_key.clone()));
        form.push(("signature", signature));
        form.push(("signature_algorithm", "sha256".to_string()));

        let response = self
            .client
            .post(self.config.endpoint("destroy"))
            .form(&form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        let body: DestroyResponse = Self::parse_response(response).await?;
        match body.result.as_str() {
            "ok" => Ok(()),
            // Already gone; the caller's goal is met.
            "not found" => {
                tracing::debug!(media_id, "Cloudinary object already absent");
                Ok(())
            }
            other => Err(MediaError::Rejected {
                status: 200,
                message: format!("destroy returned '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_known_digest() {
        let params = vec![
            ("timestamp", "1700000000".to_string()),
            ("folder", "ak/gallery".to_string()),
        ];
        assert_eq!(
            sign(&params, "secret"),
            "fe8e8033315d7dcf0acfae07cb8210b79361347f1932cab2613abee9e38f872a"
        );
    }

    #[test]
    fn empty_params_are_not_signed() {
        let with_empty = vec![
            ("folder", "ak/gallery".to_string()),
            ("tags", String::new()),
            ("timestamp", "1700000000".to_string()),
        ];
        let without = vec![
            ("timestamp", "1700000000".to_string()),
            ("folder", "ak/gallery".to_string()),
        ];
        assert_eq!(sign(&with_empty, "secret"), sign(&without, "secret"));
    }

    #[test]
    fn uploads_land_under_the_root_folder() {
        let store = CloudinaryMediaStore::new(CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: "ak_design_uploads".into(),
            api_base: "http://localhost:0".into(),
        });
        assert_eq!(store.folder_for("blog"), "ak_design_uploads/blog");
    }
}
