//! Multipart form intake.
//!
//! Collects text fields and image attachments from a `multipart/form-data`
//! body, enforcing the configured per-file and per-request limits. File
//! fields must be named after a [`Slot`] (`image` or `brandingImages`).
//! Fields named `meta[key]` are gathered separately for page-content
//! metadata.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use axum::extract::Multipart;
use folio_core::error::CoreError;
use folio_core::media::{ImageUpload, Slot};

use crate::config::UploadLimits;
use crate::error::{AppError, AppResult};

/// A fully read multipart body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    /// Values of `meta[key]` fields, keyed by `key`.
    pub meta_fields: BTreeMap<String, String>,
    pub files: Vec<ImageUpload>,
}

impl MultipartForm {
    /// Drain `multipart`, rejecting unknown file fields and oversized input.
    pub async fn read(mut multipart: Multipart, limits: &UploadLimits) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(mut field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let value = field.text().await?;
                match meta_key(&name) {
                    Some(key) => {
                        form.meta_fields.insert(key.to_string(), value);
                    }
                    None => {
                        form.fields.insert(name, value);
                    }
                }
                continue;
            };

            let slot = Slot::from_field_name(name.trim_end_matches("[]")).ok_or_else(|| {
                AppError::BadRequest(format!("Unexpected file field '{name}'"))
            })?;
            let content_type = field.content_type().map(str::to_string);

            let mut bytes = Vec::new();
            while let Some(chunk) = field.chunk().await? {
                if bytes.len() + chunk.len() > limits.max_file_bytes {
                    return Err(AppError::BadRequest(format!(
                        "File '{file_name}' exceeds the {} KiB limit",
                        limits.max_file_bytes / 1024
                    )));
                }
                bytes.extend_from_slice(&chunk);
            }

            // Browsers submit empty file inputs as a nameless, empty part.
            if bytes.is_empty() && file_name.is_empty() {
                continue;
            }

            if form.files.len() == limits.max_files {
                return Err(AppError::BadRequest(format!(
                    "Too many files: at most {} per request",
                    limits.max_files
                )));
            }

            form.files.push(ImageUpload {
                slot,
                file_name: Some(file_name).filter(|n| !n.is_empty()),
                content_type,
                bytes,
            });
        }

        tracing::debug!(
            fields = form.fields.len(),
            files = form.files.len(),
            "Read multipart body"
        );
        Ok(form)
    }

    /// Raw value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Trimmed value of a text field; blank counts as absent.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Trimmed, non-blank value of a text field.
    pub fn required(&self, name: &str) -> AppResult<String> {
        self.optional(name).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Please add a {name}")))
        })
    }

    /// Parse an optional field with [`FromStr`].
    pub fn parsed<T>(&self, name: &str) -> AppResult<Option<T>>
    where
        T: FromStr<Err = CoreError>,
    {
        self.optional(name)
            .map(|v| v.parse::<T>())
            .transpose()
            .map_err(AppError::from)
    }

    /// Parse an optional `true`/`false` field.
    pub fn flag(&self, name: &str) -> AppResult<Option<bool>> {
        self.optional(name)
            .map(|v| parse_flag(name, &v))
            .transpose()
    }

    pub fn take_files(&mut self) -> Vec<ImageUpload> {
        std::mem::take(&mut self.files)
    }
}

/// `meta[key]` -> `key`.
fn meta_key(name: &str) -> Option<&str> {
    name.strip_prefix("meta[")
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|key| !key.is_empty())
}

/// Parse a form boolean. Accepts `true`/`false` (any case), `1`/`0` and `on`.
pub fn parse_flag(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => Ok(true),
        "false" | "0" | "off" => Ok(false),
        other => Err(AppError::Core(CoreError::Validation(format!(
            "'{name}' must be true or false, got '{other}'"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn meta_key_extracts_bracketed_name() {
        assert_eq!(meta_key("meta[buttonText]"), Some("buttonText"));
        assert_eq!(meta_key("meta[]"), None);
        assert_eq!(meta_key("meta"), None);
        assert_eq!(meta_key("title"), None);
    }

    #[test]
    fn flags_parse_common_spellings() {
        assert!(parse_flag("featured", "TRUE").unwrap());
        assert!(!parse_flag("featured", "0").unwrap());
        assert_matches!(
            parse_flag("featured", "maybe"),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let mut form = MultipartForm::default();
        form.fields.insert("title".into(), "   ".into());
        form.fields.insert("client".into(), " Acme ".into());

        assert_eq!(form.optional("title"), None);
        assert_eq!(form.optional("client").as_deref(), Some("Acme"));
        assert_matches!(
            form.required("title"),
            Err(AppError::Core(CoreError::Validation(msg))) if msg == "Please add a title"
        );
    }
}
