//! Cloudinary configuration.

/// Default root folder for every upload.
const DEFAULT_FOLDER: &str = "ak_design_uploads";

/// Default Upload API base URL.
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Credentials and layout for the Cloudinary Upload API.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Root folder; each resource kind uploads into `{folder}/{kind}`.
    pub folder: String,
    /// Upload API base URL (overridable for testing against a stub).
    pub api_base: String,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("folder", &self.folder)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl CloudinaryConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless the cloud name, key and secret are all set, in
    /// which case uploads are disabled.
    ///
    /// | Variable                 | Required | Default                          |
    /// |--------------------------|----------|----------------------------------|
    /// | `CLOUDINARY_CLOUD_NAME`  | yes      | --                               |
    /// | `CLOUDINARY_API_KEY`     | yes      | --                               |
    /// | `CLOUDINARY_API_SECRET`  | yes      | --                               |
    /// | `CLOUDINARY_FOLDER`      | no       | `ak_design_uploads`              |
    /// | `CLOUDINARY_API_BASE`    | no       | `https://api.cloudinary.com/v1_1`|
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Some(Self {
            cloud_name: get("CLOUDINARY_CLOUD_NAME")?,
            api_key: get("CLOUDINARY_API_KEY")?,
            api_secret: get("CLOUDINARY_API_SECRET")?,
            folder: get("CLOUDINARY_FOLDER").unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
            api_base: get("CLOUDINARY_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }

    /// Endpoint for an image action (`upload` or `destroy`).
    pub fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{action}", self.api_base, self.cloud_name)
    }
}
