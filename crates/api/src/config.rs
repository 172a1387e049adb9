use crate::auth::jwt::JwtConfig;

/// Deployment environment. Production tightens CORS and secret checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Multipart upload limits.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    /// Largest accepted file, in bytes (default: 30 MiB).
    pub max_file_bytes: usize,
    /// Most files accepted in one request (default: 20).
    pub max_files: usize,
}

impl UploadLimits {
    /// Request body cap: every file at its maximum plus room for text fields.
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_bytes
            .saturating_mul(self.max_files)
            .saturating_add(1024 * 1024)
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: 30 * 1024 * 1024,
            max_files: 20,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    pub environment: Environment,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`, uploads are slow).
    pub request_timeout_secs: u64,
    /// Base URL of the admin frontend, used in invitation links.
    pub frontend_url: String,
    /// Recipient of contact-form notices. `None` disables them.
    pub contact_notify_email: Option<String>,
    pub uploads: UploadLimits,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                   |
    /// |-------------------------|---------------------------|
    /// | `HOST`                  | `0.0.0.0`                 |
    /// | `PORT`                  | `5000`                    |
    /// | `ENVIRONMENT`           | `development`             |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`  | `120`                     |
    /// | `FRONTEND_URL`          | `http://localhost:5173`   |
    /// | `CONTACT_NOTIFY_EMAIL`  | value of `SMTP_USER`      |
    /// | `MAX_UPLOAD_FILE_BYTES` | `31457280` (30 MiB)       |
    /// | `MAX_UPLOAD_FILES`      | `20`                      |
    ///
    /// # Panics
    ///
    /// Panics on malformed numbers, and in production when `JWT_SECRET` is
    /// a placeholder.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = Environment::from_env_value(
            &std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        let contact_notify_email = std::env::var("CONTACT_NOTIFY_EMAIL")
            .or_else(|_| std::env::var("SMTP_USER"))
            .ok()
            .filter(|e| !e.is_empty());

        let defaults = UploadLimits::default();
        let uploads = UploadLimits {
            max_file_bytes: std::env::var("MAX_UPLOAD_FILE_BYTES")
                .map(|v| v.parse().expect("MAX_UPLOAD_FILE_BYTES must be a valid usize"))
                .unwrap_or(defaults.max_file_bytes),
            max_files: std::env::var("MAX_UPLOAD_FILES")
                .map(|v| v.parse().expect("MAX_UPLOAD_FILES must be a valid usize"))
                .unwrap_or(defaults.max_files),
        };

        let jwt = JwtConfig::from_env();
        if environment.is_production() {
            assert!(
                !jwt.is_placeholder(),
                "JWT_SECRET is a placeholder or shorter than 32 characters; refusing to start in production"
            );
        }

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            frontend_url,
            contact_notify_email,
            uploads,
            jwt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing() {
        assert_eq!(Environment::from_env_value("Production"), Environment::Production);
        assert_eq!(Environment::from_env_value("prod"), Environment::Production);
        assert_eq!(Environment::from_env_value("staging"), Environment::Development);
    }

    #[test]
    fn body_limit_covers_every_file() {
        let limits = UploadLimits::default();
        assert!(limits.max_body_bytes() > 20 * 30 * 1024 * 1024);
    }
}
