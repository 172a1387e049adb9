//! One-time numeric codes for password reset and account invitation.

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use rand::Rng;

use crate::types::Timestamp;

/// Number of digits in every generated code.
pub const OTP_DIGITS: usize = 6;

/// Why a code was issued; decides how long it stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    /// Self-service password reset (10 minutes).
    PasswordReset,
    /// Admin invitation to set an initial password (24 hours).
    Invitation,
}

impl OtpPurpose {
    pub fn validity(self) -> Duration {
        match self {
            Self::PasswordReset => Duration::minutes(10),
            Self::Invitation => Duration::hours(24),
        }
    }
}

/// A freshly issued code and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct OtpGrant {
    pub code: String,
    pub expires_at: Timestamp,
}

impl OtpGrant {
    pub fn issue(purpose: OtpPurpose, now: Timestamp) -> Self {
        Self {
            code: generate_code(),
            expires_at: now + purpose.validity(),
        }
    }
}

/// Generate a uniformly random 6-digit code (100000..=999999).
pub fn generate_code() -> String {
    rand::rng().random_range(100_000..1_000_000u32).to_string()
}

/// Check a provided code against the stored one.
///
/// Accepts only when a code is stored, the values match and the expiry lies
/// strictly after `now`.
pub fn verify(
    stored: Option<&str>,
    expires_at: Option<Timestamp>,
    provided: &str,
    now: Timestamp,
) -> bool {
    match (stored, expires_at) {
        (Some(stored), Some(expires_at)) => {
            expires_at > now && constant_time_eq(stored.as_bytes(), provided.as_bytes())
        }
        _ => false,
    }
}
