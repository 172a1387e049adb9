//! Domain layer for the Folio content API.
//!
//! Holds the types shared by every other crate: the error taxonomy, roles and
//! capabilities, slug and OTP helpers, media validation, and the resource
//! upsert workflow that couples media-host calls to document-store writes.

pub mod error;
pub mod gallery;
pub mod media;
pub mod otp;
pub mod roles;
pub mod slug;
pub mod types;
pub mod upsert;
