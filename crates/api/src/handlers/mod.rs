//! Request handlers, one module per resource.
//!
//! Image-bearing resources (gallery, blog, testimonials, content) go through
//! [`folio_core::upsert::UpsertWorkflow`] with their own `media_policy()`.

pub mod auth;
pub mod blog;
pub mod contact;
pub mod content;
pub mod gallery;
pub mod settings;
pub mod testimonials;
