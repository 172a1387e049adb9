//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod blog_repo;
pub mod contact_repo;
pub mod gallery_repo;
pub mod page_content_repo;
pub mod settings_repo;
pub mod testimonial_repo;
pub mod user_repo;

pub use blog_repo::BlogRepo;
pub use contact_repo::ContactRepo;
pub use gallery_repo::GalleryRepo;
pub use page_content_repo::PageContentRepo;
pub use settings_repo::SettingsRepo;
pub use testimonial_repo::TestimonialRepo;
pub use user_repo::UserRepo;
