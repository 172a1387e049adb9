pub mod blog;
pub mod contact;
pub mod gallery;
pub mod page_content;
pub mod settings;
pub mod testimonial;
pub mod user;
