//! Data model: users and pages

pub mod page;
pub mod user;

pub use page::{is_valid_page_name, NewPage, Page};
pub use user::{Role, User};
