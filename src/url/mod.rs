//! URL handling module for Laptop-Scout
//!
//! This module expands the paginated search URL, resolves listing links and
//! recognises the home-page redirect that ends pagination.

mod normalize;
mod template;

pub use normalize::{is_home_page, normalize_url, resolve_link};
pub use template::{page_url, PAGE_PLACEHOLDER};
