//! Application pages
//!
//! - Landing page (home)
//! - Not found page

mod landing;
mod not_found;

pub use landing::{LandingPage, organization_json_ld};
pub use not_found::NotFoundPage;
