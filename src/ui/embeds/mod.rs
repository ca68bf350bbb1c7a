//! Third-party embeds and their static replacements

mod backdrop;
mod booking;
mod chat;

pub use backdrop::{Backdrop, GradientLayer};
pub use booking::{BookingEmbed, BookingFallback};
pub use chat::ChatWidget;
