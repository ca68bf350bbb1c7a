//! Browser-facing components
//!
//! Everything that touches the DOM is gated behind `not(feature = "ssr")`;
//! the server renders the same components with their initial state.

pub mod boundary;
pub mod embeds;
pub mod icon;
pub mod loader;
pub mod nav;
pub mod pages;
pub mod reveal;
pub mod scroll_spy;
pub mod sections;
pub mod spinner;
#[cfg(not(feature = "ssr"))]
pub mod storage;
pub mod theme;

pub use boundary::{RegionBoundary, RegionFallback};
pub use icon::{Icon, icons};
pub use loader::{ScriptOptions, use_script};
pub use nav::Navigation;
pub use reveal::{RevealContext, start_reveal};
pub use scroll_spy::{ScrollSpyContext, use_scroll_spy, use_scroll_spy_context};
pub use theme::{ThemeContext, provide_theme_context, use_theme_context};
