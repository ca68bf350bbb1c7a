//! Core page behaviour, independent of the browser
//!
//! Everything here runs on the server and in tests as well as in WebAssembly.
//! Browser APIs are reached through the [`KeyValueStore`] and [`ScriptHost`]
//! traits, implemented in the UI layer.

#[cfg(feature = "ssr")]
pub mod config;
pub mod embed;
pub mod error;
pub mod loader;
pub mod scroll_spy;
pub mod site;
pub mod storage;
#[cfg(test)]
mod tests;
pub mod visit;

pub use embed::*;
pub use error::*;
pub use loader::*;
pub use scroll_spy::*;
pub use site::*;
pub use storage::*;
pub use visit::*;
