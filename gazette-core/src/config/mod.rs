//! Configuration types
//!
//! Board-agnostic station configuration, loadable from TOML.

#[cfg(feature = "toml")]
pub mod toml;
pub mod types;

#[cfg(feature = "toml")]
pub use self::toml::parse_config;
pub use types::*;
