//! Configuration loading and validation.

pub mod error;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
