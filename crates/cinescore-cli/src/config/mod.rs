//! Application configuration module.
//!
//! Manages the TOML config file: API endpoint, search debounce, featured
//! people and tier list defaults.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_URL_ENV, AppConfig};
pub use paths::{resolve_config_path, resolve_log_path};
