//! Configuration file parsing for cform
//!
//! Settings live in `<config dir>/cform/config.toml`. A missing or broken
//! file never stops the form from opening; defaults are used instead.

pub mod settings;
pub mod types;

pub use settings::{default_config_dir, load_settings, load_settings_from};
pub use types::*;
