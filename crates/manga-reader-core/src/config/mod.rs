//! UI configuration.
//!
//! Settings are read from a TOML file split into `[logging]`, `[swipe]` and
//! `[transition]` tables. Missing entries fall back to defaults so the
//! frontend can always start.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{LogLevel, UiConfig};
