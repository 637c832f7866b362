//! Frontend layer of the manga reader.
//!
//! The platform-free logic lives in `manga-reader-core` and is re-exported
//! here. This crate adds the browser glue (`web`, wasm32 only), TypeScript
//! binding export and native logging setup.

pub use manga_reader_core::{bridge, config, swipe, transition, types};

pub mod bindings;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod web;
