//! Platform-free pieces of the manga reader frontend.
//!
//! Everything in here runs without a browser: the swipe state machine, the
//! pop-in transition math, the typed backend command bridge and the UI
//! configuration. The browser glue lives in the root crate.

pub mod bridge;
pub mod config;
pub mod swipe;
pub mod transition;
pub mod types;
