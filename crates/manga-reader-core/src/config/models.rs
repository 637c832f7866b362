use crate::swipe::{SwipeConfig, ValidityGate};
use crate::transition::{Easing, TransitionConfig};
use serde::Deserialize;

/// Frontend configuration; deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct UiConfig {
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_flick_window_ms")]
    pub flick_window_ms: f64,
    #[serde(default = "crate::config::defaults::default_validity_gate")]
    pub validity_gate: bool,
    #[serde(default = "crate::config::defaults::default_min_swipe_duration_ms")]
    pub min_swipe_duration_ms: f64,
    #[serde(default = "crate::config::defaults::default_min_swipe_distance_px")]
    pub min_swipe_distance_px: f64,
    #[serde(default = "crate::config::defaults::default_transition_delay_ms")]
    pub transition_delay_ms: f64,
    #[serde(default = "crate::config::defaults::default_transition_duration_ms")]
    pub transition_duration_ms: f64,
    #[serde(default = "crate::config::defaults::default_transition_easing")]
    pub transition_easing: Easing,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            log_level: crate::config::defaults::default_log_level(),
            flick_window_ms: crate::config::defaults::default_flick_window_ms(),
            validity_gate: crate::config::defaults::default_validity_gate(),
            min_swipe_duration_ms: crate::config::defaults::default_min_swipe_duration_ms(),
            min_swipe_distance_px: crate::config::defaults::default_min_swipe_distance_px(),
            transition_delay_ms: crate::config::defaults::default_transition_delay_ms(),
            transition_duration_ms: crate::config::defaults::default_transition_duration_ms(),
            transition_easing: crate::config::defaults::default_transition_easing(),
        }
    }
}

impl UiConfig {
    /// Recognizer settings; the validity gate stays off unless enabled.
    pub fn swipe_config(&self) -> SwipeConfig {
        SwipeConfig {
            flick_window_ms: self.flick_window_ms,
            validity_gate: self.validity_gate.then_some(ValidityGate {
                min_duration_ms: self.min_swipe_duration_ms,
                min_distance_px: self.min_swipe_distance_px,
            }),
        }
    }

    pub fn transition_config(&self) -> TransitionConfig {
        TransitionConfig {
            delay_ms: self.transition_delay_ms,
            duration_ms: self.transition_duration_ms,
            easing: self.transition_easing,
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse a user-facing label; accepts `warning` as an alias for `warn`.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}
