use super::defaults;
use super::models::{LogLevel, UiConfig};
use crate::transition::Easing;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    swipe: SwipeTable,
    #[serde(default)]
    transition: TransitionTable,
}

impl From<ConfigTables> for UiConfig {
    fn from(tables: ConfigTables) -> Self {
        UiConfig {
            log_level: tables.logging.log_level,
            flick_window_ms: millis_or_default(
                "swipe.flick_window_ms",
                tables.swipe.flick_window_ms,
                defaults::default_flick_window_ms(),
            ),
            validity_gate: tables.swipe.validity_gate,
            min_swipe_duration_ms: millis_or_default(
                "swipe.min_duration_ms",
                tables.swipe.min_duration_ms,
                defaults::default_min_swipe_duration_ms(),
            ),
            min_swipe_distance_px: tables.swipe.min_distance_px,
            transition_delay_ms: millis_or_default(
                "transition.delay_ms",
                tables.transition.delay_ms,
                defaults::default_transition_delay_ms(),
            ),
            transition_duration_ms: millis_or_default(
                "transition.duration_ms",
                tables.transition.duration_ms,
                defaults::default_transition_duration_ms(),
            ),
            transition_easing: tables.transition.easing,
        }
    }
}

/// Durations must be finite and non-negative; TOML happily accepts `inf`.
fn millis_or_default(key: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(key, value, default, "Ignoring invalid duration in config");
        default
    }
}

impl From<&UiConfig> for ConfigTables {
    fn from(config: &UiConfig) -> Self {
        ConfigTables {
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            swipe: SwipeTable {
                flick_window_ms: config.flick_window_ms,
                validity_gate: config.validity_gate,
                min_duration_ms: config.min_swipe_duration_ms,
                min_distance_px: config.min_swipe_distance_px,
            },
            transition: TransitionTable {
                delay_ms: config.transition_delay_ms,
                duration_ms: config.transition_duration_ms,
                easing: config.transition_easing,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SwipeTable {
    #[serde(default = "defaults::default_flick_window_ms")]
    flick_window_ms: f64,
    #[serde(default = "defaults::default_validity_gate")]
    validity_gate: bool,
    #[serde(default = "defaults::default_min_swipe_duration_ms")]
    min_duration_ms: f64,
    #[serde(default = "defaults::default_min_swipe_distance_px")]
    min_distance_px: f64,
}

impl Default for SwipeTable {
    fn default() -> Self {
        SwipeTable {
            flick_window_ms: defaults::default_flick_window_ms(),
            validity_gate: defaults::default_validity_gate(),
            min_duration_ms: defaults::default_min_swipe_duration_ms(),
            min_distance_px: defaults::default_min_swipe_distance_px(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct TransitionTable {
    #[serde(default = "defaults::default_transition_delay_ms")]
    delay_ms: f64,
    #[serde(default = "defaults::default_transition_duration_ms")]
    duration_ms: f64,
    #[serde(default = "defaults::default_transition_easing")]
    easing: Easing,
}

impl Default for TransitionTable {
    fn default() -> Self {
        TransitionTable {
            delay_ms: defaults::default_transition_delay_ms(),
            duration_ms: defaults::default_transition_duration_ms(),
            easing: defaults::default_transition_easing(),
        }
    }
}
