use crate::transition::Easing;

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

pub(crate) fn default_flick_window_ms() -> f64 {
    crate::swipe::FLICK_WINDOW_MS
}

pub(crate) fn default_validity_gate() -> bool {
    false
}

pub(crate) fn default_min_swipe_duration_ms() -> f64 {
    111.0
}

pub(crate) fn default_min_swipe_distance_px() -> f64 {
    20.0
}

pub(crate) fn default_transition_delay_ms() -> f64 {
    0.0
}

pub(crate) fn default_transition_duration_ms() -> f64 {
    400.0
}

pub(crate) fn default_transition_easing() -> Easing {
    Easing::Linear
}
