//! Pop-in transition: fade from transparent while shrinking from 120% scale.
//!
//! The effect is a pure function of eased progress `t` once the baseline
//! opacity has been read from the element. The browser adapter reads that
//! baseline from the computed style; everything else happens here.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt::Write as _;

/// Extra scale at `t = 0`; shrinks linearly to nothing at `t = 1`.
pub const SCALE_SPAN: f64 = 0.2;
/// Sampling step used when turning the effect into keyframes.
pub const FRAME_MS: f64 = 16.0;
/// Upper bound on keyframe steps; about ten seconds at [`FRAME_MS`].
pub const MAX_KEYFRAME_STEPS: usize = 625;

/// Easing curves, matching the usual `svelte/easing` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => -t * (t - 2.0),
            Easing::QuadInOut => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t
                } else {
                    let t = t - 1.0;
                    -0.5 * (t * (t - 2.0) - 1.0)
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let f = t - 1.0;
                f * f * f + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    0.5 * (2.0 * t - 2.0).powi(3) + 1.0
                }
            }
            Easing::SineIn => {
                let v = (t * PI / 2.0).cos();
                if v.abs() < 1e-14 { 1.0 } else { 1.0 - v }
            }
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -0.5 * ((PI * t).cos() - 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms: 400.0,
            easing: Easing::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopIn {
    baseline_opacity: f64,
    config: TransitionConfig,
}

impl PopIn {
    pub fn new(baseline_opacity: f64, config: TransitionConfig) -> Self {
        Self {
            baseline_opacity,
            config,
        }
    }

    pub fn config(&self) -> TransitionConfig {
        self.config
    }

    pub fn baseline_opacity(&self) -> f64 {
        self.baseline_opacity
    }

    pub fn opacity(&self, t: f64) -> f64 {
        t * self.baseline_opacity
    }

    pub fn scale(&self, t: f64) -> f64 {
        // Same curve as 1.2 - 0.2t, written so both ends land exactly.
        1.0 + SCALE_SPAN * (1.0 - t)
    }

    /// Inline style for eased progress `t`.
    pub fn css(&self, t: f64) -> String {
        format!(
            "opacity: {}; transform: scale({});",
            self.opacity(t),
            self.scale(t)
        )
    }

    /// Eased progress after `elapsed_ms` since the transition was started.
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        let TransitionConfig {
            delay_ms,
            duration_ms,
            easing,
        } = self.config;
        let linear = if duration_ms <= 0.0 {
            if elapsed_ms >= delay_ms { 1.0 } else { 0.0 }
        } else {
            ((elapsed_ms - delay_ms) / duration_ms).clamp(0.0, 1.0)
        };
        easing.apply(linear)
    }

    pub fn css_at(&self, elapsed_ms: f64) -> String {
        self.css(self.progress_at(elapsed_ms))
    }

    /// Render the whole effect as a `@keyframes` rule, one step per frame.
    pub fn keyframes(&self, name: &str) -> String {
        let steps = keyframe_steps(self.config.duration_ms);
        let mut rule = format!("@keyframes {name} {{\n");
        for step in 0..=steps {
            let p = step as f64 / steps as f64;
            let t = self.config.easing.apply(p);
            let _ = writeln!(rule, "{}%{{{}}}", trim_percent(p * 100.0), self.css(t));
        }
        rule.push('}');
        rule
    }
}

fn keyframe_steps(duration_ms: f64) -> usize {
    let frames = (duration_ms / FRAME_MS).ceil();
    if frames.is_nan() || frames < 1.0 {
        1
    } else if frames >= MAX_KEYFRAME_STEPS as f64 {
        MAX_KEYFRAME_STEPS
    } else {
        frames as usize
    }
}

fn trim_percent(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

/// Numeric coercion of a CSS value the way JavaScript's unary `+` does it:
/// whitespace is trimmed, an empty string is zero and anything unparsable is
/// NaN.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust accepts "inf"/"nan" spellings that JavaScript rejects.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
