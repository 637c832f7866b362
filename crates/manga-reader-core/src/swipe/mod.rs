//! Horizontal swipe recognition.
//!
//! A [`SwipeRecognizer`] turns raw pointer samples into the small event
//! vocabulary the reader uses for page turns: `swipeStart`, `swipeMove`,
//! `swipeFailed` and `swipeEnd`. It does not touch the DOM; the handlers
//! return the event to dispatch and leave delivery to the caller, so a
//! listener is free to tear the recognizer down while handling it.
//!
//! [`SwipeBinding`] adds listener bookkeeping on top: the node listener lives
//! as long as the binding, the window move/up pair only while a gesture is
//! being tracked.

mod binding;
mod clock;

pub use binding::{PointerHost, SwipeBinding};
pub use clock::{Clock, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;

use crate::types::{Coords, Direction, SwipeEnd, SwipeMove};
use serde::Serialize;
use tracing::{debug, trace};

/// Gestures at or below this duration count as flicks.
pub const FLICK_WINDOW_MS: f64 = 250.0;

/// Supplies the pixel distance of a full swipe, read once per gesture end.
pub trait ThresholdProvider {
    fn threshold(&self) -> f64;
}

impl<F> ThresholdProvider for F
where
    F: Fn() -> f64,
{
    fn threshold(&self) -> f64 {
        self()
    }
}

/// Minimum duration and distance for a gesture to count at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidityGate {
    pub min_duration_ms: f64,
    pub min_distance_px: f64,
}

impl ValidityGate {
    pub fn accepts(&self, duration_ms: f64, accumulated: f64) -> bool {
        duration_ms >= self.min_duration_ms && accumulated.abs() >= self.min_distance_px
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub flick_window_ms: f64,
    /// Off by default: every release produces `swipeEnd`.
    pub validity_gate: Option<ValidityGate>,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            flick_window_ms: FLICK_WINDOW_MS,
            validity_gate: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEvent {
    Start(Coords),
    Move(SwipeMove),
    Failed,
    End(SwipeEnd),
}

impl SwipeEvent {
    pub const START: &'static str = "swipeStart";
    pub const MOVE: &'static str = "swipeMove";
    pub const FAILED: &'static str = "swipeFailed";
    pub const END: &'static str = "swipeEnd";
    pub const NAMES: [&'static str; 4] = [Self::START, Self::MOVE, Self::FAILED, Self::END];

    /// DOM event name.
    pub fn name(&self) -> &'static str {
        match self {
            SwipeEvent::Start(_) => Self::START,
            SwipeEvent::Move(_) => Self::MOVE,
            SwipeEvent::Failed => Self::FAILED,
            SwipeEvent::End(_) => Self::END,
        }
    }

    /// JSON `detail` of the DOM event; `swipeFailed` carries none.
    pub fn detail_json(&self) -> Option<String> {
        match self {
            SwipeEvent::Start(coords) => to_json(coords),
            SwipeEvent::Move(motion) => to_json(motion),
            SwipeEvent::Failed => None,
            SwipeEvent::End(end) => to_json(end),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

/// Direction of a finished gesture.
///
/// Slow drags must cover at least half the threshold, flicks only need any
/// net motion. Rounding is half-away-from-zero and a NaN ratio yields
/// [`Direction::None`].
pub fn classify(
    duration_ms: f64,
    accumulated: f64,
    flick_window_ms: f64,
    threshold: impl FnOnce() -> f64,
) -> Direction {
    if duration_ms > flick_window_ms {
        Direction::from_sign((accumulated / threshold()).round())
    } else {
        Direction::from_sign(accumulated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSession {
    origin: Coords,
    accumulated: f64,
    started_at_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Tracking(GestureSession),
    Detached,
}

pub struct SwipeRecognizer<C: Clock> {
    threshold: Box<dyn ThresholdProvider>,
    clock: C,
    config: SwipeConfig,
    state: State,
}

impl<C: Clock> SwipeRecognizer<C> {
    pub fn new(threshold: impl ThresholdProvider + 'static, clock: C, config: SwipeConfig) -> Self {
        Self {
            threshold: Box::new(threshold),
            clock,
            config,
            state: State::Idle,
        }
    }

    pub fn config(&self) -> SwipeConfig {
        self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.state, State::Tracking(_))
    }

    pub fn is_detached(&self) -> bool {
        matches!(self.state, State::Detached)
    }

    /// Net horizontal motion of the current gesture, if one is active.
    pub fn accumulated(&self) -> Option<f64> {
        match self.state {
            State::Tracking(session) => Some(session.accumulated),
            _ => None,
        }
    }

    /// Begin a gesture. A second press while tracking restarts the session.
    pub fn pointer_down(&mut self, at: Coords) -> Option<SwipeEvent> {
        if self.is_detached() {
            return None;
        }
        let started_at_ms = self.clock.now_ms();
        self.state = State::Tracking(GestureSession {
            origin: at,
            accumulated: 0.0,
            started_at_ms,
        });
        trace!(x = at.x, y = at.y, "swipe started");
        Some(SwipeEvent::Start(at))
    }

    pub fn pointer_move(&mut self, at: Coords) -> Option<SwipeEvent> {
        let State::Tracking(session) = &mut self.state else {
            return None;
        };
        let dx = at.x - session.origin.x;
        let dy = at.y - session.origin.y;
        session.origin = at;
        session.accumulated += dx;
        Some(SwipeEvent::Move(SwipeMove {
            x: at.x,
            y: at.y,
            dx,
            dy,
        }))
    }

    /// Finish the gesture and classify it.
    pub fn pointer_up(&mut self) -> Option<SwipeEvent> {
        let State::Tracking(session) = self.state else {
            return None;
        };
        self.state = State::Idle;

        let duration_ms = self.clock.now_ms() - session.started_at_ms;
        if let Some(gate) = self.config.validity_gate {
            if !gate.accepts(duration_ms, session.accumulated) {
                debug!(
                    duration_ms,
                    accumulated = session.accumulated,
                    "swipe rejected by validity gate"
                );
                return Some(SwipeEvent::Failed);
            }
        }

        let threshold = &self.threshold;
        let direction = classify(
            duration_ms,
            session.accumulated,
            self.config.flick_window_ms,
            || threshold.threshold(),
        );
        debug!(
            duration_ms,
            accumulated = session.accumulated,
            direction = direction.as_i8(),
            "swipe ended"
        );
        Some(SwipeEvent::End(SwipeEnd { direction }))
    }

    /// Stop reacting to input for good; any active gesture is dropped.
    pub fn detach(&mut self) {
        if self.is_tracking() {
            trace!("detaching mid-gesture");
        }
        self.state = State::Detached;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn recognizer(threshold: f64) -> SwipeRecognizer<ManualClock> {
        SwipeRecognizer::new(move || threshold, ManualClock::default(), SwipeConfig::default())
    }

    fn end_direction(event: Option<SwipeEvent>) -> Direction {
        match event {
            Some(SwipeEvent::End(end)) => end.direction,
            other => panic!("expected swipeEnd, got {other:?}"),
        }
    }

    #[test]
    fn full_gesture_emits_start_moves_end_in_order() {
        let mut swipe = recognizer(100.0);
        let mut names = Vec::new();
        names.extend(swipe.pointer_down(Coords::new(10.0, 10.0)).map(|e| e.name()));
        for step in 1..=3 {
            let at = Coords::new(10.0 + step as f64 * 5.0, 10.0);
            names.extend(swipe.pointer_move(at).map(|e| e.name()));
        }
        names.extend(swipe.pointer_up().map(|e| e.name()));
        assert_eq!(names, ["swipeStart", "swipeMove", "swipeMove", "swipeMove", "swipeEnd"]);

        assert!(swipe.pointer_move(Coords::new(0.0, 0.0)).is_none());
        assert!(swipe.pointer_up().is_none());
    }

    #[test]
    fn moves_report_deltas_and_accumulate_only_dx() {
        let mut swipe = recognizer(100.0);
        swipe.pointer_down(Coords::new(100.0, 50.0));
        let event = swipe.pointer_move(Coords::new(130.0, 10.0));
        assert_eq!(
            event,
            Some(SwipeEvent::Move(SwipeMove {
                x: 130.0,
                y: 10.0,
                dx: 30.0,
                dy: -40.0,
            }))
        );
        swipe.pointer_move(Coords::new(120.0, 200.0));
        swipe.pointer_move(Coords::new(125.5, -3.0));
        assert_eq!(swipe.accumulated(), Some(25.5));
    }

    #[test]
    fn flicks_count_any_net_motion() {
        for (dx, expected) in [
            (42.0, Direction::Right),
            (-5.0, Direction::Left),
            (0.0, Direction::None),
        ] {
            let mut swipe = recognizer(1000.0);
            swipe.pointer_down(Coords::new(0.0, 0.0));
            swipe.pointer_move(Coords::new(dx, 0.0));
            swipe.clock().advance(250.0);
            assert_eq!(end_direction(swipe.pointer_up()), expected, "dx={dx}");
        }
    }

    #[test]
    fn slow_drags_need_half_the_threshold() {
        for (dx, expected) in [
            (160.0, Direction::Right),
            (40.0, Direction::None),
            (-60.0, Direction::Left),
            (-49.0, Direction::None),
        ] {
            let mut swipe = recognizer(100.0);
            swipe.pointer_down(Coords::new(0.0, 0.0));
            swipe.pointer_move(Coords::new(dx, 0.0));
            swipe.clock().advance(251.0);
            assert_eq!(end_direction(swipe.pointer_up()), expected, "dx={dx}");
        }
    }

    #[test]
    fn half_threshold_rounds_away_from_zero() {
        assert_eq!(classify(400.0, 50.0, FLICK_WINDOW_MS, || 100.0), Direction::Right);
        assert_eq!(classify(400.0, -50.0, FLICK_WINDOW_MS, || 100.0), Direction::Left);
    }

    #[test]
    fn degenerate_thresholds_do_not_panic() {
        assert_eq!(classify(400.0, 0.0, FLICK_WINDOW_MS, || 0.0), Direction::None);
        assert_eq!(classify(400.0, 3.0, FLICK_WINDOW_MS, || 0.0), Direction::Right);
    }

    #[test]
    fn threshold_is_queried_per_slow_release_only() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut swipe = SwipeRecognizer::new(
            move || {
                counter.set(counter.get() + 1);
                100.0
            },
            ManualClock::default(),
            SwipeConfig::default(),
        );

        swipe.pointer_down(Coords::new(0.0, 0.0));
        swipe.pointer_up();
        assert_eq!(calls.get(), 0);

        for _ in 0..2 {
            swipe.pointer_down(Coords::new(0.0, 0.0));
            swipe.clock().advance(300.0);
            swipe.pointer_up();
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn move_without_session_is_ignored() {
        let mut swipe = recognizer(100.0);
        assert!(swipe.pointer_move(Coords::new(5.0, 5.0)).is_none());
        assert!(swipe.accumulated().is_none());
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn second_press_restarts_the_session() {
        let mut swipe = recognizer(100.0);
        swipe.pointer_down(Coords::new(0.0, 0.0));
        swipe.pointer_move(Coords::new(80.0, 0.0));
        swipe.clock().advance(500.0);
        let restarted = swipe.pointer_down(Coords::new(10.0, 0.0));
        assert_eq!(restarted, Some(SwipeEvent::Start(Coords::new(10.0, 0.0))));
        assert_eq!(swipe.accumulated(), Some(0.0));
        assert_eq!(end_direction(swipe.pointer_up()), Direction::None);
    }

    #[test]
    fn every_release_ends_without_a_gate() {
        let mut swipe = recognizer(100.0);
        swipe.pointer_down(Coords::new(0.0, 0.0));
        assert_eq!(end_direction(swipe.pointer_up()), Direction::None);
    }

    #[test]
    fn validity_gate_reports_failed_gestures() {
        let config = SwipeConfig {
            validity_gate: Some(ValidityGate {
                min_duration_ms: 111.0,
                min_distance_px: 20.0,
            }),
            ..SwipeConfig::default()
        };
        let mut swipe = SwipeRecognizer::new(|| 100.0, ManualClock::default(), config);

        swipe.pointer_down(Coords::new(0.0, 0.0));
        swipe.pointer_move(Coords::new(50.0, 0.0));
        swipe.clock().advance(60.0);
        assert_eq!(swipe.pointer_up(), Some(SwipeEvent::Failed));

        swipe.pointer_down(Coords::new(0.0, 0.0));
        swipe.pointer_move(Coords::new(-10.0, 0.0));
        swipe.clock().advance(200.0);
        assert_eq!(swipe.pointer_up(), Some(SwipeEvent::Failed));

        swipe.pointer_down(Coords::new(0.0, 0.0));
        swipe.pointer_move(Coords::new(-30.0, 0.0));
        swipe.clock().advance(200.0);
        assert_eq!(end_direction(swipe.pointer_up()), Direction::Left);
    }

    #[test]
    fn detach_silences_all_input() {
        let mut swipe = recognizer(100.0);
        swipe.pointer_down(Coords::new(0.0, 0.0));
        swipe.detach();
        assert!(swipe.is_detached());
        assert!(swipe.pointer_move(Coords::new(20.0, 0.0)).is_none());
        assert!(swipe.pointer_up().is_none());
        assert!(swipe.pointer_down(Coords::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn event_details_match_markup_payloads() {
        let start = SwipeEvent::Start(Coords::new(1.0, 2.5));
        assert_eq!(start.detail_json().as_deref(), Some(r#"{"x":1.0,"y":2.5}"#));

        let end = SwipeEvent::End(SwipeEnd {
            direction: Direction::Right,
        });
        assert_eq!(end.name(), "swipeEnd");
        assert_eq!(end.detail_json().as_deref(), Some(r#"{"direction":1}"#));

        assert_eq!(SwipeEvent::Failed.detail_json(), None);
        assert_eq!(SwipeEvent::NAMES[2], "swipeFailed");
    }
}
