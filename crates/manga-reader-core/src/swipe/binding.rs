use super::{Clock, SwipeEvent, SwipeRecognizer};
use crate::types::Coords;
use tracing::trace;

/// Whatever owns the real listener registrations.
///
/// The node listener (pointer-down) is registered for the binding's whole
/// lifetime. The window pair (pointer-move, plus pointer-up and
/// pointer-cancel) is registered only while a gesture is being tracked, so
/// drags that leave the node keep being followed.
pub trait PointerHost {
    fn listen_node(&mut self);
    fn unlisten_node(&mut self);
    fn listen_window(&mut self);
    fn unlisten_window(&mut self);
}

/// A recognizer attached to a host.
///
/// The window pair is released at the end of every gesture or at detach,
/// whichever comes first. Dropping the binding detaches it.
pub struct SwipeBinding<H: PointerHost, C: Clock> {
    host: H,
    recognizer: SwipeRecognizer<C>,
    window_held: bool,
    attached: bool,
}

impl<H: PointerHost, C: Clock> SwipeBinding<H, C> {
    pub fn attach(mut host: H, recognizer: SwipeRecognizer<C>) -> Self {
        host.listen_node();
        Self {
            host,
            recognizer,
            window_held: false,
            attached: true,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn recognizer(&self) -> &SwipeRecognizer<C> {
        &self.recognizer
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn holds_window_listeners(&self) -> bool {
        self.window_held
    }

    pub fn pointer_down(&mut self, at: Coords) -> Option<SwipeEvent> {
        let event = self.recognizer.pointer_down(at)?;
        if !self.window_held {
            self.host.listen_window();
            self.window_held = true;
        }
        Some(event)
    }

    pub fn pointer_move(&mut self, at: Coords) -> Option<SwipeEvent> {
        self.recognizer.pointer_move(at)
    }

    pub fn pointer_up(&mut self) -> Option<SwipeEvent> {
        self.release_window();
        self.recognizer.pointer_up()
    }

    /// The platform took the pointer away (a touch pan, for one). Closes the
    /// gesture exactly like a release.
    pub fn pointer_cancel(&mut self) -> Option<SwipeEvent> {
        trace!("pointer cancelled mid-gesture");
        self.pointer_up()
    }

    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.release_window();
        self.host.unlisten_node();
        self.recognizer.detach();
        self.attached = false;
        trace!("swipe binding detached");
    }

    fn release_window(&mut self) {
        if self.window_held {
            self.host.unlisten_window();
            self.window_held = false;
        }
    }
}

impl<H: PointerHost, C: Clock> Drop for SwipeBinding<H, C> {
    fn drop(&mut self) {
        self.detach();
    }
}
