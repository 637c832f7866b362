use crate::swipe::{
    Clock, PointerHost, SwipeBinding, SwipeConfig, SwipeEvent, SwipeRecognizer, ThresholdProvider,
};
use crate::types::Coords;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, EventTarget, HtmlElement, PointerEvent, Window};

type PointerClosure = Closure<dyn FnMut(PointerEvent)>;
type DomBinding = SwipeBinding<DomHost, DateClock>;

/// `Date.now()` in milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

struct DomHost {
    node: HtmlElement,
    window: Window,
    on_down: PointerClosure,
    on_move: PointerClosure,
    on_up: PointerClosure,
    on_cancel: PointerClosure,
}

fn add_listener(target: &EventTarget, kind: &str, closure: &PointerClosure) {
    if let Err(err) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
    {
        warn!(kind, ?err, "Failed to add pointer listener");
    }
}

fn remove_listener(target: &EventTarget, kind: &str, closure: &PointerClosure) {
    if let Err(err) =
        target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
    {
        warn!(kind, ?err, "Failed to remove pointer listener");
    }
}

impl PointerHost for DomHost {
    fn listen_node(&mut self) {
        add_listener(&self.node, "pointerdown", &self.on_down);
    }

    fn unlisten_node(&mut self) {
        remove_listener(&self.node, "pointerdown", &self.on_down);
    }

    fn listen_window(&mut self) {
        add_listener(&self.window, "pointermove", &self.on_move);
        add_listener(&self.window, "pointerup", &self.on_up);
        add_listener(&self.window, "pointercancel", &self.on_cancel);
    }

    fn unlisten_window(&mut self) {
        remove_listener(&self.window, "pointermove", &self.on_move);
        remove_listener(&self.window, "pointerup", &self.on_up);
        remove_listener(&self.window, "pointercancel", &self.on_cancel);
    }
}

fn client_coords(event: &PointerEvent) -> Coords {
    Coords::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn dispatch(node: &HtmlElement, event: &SwipeEvent) {
    let init = CustomEventInit::new();
    if let Some(detail) = event.detail_json() {
        match js_sys::JSON::parse(&detail) {
            Ok(value) => init.set_detail(&value),
            Err(err) => warn!(event = event.name(), ?err, "Failed to build event detail"),
        }
    }
    match CustomEvent::new_with_event_init_dict(event.name(), &init) {
        Ok(custom) => {
            let _ = node.dispatch_event(&custom);
        }
        Err(err) => warn!(event = event.name(), ?err, "Failed to create swipe event"),
    }
}

/// Run `step` against the binding and deliver its event once the borrow is
/// released, so listeners may destroy the action.
fn handle(
    binding: &Weak<RefCell<DomBinding>>,
    node: &HtmlElement,
    step: impl FnOnce(&mut DomBinding) -> Option<SwipeEvent>,
) {
    let Some(binding) = binding.upgrade() else {
        return;
    };
    let emitted = match binding.try_borrow_mut() {
        Ok(mut guard) => step(&mut guard),
        Err(_) => return,
    };
    if let Some(emitted) = emitted {
        dispatch(node, &emitted);
    }
}

fn down_handler(binding: Weak<RefCell<DomBinding>>, node: HtmlElement) -> PointerClosure {
    Closure::new(move |event: PointerEvent| {
        if !event.is_primary() || event.button() != 0 {
            return;
        }
        event.stop_immediate_propagation();
        event.stop_propagation();
        event.prevent_default();
        let at = client_coords(&event);
        handle(&binding, &node, |b| b.pointer_down(at));
    })
}

fn move_handler(binding: Weak<RefCell<DomBinding>>, node: HtmlElement) -> PointerClosure {
    Closure::new(move |event: PointerEvent| {
        if !event.is_primary() {
            return;
        }
        event.stop_immediate_propagation();
        event.stop_propagation();
        let at = client_coords(&event);
        handle(&binding, &node, |b| b.pointer_move(at));
    })
}

fn up_handler(binding: Weak<RefCell<DomBinding>>, node: HtmlElement) -> PointerClosure {
    Closure::new(move |event: PointerEvent| {
        if !event.is_primary() {
            return;
        }
        handle(&binding, &node, |b| b.pointer_up());
    })
}

fn cancel_handler(binding: Weak<RefCell<DomBinding>>, node: HtmlElement) -> PointerClosure {
    Closure::new(move |event: PointerEvent| {
        if !event.is_primary() {
            return;
        }
        handle(&binding, &node, |b| b.pointer_cancel());
    })
}

/// A swipe recognizer bound to one element.
///
/// Dispatches `swipeStart`, `swipeMove`, `swipeFailed` and `swipeEnd`
/// custom events on the element. Call [`SwipeAction::destroy`] or drop the
/// action to remove every listener it registered.
pub struct SwipeAction {
    binding: Rc<RefCell<DomBinding>>,
}

impl SwipeAction {
    pub fn destroy(&self) {
        if let Ok(mut binding) = self.binding.try_borrow_mut() {
            binding.detach();
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.binding
            .try_borrow()
            .map(|binding| binding.recognizer().is_tracking())
            .unwrap_or(false)
    }
}

impl Drop for SwipeAction {
    fn drop(&mut self) {
        self.destroy();
        // A handler of ours may be on the stack; free the closures on a later tick.
        let binding = Rc::clone(&self.binding);
        wasm_bindgen_futures::spawn_local(async move {
            drop(binding);
        });
    }
}

/// Attach a swipe recognizer to `node`.
pub fn swipe(
    node: &HtmlElement,
    threshold: impl ThresholdProvider + 'static,
    config: SwipeConfig,
) -> Result<SwipeAction, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let recognizer = SwipeRecognizer::new(threshold, DateClock, config);
    let binding = Rc::new_cyclic(|weak: &Weak<RefCell<DomBinding>>| {
        let host = DomHost {
            node: node.clone(),
            window,
            on_down: down_handler(weak.clone(), node.clone()),
            on_move: move_handler(weak.clone(), node.clone()),
            on_up: up_handler(weak.clone(), node.clone()),
            on_cancel: cancel_handler(weak.clone(), node.clone()),
        };
        RefCell::new(SwipeBinding::attach(host, recognizer))
    });
    Ok(SwipeAction { binding })
}
