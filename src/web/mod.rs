//! Browser glue: DOM listeners, computed styles and the shell's invoke
//! function. Only built for wasm32.

mod invoke;
mod swipe;
mod transition;

pub use invoke::{INVOKE_GLOBAL, TauriInvoke};
pub use swipe::{DateClock, SwipeAction, swipe};
pub use transition::{apply_frame, pop_in};

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Resolve after `ms` milliseconds.
pub async fn sleep(ms: i32) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let mut scheduled = Ok(0);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    scheduled?;
    JsFuture::from(promise).await.map(|_| ())
}
