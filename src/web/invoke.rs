use crate::bridge::Invoke;
use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Window property under which the shell exposes its invoke function.
pub const INVOKE_GLOBAL: &str = "__TAURI_INVOKE__";

/// The shell's invoke function, looked up once and injected into
/// [`crate::bridge::Backend`].
pub struct TauriInvoke {
    window: web_sys::Window,
    function: js_sys::Function,
}

impl TauriInvoke {
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
        let function = js_sys::Reflect::get(&window, &JsValue::from_str(INVOKE_GLOBAL))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| JsValue::from_str("shell invoke function is not available"))?;
        Ok(Self { window, function })
    }
}

fn to_js(value: &Value) -> Result<JsValue, Value> {
    js_sys::JSON::parse(&value.to_string()).map_err(|err| js_to_json(&err))
}

/// Convert a JS value into JSON; non-serializable values become their
/// string form.
fn js_to_json(value: &JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|text| serde_json::from_str(&String::from(text)).ok())
        .unwrap_or_else(|| Value::String(format!("{value:?}")))
}

#[async_trait(?Send)]
impl Invoke for TauriInvoke {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, Value> {
        let args = to_js(&args)?;
        let pending = self
            .function
            .call2(&self.window, &JsValue::from_str(command), &args)
            .map_err(|err| js_to_json(&err))?;
        let promise = pending
            .dyn_into::<js_sys::Promise>()
            .map_err(|other| js_to_json(&other))?;
        match JsFuture::from(promise).await {
            Ok(result) => Ok(js_to_json(&result)),
            Err(err) => Err(js_to_json(&err)),
        }
    }
}
