use crate::transition::{PopIn, TransitionConfig, coerce_number};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement};

/// Pop-in effect for `node`, using its current computed opacity as the
/// fully-faded-in value. An unreadable opacity yields NaN.
pub fn pop_in(node: &Element, config: TransitionConfig) -> PopIn {
    let baseline = web_sys::window()
        .and_then(|window| window.get_computed_style(node).ok().flatten())
        .and_then(|style| style.get_property_value("opacity").ok())
        .map(|value| coerce_number(&value))
        .unwrap_or(f64::NAN);
    PopIn::new(baseline, config)
}

/// Write the frame for eased progress `t` into the element's inline style.
pub fn apply_frame(node: &HtmlElement, effect: &PopIn, t: f64) -> Result<(), JsValue> {
    let style = node.style();
    let css = effect.css(t);
    for declaration in css.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        style.set_property(property.trim(), value.trim())?;
    }
    Ok(())
}
