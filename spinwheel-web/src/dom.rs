use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

use crate::bridge::BridgeError;

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns an error if executed outside of a browser context.
pub fn window() -> Result<Window, BridgeError> {
    web_sys::window().ok_or_else(|| BridgeError::Browser(String::from("`window` unavailable")))
}

/// Retrieve the document object for DOM interactions.
///
/// # Errors
/// Returns an error when the document cannot be accessed from the current window.
pub fn document() -> Result<Document, BridgeError> {
    window()?
        .document()
        .ok_or_else(|| BridgeError::Browser(String::from("`document` unavailable")))
}

/// Look up an element by id as an `HtmlElement`.
///
/// # Errors
/// Returns an error if no element with `id` exists.
pub fn html_element_by_id(id: &str) -> Result<HtmlElement, BridgeError> {
    document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| BridgeError::MissingElement(id.to_string()))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Seed material for a fresh wheel: `Math.random` mixed with the clock.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn entropy_seed() -> u64 {
    let random = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    let now = js_sys::Date::now() as u64;
    random ^ now.rotate_left(29)
}
