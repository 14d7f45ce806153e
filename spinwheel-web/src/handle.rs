//! JavaScript-facing wheel handle.
//!
//! ```js
//! const wheel = new WheelHandle("wheel");
//! wheel.setNames(["Ann", "Bo", "Cy"]);
//! const result = wheel.spin();           // null while a spin is in flight
//! setTimeout(() => wheel.finishSpin(), result.durationMs);
//! ```
use spinwheel_core::{Wheel, parse_names};
use wasm_bindgen::prelude::*;

use crate::bridge::{BridgeError, SpinPayload, resolve_config};
use crate::dom;
use crate::view::DomWheelView;

#[wasm_bindgen]
pub struct WheelHandle {
    wheel: Wheel<DomWheelView>,
}

#[wasm_bindgen]
impl WheelHandle {
    /// Bind to the element with `element_id`. `config_json` overrides the bundled config.
    ///
    /// # Errors
    /// Returns an error if the element is missing or the config is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, config_json: Option<String>) -> Result<WheelHandle, JsValue> {
        let cfg = resolve_config(config_json.as_deref())?;
        let element = dom::html_element_by_id(element_id)?;
        let wheel = Wheel::new(&cfg, dom::entropy_seed(), DomWheelView::new(element));
        Ok(Self { wheel })
    }

    /// # Errors
    /// Returns an error unless `names` is an array of strings.
    #[wasm_bindgen(js_name = setNames)]
    pub fn set_names(&mut self, names: JsValue) -> Result<(), JsValue> {
        let names = decode_names(names)?;
        self.wheel.set_names(names);
        Ok(())
    }

    /// One candidate per non-blank line.
    #[wasm_bindgen(js_name = setNamesFromText)]
    pub fn set_names_from_text(&mut self, text: &str) {
        self.wheel.set_names(parse_names(text));
    }

    /// # Errors
    /// Returns an error unless `order` is an array of strings.
    #[wasm_bindgen(js_name = setPredeterminedOrder)]
    pub fn set_predetermined_order(&mut self, order: JsValue) -> Result<(), JsValue> {
        let order = decode_names(order)?;
        self.wheel.set_predetermined_order(order);
        Ok(())
    }

    /// `{winner, slotIndex, color, durationMs, rotationDeg}`, or `null` when the
    /// wheel is empty or still spinning.
    ///
    /// # Errors
    /// Returns an error if the result cannot be converted to a JS object.
    pub fn spin(&mut self) -> Result<JsValue, JsValue> {
        let Some(outcome) = self.wheel.spin() else {
            return Ok(JsValue::NULL);
        };
        let payload = SpinPayload::new(outcome, self.wheel.rotation());
        serde_wasm_bindgen::to_value(&payload).map_err(Into::into)
    }

    #[wasm_bindgen(js_name = finishSpin)]
    pub fn finish_spin(&mut self) {
        self.wheel.finish_spin();
        self.wheel.view().settle();
    }

    pub fn reset(&mut self) {
        self.wheel.reset();
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.wheel.rotation()
    }

    #[must_use]
    #[wasm_bindgen(js_name = isSpinning)]
    pub fn is_spinning(&self) -> bool {
        self.wheel.is_spinning()
    }

    #[wasm_bindgen(js_name = slotCount)]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.wheel.engine().slot_count()
    }

    /// # Errors
    /// Returns an error if the palette cannot be converted to a JS array.
    pub fn colors(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.wheel.colors()).map_err(Into::into)
    }

    /// # Errors
    /// Returns an error if the palette cannot be converted to a JS array.
    #[wasm_bindgen(js_name = shuffledColors)]
    pub fn shuffled_colors(&mut self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.wheel.shuffled_colors()).map_err(Into::into)
    }
}

fn decode_names(value: JsValue) -> Result<Vec<String>, BridgeError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| BridgeError::Decode(err.to_string()))
}
