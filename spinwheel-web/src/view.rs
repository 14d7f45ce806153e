//! DOM-backed render observer.
use spinwheel_core::{WheelLayout, WheelView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::css;
use crate::dom;

/// Paints the wheel element with a conic gradient and absolutely placed labels.
pub struct DomWheelView {
    element: HtmlElement,
}

impl DomWheelView {
    #[must_use]
    pub const fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// Drop the spinning class once the animation has finished.
    pub fn settle(&self) {
        if let Err(err) = self.element.class_list().remove_1(css::SPINNING_CLASS) {
            report("settle", &err);
        }
    }

    fn try_render(&self, layout: &WheelLayout) -> Result<(), JsValue> {
        self.element.set_inner_html("");
        let style = self.element.style();
        style.set_property("background", &css::conic_gradient(layout))?;

        let radius = f64::from(self.element.offset_width()) / 2.0;
        let Some(metrics) = layout.label_metrics(radius) else {
            return Ok(());
        };
        let document = self
            .element
            .owner_document()
            .ok_or_else(|| JsValue::from_str("wheel element is detached"))?;
        for segment in &layout.segments {
            let label = document
                .create_element("span")?
                .dyn_into::<HtmlElement>()?;
            label.set_class_name(css::LABEL_CLASS);
            label.set_inner_text(&segment.name);
            let label_style = label.style();
            label_style.set_property("font-size", &format!("{}px", metrics.font_size_px))?;
            label_style.set_property("max-width", &format!("{}px", metrics.max_width_px))?;
            label_style.set_property(
                "transform",
                &css::label_transform(segment.label_angle_deg, &metrics),
            )?;
            self.element.append_child(&label)?;
        }
        Ok(())
    }

    fn try_rotate(&self, rotation_deg: f64, duration_ms: u32) -> Result<(), JsValue> {
        let style = self.element.style();
        if duration_ms > 0 {
            self.element.class_list().add_1(css::SPINNING_CLASS)?;
            style.set_property("animation", "none")?;
            // Force a reflow so the transition starts from the current transform.
            let _ = self.element.offset_height();
        } else {
            self.element.class_list().remove_1(css::SPINNING_CLASS)?;
        }
        style.set_property("transition", &css::spin_transition(duration_ms))?;
        style.set_property("transform", &css::rotate_transform(rotation_deg))?;
        Ok(())
    }
}

impl WheelView for DomWheelView {
    fn render(&mut self, layout: &WheelLayout) {
        if let Err(err) = self.try_render(layout) {
            report("render", &err);
        }
    }

    fn rotate_to(&mut self, rotation_deg: f64, duration_ms: u32) {
        if let Err(err) = self.try_rotate(rotation_deg, duration_ms) {
            report("rotate", &err);
        }
    }
}

fn report(stage: &str, err: &JsValue) {
    log::error!("wheel {stage} failed: {}", dom::js_error_message(err));
}
