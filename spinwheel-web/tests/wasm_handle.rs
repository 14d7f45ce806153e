#![cfg(target_arch = "wasm32")]

use spinwheel_web::handle::WheelHandle;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(id: &str) {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    let wheel = document.create_element("div").expect("create div");
    wheel.set_id(id);
    document
        .body()
        .expect("body")
        .append_child(&wheel)
        .expect("append wheel");
}

fn names(list: &[&str]) -> JsValue {
    serde_wasm_bindgen::to_value(list).expect("names to js")
}

#[wasm_bindgen_test]
fn missing_element_is_an_error() {
    assert!(WheelHandle::new("no-such-wheel", None).is_err());
}

#[wasm_bindgen_test]
fn empty_wheel_spin_returns_null() {
    mount("wheel-empty");
    let mut handle = WheelHandle::new("wheel-empty", None).expect("handle");
    assert!(handle.spin().expect("spin").is_null());
}

#[wasm_bindgen_test]
fn predetermined_winner_and_guard() {
    mount("wheel-guard");
    let mut handle = WheelHandle::new("wheel-guard", None).expect("handle");
    handle.set_names(names(&["A", "B", "C", "D"])).expect("names");
    handle
        .set_predetermined_order(names(&["C"]))
        .expect("order");
    let result = handle.spin().expect("spin");
    let payload: serde_json::Value = serde_wasm_bindgen::from_value(result).expect("payload");
    assert_eq!(payload["winner"], "C");
    assert_eq!(payload["slotIndex"], 2);
    assert!(handle.is_spinning());
    assert!(handle.spin().expect("spin").is_null());
    handle.finish_spin();
    assert!(!handle.is_spinning());
    assert!(handle.rotation() > 2160.0);
    handle.reset();
    assert!(handle.rotation().abs() < f64::EPSILON);
}

#[wasm_bindgen_test]
fn text_input_sets_slots() {
    mount("wheel-text");
    let mut handle = WheelHandle::new("wheel-text", None).expect("handle");
    handle.set_names_from_text("Ann\n\n  Bo \nCy");
    assert_eq!(handle.slot_count(), 3);
    assert!(handle.set_names(JsValue::from_f64(3.0)).is_err());
}
