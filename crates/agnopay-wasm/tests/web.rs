//! Browser tests for the checkout widget.
//!
//! ```bash
//! wasm-pack test --headless --firefox crates/agnopay-wasm
//! ```

#![cfg(target_arch = "wasm32")]

use agnopay_wasm::create_checkout;
use js_sys::{Function, Object, Reflect};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, MessageEvent, MessageEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const WALLET_ORIGIN: &str = "https://agnowallet.vercel.app";

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount_point(id: &str) -> Element {
    let document = document();
    let element = document.create_element("div").unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

fn set(target: &Object, key: &str, value: &JsValue) {
    Reflect::set(target, &JsValue::from_str(key), value).unwrap();
}

fn options(order_id: &str, container: &str) -> Object {
    let options = Object::new();
    set(&options, "orderId", &order_id.into());
    set(&options, "container", &container.into());
    options
}

fn counter(count: Rc<Cell<u32>>) -> Function {
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| count.set(count.get() + 1));
    let function = callback.as_ref().unchecked_ref::<Function>().clone();
    callback.forget();
    function
}

fn post(origin: &str, message_type: &str) {
    let data = Object::new();
    set(&data, "type", &message_type.into());

    let init = MessageEventInit::new();
    init.set_origin(origin);
    init.set_data(&data);

    let event = MessageEvent::new_with_event_init_dict("message", &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn missing_container_throws() {
    let err = create_checkout(options("o1", "#nowhere").into())
        .err()
        .unwrap()
        .dyn_into::<js_sys::Error>()
        .unwrap();

    assert_eq!(
        String::from(err.message()),
        "Container element not found: #nowhere"
    );
}

#[wasm_bindgen_test]
fn renders_iframe_with_styled_src() {
    let container = mount_point("render-target");
    let opts = options("ord 1", "#render-target");
    let style = Object::new();
    set(&style, "transparent", &true.into());
    set(&style, "primaryColor", &"#10b981".into());
    set(&opts, "style", &style);

    let widget = create_checkout(opts.into()).unwrap();

    let iframe = container.query_selector("iframe").unwrap().unwrap();
    assert_eq!(
        iframe.get_attribute("src").unwrap(),
        "https://agnowallet.vercel.app/orders/ord%201?transparent=true&primaryColor=%2310b981"
    );
    assert_eq!(iframe.get_attribute("title").unwrap(), "AgnoPay Checkout");
    assert_eq!(iframe.get_attribute("allow").unwrap(), "payment");
    assert!(container.query_selector("h1").unwrap().is_some());

    drop(widget);
    assert!(container.query_selector("iframe").unwrap().is_none());
}

#[wasm_bindgen_test]
fn hide_header_omits_heading() {
    let container = mount_point("headless-target");
    let opts = options("o2", "#headless-target");
    set(&opts, "hideHeader", &true.into());

    let _widget = create_checkout(opts.into()).unwrap();

    assert!(container.query_selector("h1").unwrap().is_none());
    assert!(container.query_selector("iframe").unwrap().is_some());
}

#[wasm_bindgen_test]
fn success_only_from_wallet_origin() {
    mount_point("success-target");
    let successes = Rc::new(Cell::new(0));
    let opts = options("o3", "#success-target");
    set(&opts, "onSuccess", &counter(Rc::clone(&successes)));

    let _widget = create_checkout(opts.into()).unwrap();

    post("https://attacker.example", "agnopay:payment:success");
    assert_eq!(successes.get(), 0);

    post(WALLET_ORIGIN, "agnopay:payment:success");
    assert_eq!(successes.get(), 1);
}

#[wasm_bindgen_test]
fn error_message_reaches_on_error() {
    mount_point("error-target");
    let errors = Rc::new(Cell::new(0));
    let opts = options("o4", "#error-target");
    set(&opts, "onError", &counter(Rc::clone(&errors)));

    let _widget = create_checkout(opts.into()).unwrap();

    post(WALLET_ORIGIN, "agnopay:payment:error");
    post(WALLET_ORIGIN, "agnopay:something:else");
    assert_eq!(errors.get(), 1);
}

#[wasm_bindgen_test]
fn throwing_on_error_is_contained() {
    mount_point("throwing-target");
    let opts = options("o6", "#throwing-target");
    let throwing = Function::new_with_args(
        "err",
        "globalThis.agnopayThrowCount = (globalThis.agnopayThrowCount || 0) + 1; throw err;",
    );
    set(&opts, "onError", &throwing);

    let _widget = create_checkout(opts.into()).unwrap();

    post(WALLET_ORIGIN, "agnopay:payment:error");
    post(WALLET_ORIGIN, "agnopay:payment:error");

    let count = Reflect::get(&js_sys::global(), &"agnopayThrowCount".into()).unwrap();
    assert_eq!(count.as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn destroy_stops_callbacks() {
    let container = mount_point("destroy-target");
    let successes = Rc::new(Cell::new(0));
    let opts = options("o5", "#destroy-target");
    set(&opts, "onSuccess", &counter(Rc::clone(&successes)));

    let mut widget = create_checkout(opts.into()).unwrap();
    assert!(widget.is_active());

    widget.destroy();
    widget.destroy();
    assert!(!widget.is_active());
    assert!(container.first_child().is_none());

    post(WALLET_ORIGIN, "agnopay:payment:success");
    assert_eq!(successes.get(), 0);
}
