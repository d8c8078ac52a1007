//! # Checkout widget
//!
//! Mounts the hosted checkout into a container element and relays the
//! wallet's `postMessage` notifications to JavaScript callbacks.
//!
//! ```javascript
//! const widget = createCheckout({
//!   orderId: order.uuid,
//!   container: '#checkout',
//!   style: { primaryColor: '#10b981' },
//!   onSuccess: (orderId) => console.log('paid', orderId),
//!   onError: (err) => console.error(err.message),
//! });
//!
//! // later
//! widget.destroy();
//! ```

use agnopay_core::{
    AgnoPayError, CheckoutFrame, CheckoutListener, CheckoutOptions, CheckoutOutcome,
    IframeStyle, OriginMatcher, OriginPolicy, SdkConfig, StyleDecls, CHECKOUT_ALLOW,
    CHECKOUT_IFRAME_TITLE, CHECKOUT_SANDBOX,
};
use js_sys::{Function, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlElement, MessageEvent, Window};

type MessageHandler = Closure<dyn FnMut(MessageEvent)>;

/// Where to mount the checkout
enum ContainerRef {
    Selector(String),
    Element(Element),
}

/// Parsed `createCheckout` options
struct WidgetOptions {
    checkout: CheckoutOptions,
    container: ContainerRef,
    wallet_url: Option<String>,
    origin_policy: OriginPolicy,
    on_success: Option<Function>,
    on_error: Option<Function>,
}

/// Parse the `originPolicy` option; absent means exact matching
pub fn parse_origin_policy(value: Option<&str>) -> Result<OriginPolicy, AgnoPayError> {
    value
        .map(str::parse::<OriginPolicy>)
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Render the embed into `options.container` and start listening for
/// checkout messages.
///
/// Throws `Container element not found: <selector>` when the selector
/// matches nothing.
#[wasm_bindgen(js_name = createCheckout)]
pub fn create_checkout(options: JsValue) -> Result<CheckoutWidget, JsValue> {
    let options = parse_options(&options)?;

    let window = web_sys::window().ok_or_else(|| js_error("createCheckout requires a window"))?;
    let document = window
        .document()
        .ok_or_else(|| js_error("createCheckout requires a document"))?;

    let container = resolve_container(&document, options.container)?;

    let sdk = match options.wallet_url {
        Some(url) => SdkConfig::default().with_wallet_url(url),
        None => SdkConfig::default(),
    };

    let frame = CheckoutFrame::new(&sdk, &options.checkout).map_err(|e| js_error(&e.to_string()))?;
    let matcher =
        OriginMatcher::new(&sdk.wallet_url, options.origin_policy).map_err(|e| js_error(&e.to_string()))?;

    let wrapper = build_tree(&document, &frame)?;

    let listener = Rc::new(CheckoutListener::new(frame.order_id.clone(), matcher));
    let handler = message_handler(Rc::clone(&listener), options.on_success, options.on_error);

    window.add_event_listener_with_callback("message", handler.as_ref().unchecked_ref())?;
    container.append_child(&wrapper)?;

    Ok(CheckoutWidget {
        window,
        container,
        wrapper,
        handler: Some(handler),
        listener,
    })
}

/// A mounted checkout. Dropping it (or calling `destroy`) removes the
/// message listener and the rendered elements.
#[wasm_bindgen]
pub struct CheckoutWidget {
    window: Window,
    container: Element,
    wrapper: HtmlElement,
    handler: Option<MessageHandler>,
    listener: Rc<CheckoutListener>,
}

#[wasm_bindgen]
impl CheckoutWidget {
    /// Unmount the checkout. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.teardown();
    }

    #[wasm_bindgen(getter, js_name = orderId)]
    pub fn order_id(&self) -> String {
        self.listener.order_id().to_string()
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.listener.is_listening()
    }
}

impl CheckoutWidget {
    fn teardown(&mut self) {
        if !self.listener.teardown() {
            return;
        }

        if let Some(handler) = self.handler.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("message", handler.as_ref().unchecked_ref())
            {
                console::warn_2(&"Failed to remove checkout listener:".into(), &e);
            }
        }

        if self.wrapper.parent_node().is_some() {
            if let Err(e) = self.container.remove_child(&self.wrapper) {
                console::warn_2(&"Failed to remove checkout elements:".into(), &e);
            }
        }
    }
}

impl Drop for CheckoutWidget {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn parse_options(options: &JsValue) -> Result<WidgetOptions, JsValue> {
    if !options.is_object() {
        return Err(js_error("createCheckout options must be an object"));
    }

    let order_id = get(options, "orderId")?
        .as_string()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| js_error("orderId is required"))?;

    let container = get(options, "container")?;
    let container = match container.as_string() {
        Some(selector) => ContainerRef::Selector(selector),
        None => ContainerRef::Element(
            container
                .dyn_into::<Element>()
                .map_err(|_| js_error("container must be a CSS selector or an element"))?,
        ),
    };

    let mut checkout = CheckoutOptions::new(order_id)
        .with_hide_header(get(options, "hideHeader")?.as_bool().unwrap_or(false));

    if let Some(title) = get(options, "title")?.as_string() {
        checkout = checkout.with_title(title);
    }

    let style = get(options, "style")?;
    if !style.is_undefined() && !style.is_null() {
        let style: IframeStyle = serde_wasm_bindgen::from_value(style)
            .map_err(|e| js_error(&format!("Invalid checkout style: {}", e)))?;
        checkout = checkout.with_style(style);
    }

    let origin_policy = parse_origin_policy(get(options, "originPolicy")?.as_string().as_deref())
        .map_err(|e| js_error(&e.to_string()))?;

    Ok(WidgetOptions {
        checkout,
        container,
        wallet_url: get(options, "walletUrl")?.as_string(),
        origin_policy,
        on_success: get(options, "onSuccess")?.dyn_into::<Function>().ok(),
        on_error: get(options, "onError")?.dyn_into::<Function>().ok(),
    })
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn resolve_container(document: &Document, container: ContainerRef) -> Result<Element, JsValue> {
    match container {
        ContainerRef::Element(element) => Ok(element),
        ContainerRef::Selector(selector) => document
            .query_selector(&selector)?
            .ok_or_else(|| js_error(&AgnoPayError::ContainerNotFound { selector }.to_string())),
    }
}

fn styled(document: &Document, tag: &str, decls: &StyleDecls) -> Result<HtmlElement, JsValue> {
    let element = document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;

    let style = element.style();
    for (property, value) in decls {
        style.set_property(property, value)?;
    }

    Ok(element)
}

fn build_tree(document: &Document, frame: &CheckoutFrame) -> Result<HtmlElement, JsValue> {
    let layout = &frame.layout;

    let wrapper = styled(document, "div", &layout.wrapper)?;
    let card = styled(document, "div", &layout.card)?;

    if let Some(header) = &layout.header {
        let block = styled(document, "div", &header.header)?;
        let heading = styled(document, "h1", &header.heading)?;
        heading.set_text_content(Some(&header.title));
        block.append_child(&heading)?;
        card.append_child(&block)?;
    }

    let frame_container = styled(document, "div", &layout.frame_container)?;
    let iframe = styled(document, "iframe", &layout.frame)?;
    iframe.set_attribute("src", frame.src.as_str())?;
    iframe.set_attribute("title", CHECKOUT_IFRAME_TITLE)?;
    iframe.set_attribute("sandbox", CHECKOUT_SANDBOX)?;
    iframe.set_attribute("allow", CHECKOUT_ALLOW)?;

    frame_container.append_child(&iframe)?;
    card.append_child(&frame_container)?;
    wrapper.append_child(&card)?;

    Ok(wrapper)
}

fn message_handler(
    listener: Rc<CheckoutListener>,
    on_success: Option<Function>,
    on_error: Option<Function>,
) -> MessageHandler {
    Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let origin = event.origin();
        if !listener.accepts(&origin) {
            return;
        }

        let data: serde_json::Value = match serde_wasm_bindgen::from_value(event.data()) {
            Ok(data) => data,
            Err(e) => {
                console::error_2(&"Error handling message from iframe:".into(), &e.into());
                return;
            }
        };

        match listener.classify(&origin, &data) {
            Some(CheckoutOutcome::Succeeded { order_id }) => {
                invoke(on_success.as_ref(), &JsValue::from_str(&order_id));
            }
            Some(CheckoutOutcome::Failed { message }) => {
                invoke(on_error.as_ref(), &js_sys::Error::new(&message).into());
            }
            None => {}
        }
    })
}

fn invoke(callback: Option<&Function>, arg: &JsValue) {
    if let Some(callback) = callback {
        if let Err(e) = callback.call1(&JsValue::NULL, arg) {
            console::error_2(&"Error handling message from iframe:".into(), &e);
        }
    }
}
