//! Thin helpers over `web_sys` shared by the browser bindings.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlElement, NodeList, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// `performance.now()`, or 0 when unavailable.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn viewport_size() -> Result<(f64, f64), JsValue> {
    let win = window()?;
    let w = win.inner_width()?.as_f64().unwrap_or(0.0);
    let h = win.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((w, h))
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(doc.query_selector_all(selector)?))
}

pub fn query_one(doc: &Document, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(doc
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn by_id(doc: &Document, id: &str) -> Option<HtmlElement> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn set_styles(el: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = el.style();
    for (prop, value) in styles {
        style.set_property(prop, value)?;
    }
    Ok(())
}

pub fn set_class(el: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    let list = el.class_list();
    if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    }
}

/// Attach a listener for the page lifetime (the closure is leaked).
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
