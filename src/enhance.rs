//! Page-level niceties: lazy images, user preference hooks, skip link.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
};

use crate::dom;

/// Mark plain images `loading="lazy"` and swap in `data-src` images as they
/// scroll into view.
pub fn lazy_images(doc: &Document) -> Result<(), JsValue> {
    for img in dom::query_all(doc, "img")? {
        if !img.has_attribute("loading") {
            img.set_attribute("loading", "lazy")?;
        }
    }

    let deferred = dom::query_all(doc, "img[data-src]")?;
    if deferred.is_empty() {
        return Ok(());
    }
    let callback = Closure::wrap(Box::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let img = entry.target();
                if let Some(src) = img.get_attribute("data-src") {
                    img.set_attribute("src", &src).ok();
                    img.remove_attribute("data-src").ok();
                }
                observer.unobserve(&img);
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    for img in &deferred {
        observer.observe(img);
    }
    callback.forget();
    Ok(())
}

/// Honour reduced-motion and high-contrast preferences.
pub fn apply_preferences(doc: &Document) -> Result<(), JsValue> {
    let win = dom::window()?;
    let prefers = |query: &str| -> Result<bool, JsValue> {
        Ok(win.match_media(query)?.is_some_and(|m| m.matches()))
    };

    if prefers("(prefers-reduced-motion: reduce)")? {
        if let Some(root) = doc
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            dom::set_styles(
                &root,
                &[
                    ("--transition-fast", "0.01s"),
                    ("--transition-normal", "0.01s"),
                    ("--transition-slow", "0.01s"),
                ],
            )?;
        }
    }
    if prefers("(prefers-contrast: high)")? {
        if let Some(body) = doc.body() {
            dom::set_class(&body, "high-contrast", true)?;
        }
    }
    Ok(())
}

/// Keyboard "Skip to main content" link, visible only while focused.
pub fn skip_link(doc: &Document) -> Result<(), JsValue> {
    let Some(body) = doc.body() else {
        return Ok(());
    };
    let link: HtmlElement = doc.create_element("a")?.dyn_into()?;
    link.set_attribute("href", "#home")?;
    link.set_text_content(Some("Skip to main content"));
    link.set_class_name("skip-link");
    link.style().set_css_text(
        "position: absolute; top: -40px; left: 6px; background: var(--primary-purple); \
         color: white; padding: 8px; text-decoration: none; border-radius: 4px; \
         z-index: 10000; transition: top 0.3s;",
    );
    for (event, top) in [("focus", "6px"), ("blur", "-40px")] {
        let link_cb = link.clone();
        dom::listen(&link, event, move |_| {
            link_cb.style().set_property("top", top).ok();
        })?;
    }
    body.insert_before(&link, body.first_child().as_ref())?;
    Ok(())
}

pub fn attach(doc: &Document) -> Result<(), JsValue> {
    lazy_images(doc)?;
    apply_preferences(doc)?;
    skip_link(doc)
}
