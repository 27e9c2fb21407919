//! "View all certifications" expand / collapse panel.

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::ScrollLogicalPosition;

use crate::config::CERT_SCROLL_DELAY_MS;
use crate::dom;
use crate::nav::smooth_scroll_into_view;

/// Button label and chevron icon classes for a panel state.
pub fn labels(expanded: bool) -> (&'static str, &'static str) {
    if expanded {
        ("Show Less", "fas fa-chevron-up expand-icon")
    } else {
        ("View All Certifications", "fas fa-chevron-down expand-icon")
    }
}

/// Flip the panel; returns the new expanded state.
pub fn toggle() -> Result<bool, JsValue> {
    let doc = dom::document()?;
    let panel = doc
        .get_element_by_id("allCertifications")
        .ok_or_else(|| JsValue::from_str("#allCertifications missing"))?;
    let expanded = !panel.class_list().contains("expanded");
    dom::set_class(&panel, "expanded", expanded)?;

    if let Some(button) = doc.query_selector(".cert-expand-btn")? {
        dom::set_class(&button, "expanded", expanded)?;
        let (text, icon) = labels(expanded);
        if let Some(label) = button.query_selector(".expand-text")? {
            label.set_text_content(Some(text));
        }
        if let Some(chevron) = button.query_selector(".expand-icon")? {
            chevron.set_class_name(icon);
        }
    }

    if expanded {
        Timeout::new(CERT_SCROLL_DELAY_MS, move || {
            smooth_scroll_into_view(&panel, ScrollLogicalPosition::Nearest);
        })
        .forget();
    }
    Ok(expanded)
}
