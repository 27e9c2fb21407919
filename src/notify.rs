//! Transient toast notifications.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::{NOTIFY_ENTER_DELAY_MS, NOTIFY_EXIT_MS, NOTIFY_VISIBLE_MS};
use crate::dom;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NotificationKind::Success => "#10b981",
            NotificationKind::Error => "#ef4444",
        }
    }
}

/// Where a toast is in its life, by time since creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Entering,
    Visible,
    Leaving,
    Removed,
}

pub fn stage_at(elapsed_ms: u32) -> Stage {
    if elapsed_ms < NOTIFY_ENTER_DELAY_MS {
        Stage::Entering
    } else if elapsed_ms < NOTIFY_VISIBLE_MS {
        Stage::Visible
    } else if elapsed_ms < NOTIFY_VISIBLE_MS + NOTIFY_EXIT_MS {
        Stage::Leaving
    } else {
        Stage::Removed
    }
}

fn stage_styles(stage: Stage) -> [(&'static str, &'static str); 2] {
    match stage {
        Stage::Visible => [("opacity", "1"), ("transform", "translateX(0)")],
        _ => [("opacity", "0"), ("transform", "translateX(100%)")],
    }
}

/// Show a toast. Each toast owns its own timers, so several can coexist.
pub fn show(kind: NotificationKind, text: &str) -> Result<(), JsValue> {
    let doc = dom::document()?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let toast: HtmlElement = doc.create_element("div")?.dyn_into()?;
    toast.set_class_name(&format!("notification {}", kind.class()));
    toast.set_text_content(Some(text));
    dom::set_styles(
        &toast,
        &[
            ("position", "fixed"),
            ("top", "20px"),
            ("right", "20px"),
            ("padding", "15px 20px"),
            ("border-radius", "8px"),
            ("color", "white"),
            ("background-color", kind.background()),
            ("box-shadow", "0 4px 6px rgba(0, 0, 0, 0.1)"),
            ("z-index", "10000"),
            ("transition", "all 0.3s ease"),
        ],
    )?;
    dom::set_styles(&toast, &stage_styles(Stage::Entering))?;
    body.append_child(&toast)?;

    {
        let toast = toast.clone();
        Timeout::new(NOTIFY_ENTER_DELAY_MS, move || {
            dom::set_styles(&toast, &stage_styles(Stage::Visible)).ok();
        })
        .forget();
    }
    Timeout::new(NOTIFY_VISIBLE_MS, move || {
        dom::set_styles(&toast, &stage_styles(Stage::Leaving)).ok();
        Timeout::new(NOTIFY_EXIT_MS, move || toast.remove()).forget();
    })
    .forget();
    Ok(())
}

/// Fire-and-forget variant for callers that cannot propagate.
pub fn show_or_log(kind: NotificationKind, text: &str) {
    if let Err(err) = show(kind, text) {
        log::error!("notification failed: {err:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_stages_in_order() {
        assert_eq!(stage_at(0), Stage::Entering);
        assert_eq!(stage_at(99), Stage::Entering);
        assert_eq!(stage_at(100), Stage::Visible);
        assert_eq!(stage_at(4999), Stage::Visible);
        assert_eq!(stage_at(5000), Stage::Leaving);
        assert_eq!(stage_at(5299), Stage::Leaving);
        assert_eq!(stage_at(5300), Stage::Removed);

        let mut last = Stage::Entering;
        for t in (0..6000).step_by(7) {
            let s = stage_at(t);
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn kinds_map_to_classes() {
        assert_eq!(NotificationKind::Success.class(), "success");
        assert_eq!(NotificationKind::Error.class(), "error");
        assert_ne!(
            NotificationKind::Success.background(),
            NotificationKind::Error.background()
        );
    }
}
