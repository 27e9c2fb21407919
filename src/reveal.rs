//! Scroll-triggered reveal animations and the statistics counters.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::{
    COUNTER_DURATION_MS, COUNTER_FRAME_MS, REVEAL_ROOT_MARGIN, REVEAL_SELECTORS, REVEAL_THRESHOLD,
    STAT_ITEM_CLASS,
};
use crate::dom;
use crate::schedule::FrameLoop;
use crate::typewriter::TextSink;

/// One-way reveal bookkeeping over a fixed set of targets.
#[derive(Clone, Debug)]
pub struct RevealTracker<T> {
    targets: Vec<T>,
    revealed: Vec<bool>,
}

impl<T: PartialEq> RevealTracker<T> {
    pub fn new(targets: Vec<T>) -> Self {
        let revealed = vec![false; targets.len()];
        Self { targets, revealed }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Feed an intersection change. Returns the target the first time it
    /// becomes visible; later changes (including leaving view) are ignored.
    pub fn observe(&mut self, target: &T, intersecting: bool) -> Option<&T> {
        if !intersecting {
            return None;
        }
        let idx = self.targets.iter().position(|t| t == target)?;
        if self.revealed[idx] {
            return None;
        }
        self.revealed[idx] = true;
        Some(&self.targets[idx])
    }

    pub fn is_revealed(&self, target: &T) -> bool {
        self.targets
            .iter()
            .position(|t| t == target)
            .is_some_and(|idx| self.revealed[idx])
    }
}

/// Counts from 0 up to `target` over ~2s of 16ms frames.
#[derive(Clone, Debug)]
pub struct Counter {
    target: i64,
    current: f64,
    step: f64,
    finished: bool,
}

impl Counter {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            current: 0.0,
            step: target as f64 / (COUNTER_DURATION_MS / COUNTER_FRAME_MS),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one frame and return the value to display.
    pub fn advance(&mut self) -> i64 {
        if self.finished {
            return self.target;
        }
        self.current += self.step;
        if self.current < self.target as f64 {
            self.current.floor() as i64
        } else {
            self.finished = true;
            self.target
        }
    }
}

/// Animate `counter` into `sink`, one step per animation frame.
pub fn animate_counter<S: TextSink + 'static>(mut counter: Counter, sink: S) -> FrameLoop {
    let frames = FrameLoop::new(move |_ts| {
        sink.set_text(&counter.advance().to_string());
        !counter.is_finished()
    });
    frames.start();
    frames
}

// --- Browser binding ---------------------------------------------------------

/// Observes every reveal target on the page. Keep it alive for the page lifetime.
pub struct RevealObserver {
    _observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn attach() -> Result<Self, JsValue> {
        let doc = dom::document()?;
        for counter in dom::query_all(&doc, ".stat-number")? {
            counter.set_text("0");
        }

        let mut targets = Vec::new();
        for selector in REVEAL_SELECTORS {
            targets.extend(dom::query_all(&doc, selector)?);
        }
        log::debug!("observing {} reveal targets", targets.len());
        let mut tracker = RevealTracker::new(targets.clone());

        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    if let Some(el) = tracker.observe(&target, entry.is_intersecting()) {
                        reveal(el);
                        observer.unobserve(el);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        init.set_root_margin(REVEAL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for el in &targets {
            observer.observe(el);
        }
        Ok(Self {
            _observer: observer,
            _callback: callback,
        })
    }
}

fn reveal(el: &Element) {
    dom::set_class(el, "animate", true).ok();
    if !el.class_list().contains(STAT_ITEM_CLASS) {
        return;
    }
    let Ok(Some(number)) = el.query_selector(".stat-number") else {
        return;
    };
    match number
        .get_attribute("data-target")
        .and_then(|t| t.trim().parse::<i64>().ok())
    {
        Some(target) => {
            animate_counter(Counter::new(target), number);
        }
        None => log::warn!("stat item without a numeric data-target"),
    }
}
