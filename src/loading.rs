//! Loading screen: fake progress to 100%, fade out, then hand off to the app.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::config::{
    LOADING_DURATION_MS, LOADING_FADE_DELAY_MS, LOADING_JITTER, LOADING_REMOVE_DELAY_MS,
    LOADING_TICK_MS,
};
use crate::dom;
use crate::rng::{Lcg, RandomSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingTick {
    Advanced,
    Completed,
    /// Tick arrived after completion; nothing changed.
    Idle,
}

/// Progress counter in [0, 100]; never decreases, completes once, hands off once.
#[derive(Clone, Debug)]
pub struct LoadingProgress {
    progress: f64,
    step: f64,
    jitter: f64,
    completed: bool,
    handed_off: bool,
}

impl Default for LoadingProgress {
    fn default() -> Self {
        Self::new(
            100.0 / (LOADING_DURATION_MS / LOADING_TICK_MS as f64),
            LOADING_JITTER,
        )
    }
}

impl LoadingProgress {
    pub fn new(step: f64, jitter: f64) -> Self {
        Self {
            progress: 0.0,
            step: step.max(0.0),
            jitter: jitter.max(0.0),
            completed: false,
            handed_off: false,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn tick(&mut self, rng: &mut impl RandomSource) -> LoadingTick {
        if self.completed {
            return LoadingTick::Idle;
        }
        self.progress += self.step + rng.next_f64() * self.jitter;
        if self.progress >= 100.0 {
            self.progress = 100.0;
            self.completed = true;
            LoadingTick::Completed
        } else {
            LoadingTick::Advanced
        }
    }

    /// True the first time it is called after completion, false ever after.
    pub fn take_handoff(&mut self) -> bool {
        if self.completed && !self.handed_off {
            self.handed_off = true;
            true
        } else {
            false
        }
    }

    pub fn bar_width(&self) -> String {
        format!("{}%", self.progress)
    }

    pub fn percent_label(&self) -> String {
        format!("{}%", self.progress.round() as u32)
    }
}

// --- Browser binding ---------------------------------------------------------

struct LoadingScreen {
    screen: HtmlElement,
    bar: Option<HtmlElement>,
    label: Option<HtmlElement>,
    progress: LoadingProgress,
    rng: Lcg,
    ticker: Option<Interval>,
    on_ready: Option<Box<dyn FnOnce()>>,
}

impl LoadingScreen {
    fn paint(&self) {
        if let Some(bar) = &self.bar {
            bar.style().set_property("width", &self.progress.bar_width()).ok();
        }
        if let Some(label) = &self.label {
            label.set_text_content(Some(&self.progress.percent_label()));
        }
    }
}

/// Run the loading sequence, then call `on_ready` exactly once.
/// Without a `#loading-screen` element the hand-off happens immediately.
pub fn start<F: FnOnce() + 'static>(on_ready: F) -> Result<(), JsValue> {
    let doc = dom::document()?;
    let Some(screen) = dom::by_id(&doc, "loading-screen") else {
        log::warn!("#loading-screen missing; starting without a loading sequence");
        on_ready();
        return Ok(());
    };
    let state = Rc::new(RefCell::new(LoadingScreen {
        screen,
        bar: dom::query_one(&doc, ".loading-progress")?,
        label: dom::query_one(&doc, ".loading-percentage")?,
        progress: LoadingProgress::default(),
        rng: Lcg::from_entropy(),
        ticker: None,
        on_ready: Some(Box::new(on_ready)),
    }));

    let ticker = {
        let state = state.clone();
        Interval::new(LOADING_TICK_MS, move || on_tick(&state))
    };
    state.borrow_mut().ticker = Some(ticker);
    Ok(())
}

fn on_tick(state: &Rc<RefCell<LoadingScreen>>) {
    let outcome = {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        let outcome = s.progress.tick(&mut s.rng);
        if outcome != LoadingTick::Idle {
            s.paint();
        }
        outcome
    };
    if outcome != LoadingTick::Completed {
        return;
    }
    // dropping the interval clears it and releases the cycle through `state`
    let ticker = state.borrow_mut().ticker.take();
    drop(ticker);
    log::debug!("loading complete");

    let state = state.clone();
    Timeout::new(LOADING_FADE_DELAY_MS, move || {
        dom::set_styles(
            &state.borrow().screen,
            &[("opacity", "0"), ("visibility", "hidden")],
        )
        .ok();
        Timeout::new(LOADING_REMOVE_DELAY_MS, move || finish(&state)).forget();
    })
    .forget();
}

fn finish(state: &Rc<RefCell<LoadingScreen>>) {
    let on_ready = {
        let mut s = state.borrow_mut();
        s.screen.style().set_property("display", "none").ok();
        if s.progress.take_handoff() {
            s.on_ready.take()
        } else {
            None
        }
    };
    if let Some(on_ready) = on_ready {
        on_ready();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn default_step_matches_duration() {
        let p = LoadingProgress::default();
        assert!((p.step - 2.0).abs() < 1e-12);
    }

    #[test]
    fn progress_is_monotonic_and_clamped() {
        let mut rng = Lcg::new(1234);
        let mut p = LoadingProgress::default();
        let mut last = 0.0;
        let mut ticks = 0;
        while !p.is_complete() {
            p.tick(&mut rng);
            assert!(p.progress() >= last);
            assert!(p.progress() <= 100.0);
            last = p.progress();
            ticks += 1;
            assert!(ticks <= 50, "base step alone finishes in 50 ticks");
        }
        assert_eq!(p.progress(), 100.0);
    }

    #[test]
    fn completes_exactly_at_hundred_when_overshooting() {
        let mut p = LoadingProgress::new(30.0, 0.0);
        let mut rng = Fixed(0.0);
        assert_eq!(p.tick(&mut rng), LoadingTick::Advanced);
        assert_eq!(p.tick(&mut rng), LoadingTick::Advanced);
        assert_eq!(p.tick(&mut rng), LoadingTick::Advanced);
        assert_eq!(p.tick(&mut rng), LoadingTick::Completed);
        assert_eq!(p.progress(), 100.0);
        assert_eq!(p.percent_label(), "100%");
    }

    #[test]
    fn extra_ticks_after_completion_are_idle() {
        let mut p = LoadingProgress::new(60.0, 0.0);
        let mut rng = Fixed(0.5);
        p.tick(&mut rng);
        assert_eq!(p.tick(&mut rng), LoadingTick::Completed);
        for _ in 0..5 {
            assert_eq!(p.tick(&mut rng), LoadingTick::Idle);
            assert_eq!(p.progress(), 100.0);
        }
    }

    #[test]
    fn hands_off_exactly_once() {
        let mut p = LoadingProgress::new(50.0, 0.0);
        let mut rng = Fixed(0.0);
        assert!(!p.take_handoff(), "not before completion");
        p.tick(&mut rng);
        p.tick(&mut rng);
        assert!(p.take_handoff());
        assert!(!p.take_handoff());
        p.tick(&mut rng);
        assert!(!p.take_handoff());
    }

    #[test]
    fn labels_round_percentage() {
        let mut p = LoadingProgress::new(12.6, 0.0);
        p.tick(&mut Fixed(0.0));
        assert_eq!(p.percent_label(), "13%");
        assert_eq!(p.bar_width(), "12.6%");
    }
}
