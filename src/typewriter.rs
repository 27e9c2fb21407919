//! Typewriter headline: types a phrase, holds it, deletes it, moves on. Forever.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::config::{DELETE_SPEED_MS, PAUSE_AT_EMPTY_MS, PAUSE_AT_FULL_MS, TYPE_SPEED_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    PausedAtFull,
    Deleting,
    PausedAtEmpty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_full_ms: u32,
    pub pause_empty_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            type_ms: TYPE_SPEED_MS,
            delete_ms: DELETE_SPEED_MS,
            pause_full_ms: PAUSE_AT_FULL_MS,
            pause_empty_ms: PAUSE_AT_EMPTY_MS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    texts: Vec<String>,
    timing: Timing,
    index: usize,
    shown: usize, // in chars, not bytes
    phase: Phase,
}

impl Typewriter {
    pub fn new<S: Into<String>>(texts: impl IntoIterator<Item = S>, timing: Timing) -> Self {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            timing,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn visible_text(&self) -> &str {
        match self.texts.get(self.index) {
            Some(text) => prefix(text, self.shown),
            None => "",
        }
    }

    /// Advance one step. Returns the delay in ms before the next call.
    pub fn tick(&mut self) -> u32 {
        let Some(len) = self.texts.get(self.index).map(|t| t.chars().count()) else {
            return self.timing.pause_full_ms;
        };
        match self.phase {
            Phase::Typing | Phase::PausedAtEmpty => {
                self.shown = (self.shown + 1).min(len);
                if self.shown >= len {
                    self.phase = Phase::PausedAtFull;
                    self.timing.pause_full_ms
                } else {
                    self.phase = Phase::Typing;
                    self.timing.type_ms
                }
            }
            Phase::PausedAtFull | Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phase = Phase::PausedAtEmpty;
                    self.index = (self.index + 1) % self.texts.len();
                    self.timing.pause_empty_ms
                } else {
                    self.phase = Phase::Deleting;
                    self.timing.delete_ms
                }
            }
        }
    }
}

fn prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Anything that can display a line of text.
pub trait TextSink {
    fn set_text(&self, text: &str);
}

impl TextSink for web_sys::Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

/// Drive `typewriter` on host timers, writing each frame into `sink`.
/// The first character appears immediately.
pub fn run<S: TextSink + 'static>(typewriter: Typewriter, sink: S) {
    let state = Rc::new(RefCell::new((typewriter, sink)));
    step(state);
}

fn step<S: TextSink + 'static>(state: Rc<RefCell<(Typewriter, S)>>) {
    let delay = {
        let mut guard = state.borrow_mut();
        let (tw, sink) = &mut *guard;
        let delay = tw.tick();
        sink.set_text(tw.visible_text());
        delay
    };
    Timeout::new(delay, move || step(state)).forget();
}
