//! Repeating-task state, the requestAnimationFrame loop and trailing-edge debounce.
//!
//! The state types (`RepeatingTask`, `Debouncer`) are plain values so tests can
//! step them without a browser; `FrameLoop` and `debounce` bind them to the host
//! event loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Paused,
    Cancelled,
}

/// Run state of a self-rescheduling task. Cancelled is terminal.
#[derive(Clone, Debug)]
pub struct RepeatingTask {
    state: TaskState,
    ticks: u64,
}

impl Default for RepeatingTask {
    fn default() -> Self {
        Self::new()
    }
}

impl RepeatingTask {
    pub fn new() -> Self {
        Self {
            state: TaskState::Running,
            ticks: 0,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pause(&mut self) {
        if self.state == TaskState::Running {
            self.state = TaskState::Paused;
        }
    }

    /// Returns true when the caller has to schedule the next tick again.
    pub fn resume(&mut self) -> bool {
        if self.state == TaskState::Paused {
            self.state = TaskState::Running;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.state = TaskState::Cancelled;
    }

    /// Account for a delivered tick; false means the tick must be dropped.
    pub fn begin_tick(&mut self) -> bool {
        if self.state == TaskState::Running {
            self.ticks += 1;
            true
        } else {
            false
        }
    }

    pub fn should_reschedule(&self) -> bool {
        self.state == TaskState::Running
    }
}

// --- Frame loop ----------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame chain with pause / resume / cancel.
///
/// `on_frame` receives the frame timestamp and returns whether the loop should
/// keep going. Dropping a handle does not stop the loop; call [`FrameLoop::cancel`].
#[derive(Clone)]
pub struct FrameLoop {
    task: Rc<RefCell<RepeatingTask>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn new<F>(mut on_frame: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let task = Rc::new(RefCell::new(RepeatingTask::new()));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let task_cb = task.clone();
        let pending_cb = pending.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            pending_cb.set(None);
            if !task_cb.borrow_mut().begin_tick() {
                return;
            }
            if !on_frame(ts) {
                task_cb.borrow_mut().cancel();
                return;
            }
            if task_cb.borrow().should_reschedule() {
                pending_cb.set(request_frame(&f));
            }
        }) as Box<dyn FnMut(f64)>));
        Self {
            task,
            pending,
            callback: g,
        }
    }

    pub fn start(&self) {
        if self.task.borrow().should_reschedule() && self.pending.get().is_none() {
            self.pending.set(request_frame(&self.callback));
        }
    }

    pub fn pause(&self) {
        self.task.borrow_mut().pause();
        self.cancel_pending();
    }

    pub fn resume(&self) {
        if self.task.borrow_mut().resume() {
            self.start();
        }
    }

    pub fn cancel(&self) {
        self.task.borrow_mut().cancel();
        self.cancel_pending();
    }

    pub fn state(&self) -> TaskState {
        self.task.borrow().state()
    }

    fn cancel_pending(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web_sys::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

fn request_frame(f: &FrameCallback) -> Option<i32> {
    let w = web_sys::window()?;
    let cb = f.borrow();
    let closure = cb.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}

// --- Debounce -----------------------------------------------------------------

/// Trailing-edge debounce bookkeeping. Every trigger supersedes the previous
/// one; only the timer belonging to the latest trigger may fire.
#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    generation: u64,
    fired: bool,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event; returns the token the scheduled timer must present.
    pub fn trigger(&mut self) -> u64 {
        self.generation += 1;
        self.fired = false;
        self.generation
    }

    /// True exactly once, for the latest trigger.
    pub fn fire(&mut self, token: u64) -> bool {
        if token == self.generation && !self.fired {
            self.fired = true;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.generation > 0 && !self.fired
    }
}

/// Wrap `action` so it runs once `wait_ms` after the last call.
pub fn debounce<F>(wait_ms: u32, action: F) -> impl FnMut()
where
    F: Fn() + 'static,
{
    let state = Rc::new(RefCell::new(Debouncer::new()));
    let action = Rc::new(action);
    let pending: RefCell<Option<Timeout>> = RefCell::new(None);
    move || {
        let token = state.borrow_mut().trigger();
        let state = state.clone();
        let action = action.clone();
        // replacing the handle drops (and clears) the superseded timeout
        *pending.borrow_mut() = Some(Timeout::new(wait_ms, move || {
            if state.borrow_mut().fire(token) {
                action();
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_pause_resume_cancel() {
        let mut task = RepeatingTask::new();
        assert!(task.begin_tick());
        task.pause();
        assert_eq!(task.state(), TaskState::Paused);
        assert!(!task.begin_tick());
        assert!(!task.should_reschedule());
        assert!(task.resume());
        assert!(!task.resume(), "resuming a running task is a no-op");
        assert!(task.begin_tick());
        assert_eq!(task.ticks(), 2);
        task.cancel();
        assert!(!task.resume());
        assert!(!task.begin_tick());
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[test]
    fn cancelled_task_cannot_be_paused_back_to_life() {
        let mut task = RepeatingTask::new();
        task.cancel();
        task.pause();
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[test]
    fn debounce_fires_only_for_last_trigger() {
        let mut d = Debouncer::new();
        assert!(!d.is_pending());
        let a = d.trigger();
        let b = d.trigger();
        let c = d.trigger();
        assert!(d.is_pending());
        assert!(!d.fire(a));
        assert!(!d.fire(b));
        assert!(d.fire(c));
        assert!(!d.fire(c), "a token fires at most once");
        assert!(!d.is_pending());
    }

    #[test]
    fn debounce_rearms_after_firing() {
        let mut d = Debouncer::new();
        let first = d.trigger();
        assert!(d.fire(first));
        let second = d.trigger();
        assert!(d.is_pending());
        assert!(d.fire(second));
    }
}
