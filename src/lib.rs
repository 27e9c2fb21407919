//! Folio core crate.
//!
//! Interactive layer of a single-page portfolio: loading screen, particle
//! background, typewriter headline, scroll reveals and counters, navigation,
//! project filter, EmailJS contact form and toast notifications. The page
//! calls `start_portfolio()` once its DOM is ready.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod app;
pub mod certs;
pub mod config;
pub mod contact;
pub mod dom;
pub mod enhance;
pub mod filter;
pub mod loading;
pub mod logging;
pub mod nav;
pub mod notify;
pub mod particles;
pub mod reveal;
pub mod rng;
pub mod schedule;
pub mod typewriter;

pub use app::App;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

enum Slot {
    Loading,
    Running(Rc<App>),
}

thread_local! {
    static APP: RefCell<Option<Slot>> = const { RefCell::new(None) };
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Show the loading screen, then bring up every component. Calling it again
/// while the page is loading or running does nothing.
#[wasm_bindgen]
pub fn start_portfolio() -> Result<(), JsValue> {
    let fresh = APP.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(Slot::Loading);
        true
    });
    if !fresh {
        log::warn!("start_portfolio called twice; ignoring");
        return Ok(());
    }

    app::install_error_handlers()?;
    loading::start(|| match App::start() {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(Slot::Running(app))),
        Err(err) => log::error!("portfolio failed to start: {err:?}"),
    })
}

/// Whether the components have been brought up.
#[wasm_bindgen]
pub fn portfolio_running() -> bool {
    APP.with(|slot| matches!(*slot.borrow(), Some(Slot::Running(_))))
}

/// Expand or collapse the full certification list (bound from the page's
/// inline `onclick`).
#[wasm_bindgen]
pub fn toggle_all_certifications() -> Result<(), JsValue> {
    certs::toggle().map(|_| ())
}
