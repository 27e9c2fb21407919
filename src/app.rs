//! Page bootstrap: builds every component once the loading screen hands off,
//! then wires the window-level listeners that coordinate them.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{ErrorEvent, HtmlCanvasElement, PromiseRejectionEvent};

use crate::config::{self, RESIZE_DEBOUNCE_MS, TYPEWRITER_TEXTS};
use crate::contact::{self, BrowserContactForm};
use crate::dom;
use crate::enhance;
use crate::filter::ProjectFilter;
use crate::nav::{self, Navigation};
use crate::notify::{self, NotificationKind};
use crate::particles::ParticleCanvas;
use crate::reveal::RevealObserver;
use crate::rng::Lcg;
use crate::schedule::debounce;
use crate::typewriter::{self, Timing, Typewriter};

pub const MSG_CV_DOWNLOADED: &str = "CV downloaded successfully!";

/// Handles to the live components. Anything missing from the page is `None`.
pub struct App {
    pub particles: Option<ParticleCanvas>,
    pub navigation: Option<Rc<Navigation>>,
    pub reveal: Option<RevealObserver>,
    pub filter: Option<Rc<ProjectFilter>>,
    pub contact: Option<Rc<BrowserContactForm>>,
}

/// Run one component constructor; a failure is logged and the page carries on.
fn mount<T>(name: &str, build: impl FnOnce() -> Result<T, JsValue>) -> Option<T> {
    match build() {
        Ok(component) => {
            log::debug!("{name} ready");
            Some(component)
        }
        Err(err) => {
            log::error!("{name} failed to start: {err:?}");
            None
        }
    }
}

impl App {
    pub fn start() -> Result<Rc<Self>, JsValue> {
        let doc = dom::document()?;

        let particles = mount("particles", || {
            match doc.get_element_by_id("particle-canvas") {
                Some(el) => {
                    let canvas: HtmlCanvasElement = el.dyn_into()?;
                    ParticleCanvas::attach(canvas, &mut Lcg::from_entropy()).map(Some)
                }
                None => {
                    log::warn!("#particle-canvas missing; no background");
                    Ok(None)
                }
            }
        })
        .flatten();
        let navigation = mount("navigation", Navigation::attach).flatten();
        let reveal = mount("reveal", RevealObserver::attach);
        let filter = mount("project filter", ProjectFilter::attach).flatten();
        let contact = mount("contact form", || contact::attach(config::EMAIL)).flatten();
        mount("back to top", nav::attach_back_to_top);
        mount("enhancements", || enhance::attach(&doc));

        if let Some(el) = doc.get_element_by_id("typewriter") {
            typewriter::run(Typewriter::new(TYPEWRITER_TEXTS.iter().copied(), Timing::default()), el);
        } else {
            log::warn!("#typewriter missing");
        }

        if let Some(button) = doc.get_element_by_id("download-cv") {
            mount("download button", || {
                dom::listen(&button, "click", |_| {
                    notify::show_or_log(NotificationKind::Success, MSG_CV_DOWNLOADED)
                })
            });
        }

        let app = Rc::new(Self {
            particles,
            navigation,
            reveal,
            filter,
            contact,
        });
        app.bind_window()?;
        log::info!("portfolio initialised");
        Ok(app)
    }

    fn bind_window(&self) -> Result<(), JsValue> {
        let doc = dom::document()?;
        let win = dom::window()?;
        let Some(particles) = self.particles.clone() else {
            return Ok(());
        };

        {
            let particles = particles.clone();
            let doc_cb = doc.clone();
            dom::listen(&doc, "visibilitychange", move |_| {
                if doc_cb.hidden() {
                    particles.pause();
                } else {
                    particles.resume();
                }
            })?;
        }

        {
            let particles = particles.clone();
            let mut on_resize = debounce(RESIZE_DEBOUNCE_MS, move || {
                if let Err(err) = particles.resize() {
                    log::warn!("particle resize failed: {err:?}");
                }
            });
            dom::listen(&win, "resize", move |_| on_resize())?;
        }

        dom::listen(&win, "beforeunload", move |_| particles.cancel())?;
        Ok(())
    }
}

/// Route uncaught script errors and unhandled promise rejections to the log.
pub fn install_error_handlers() -> Result<(), JsValue> {
    let win = dom::window()?;
    dom::listen(&win, "error", |evt| {
        match evt.dyn_ref::<ErrorEvent>() {
            Some(err) => log::error!("uncaught error: {}", err.message()),
            None => log::error!("uncaught error"),
        }
    })?;
    dom::listen(&win, "unhandledrejection", |evt| {
        match evt.dyn_ref::<PromiseRejectionEvent>() {
            Some(rejection) => log::error!("unhandled rejection: {:?}", rejection.reason()),
            None => log::error!("unhandled rejection"),
        }
    })
}
