//! Section navigation: active-link tracking, navbar state, smooth scrolling,
//! the mobile menu and the back-to-top button.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions,
};

use crate::config::{BACK_TO_TOP_AFTER, NAVBAR_SCROLLED_AFTER, NAV_SCROLL_OFFSET};
use crate::dom;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    fn contains(&self, pos: f64) -> bool {
        pos >= self.top && pos < self.top + self.height
    }
}

/// Section containing `scroll_y + 100`. Later sections win on overlap.
pub fn section_at(sections: &[SectionSpan], scroll_y: f64) -> Option<&str> {
    let pos = scroll_y + NAV_SCROLL_OFFSET;
    sections
        .iter()
        .rev()
        .find(|s| s.contains(pos))
        .map(|s| s.id.as_str())
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_AFTER
}

/// `"#about"` -> `Some("about")`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Which nav link is active. Links are identified by the section id they point at.
#[derive(Clone, Debug)]
pub struct NavState {
    targets: Vec<Option<String>>,
    active: Option<usize>,
}

impl NavState {
    pub fn new(targets: Vec<Option<String>>) -> Self {
        Self {
            targets,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Recompute from layout. With no containing section the previous choice stays.
    pub fn update(&mut self, sections: &[SectionSpan], scroll_y: f64) -> Option<usize> {
        if let Some(id) = section_at(sections, scroll_y) {
            self.active = self
                .targets
                .iter()
                .position(|t| t.as_deref() == Some(id));
        }
        self.active
    }
}

// --- Browser binding ---------------------------------------------------------

pub struct Navigation {
    doc: Document,
    navbar: HtmlElement,
    toggle: Option<HtmlElement>,
    menu: Option<HtmlElement>,
    links: Vec<Element>,
    state: RefCell<NavState>,
}

impl Navigation {
    pub fn attach() -> Result<Option<Rc<Self>>, JsValue> {
        let doc = dom::document()?;
        let Some(navbar) = dom::by_id(&doc, "navbar") else {
            log::warn!("#navbar missing; navigation disabled");
            return Ok(None);
        };
        let links = dom::query_all(&doc, ".nav-link")?;
        let targets = links
            .iter()
            .map(|l| {
                l.get_attribute("href")
                    .and_then(|h| anchor_target(&h).map(str::to_owned))
            })
            .collect();
        let nav = Rc::new(Self {
            toggle: dom::by_id(&doc, "nav-toggle"),
            menu: dom::by_id(&doc, "nav-menu"),
            doc,
            navbar,
            links,
            state: RefCell::new(NavState::new(targets)),
        });
        nav.bind()?;
        nav.refresh();
        Ok(Some(nav))
    }

    fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        if let Some(toggle) = &self.toggle {
            let nav = self.clone();
            dom::listen(toggle, "click", move |_| nav.toggle_menu())?;
        }

        for link in &self.links {
            let nav = self.clone();
            let link_cb = link.clone();
            dom::listen(link, "click", move |evt| {
                evt.prevent_default();
                nav.close_menu();
                let target = link_cb
                    .get_attribute("href")
                    .and_then(|h| anchor_target(&h).and_then(|id| nav.doc.get_element_by_id(id)));
                if let Some(section) = target {
                    smooth_scroll_into_view(&section, ScrollLogicalPosition::Start);
                }
            })?;
        }

        let nav = self.clone();
        dom::listen(dom::window()?.as_ref(), "scroll", move |_| nav.refresh())?;
        Ok(())
    }

    /// Re-read the scroll position and layout and update classes.
    pub fn refresh(&self) {
        let scroll_y = dom::scroll_y();
        dom::set_class(&self.navbar, "scrolled", navbar_scrolled(scroll_y)).ok();

        let sections = match self.sections() {
            Ok(s) => s,
            Err(err) => {
                log::warn!("could not read sections: {err:?}");
                return;
            }
        };
        let active = self.state.borrow_mut().update(&sections, scroll_y);
        for (i, link) in self.links.iter().enumerate() {
            dom::set_class(link, "active", Some(i) == active).ok();
        }
    }

    fn sections(&self) -> Result<Vec<SectionSpan>, JsValue> {
        Ok(dom::query_all(&self.doc, "section[id]")?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .map(|s| SectionSpan {
                id: s.id(),
                top: s.offset_top() as f64,
                height: s.offset_height() as f64,
            })
            .collect())
    }

    fn toggle_menu(&self) {
        for el in [&self.menu, &self.toggle].into_iter().flatten() {
            el.class_list().toggle("active").ok();
        }
    }

    fn close_menu(&self) {
        for el in [&self.menu, &self.toggle].into_iter().flatten() {
            dom::set_class(el, "active", false).ok();
        }
    }
}

pub fn smooth_scroll_into_view(el: &Element, block: ScrollLogicalPosition) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(block);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

/// Wire `#back-to-top`: shown past 500px, scrolls smoothly to the top on click.
pub fn attach_back_to_top() -> Result<bool, JsValue> {
    let doc = dom::document()?;
    let Some(button) = dom::by_id(&doc, "back-to-top") else {
        return Ok(false);
    };
    let win = dom::window()?;
    {
        let button = button.clone();
        dom::listen(&win, "scroll", move |_| {
            dom::set_class(&button, "show", back_to_top_visible(dom::scroll_y())).ok();
        })?;
    }
    dom::listen(&button, "click", move |_| {
        let opts = ScrollToOptions::new();
        opts.set_top(0.0);
        opts.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&opts);
    })?;
    Ok(true)
}
