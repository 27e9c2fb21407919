//! Project card filtering by category tag.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::config::{FILTER_ALL, FILTER_HIDE_DELAY_MS, FILTER_SHOW_DELAY_MS};
use crate::dom;

/// `categories` is the card's space-separated tag list.
pub fn card_matches(categories: &str, filter: &str) -> bool {
    filter == FILTER_ALL || categories.split_whitespace().any(|c| c == filter)
}

/// A card that can be shown or hidden.
pub trait CardView {
    fn categories(&self) -> String;
    fn show(&self);
    fn hide(&self);
}

/// Show matching cards, hide the rest. Returns how many are shown.
pub fn apply_filter<C: CardView>(cards: &[C], filter: &str) -> usize {
    let mut shown = 0;
    for card in cards {
        if card_matches(&card.categories(), filter) {
            card.show();
            shown += 1;
        } else {
            card.hide();
        }
    }
    shown
}

/// Single active filter button.
#[derive(Clone, Debug)]
pub struct FilterButtons {
    filters: Vec<String>,
    active: Option<usize>,
}

impl FilterButtons {
    pub fn new(filters: Vec<String>) -> Self {
        let active = filters.iter().position(|f| f == FILTER_ALL);
        Self { filters, active }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn select(&mut self, idx: usize) -> Option<&str> {
        let filter = self.filters.get(idx)?;
        self.active = Some(idx);
        Some(filter)
    }
}

// --- Browser binding ---------------------------------------------------------

/// Card element plus its in-flight transition, so a newer filter click
/// supersedes a pending show/hide.
pub struct DomCard {
    el: HtmlElement,
    pending: RefCell<Option<Timeout>>,
}

impl DomCard {
    pub fn new(el: HtmlElement) -> Self {
        Self {
            el,
            pending: RefCell::new(None),
        }
    }
}

impl CardView for DomCard {
    fn categories(&self) -> String {
        self.el.get_attribute("data-category").unwrap_or_default()
    }

    fn show(&self) {
        self.el.style().set_property("display", "block").ok();
        let el = self.el.clone();
        *self.pending.borrow_mut() = Some(Timeout::new(FILTER_SHOW_DELAY_MS, move || {
            dom::set_styles(&el, &[("opacity", "1"), ("transform", "translateY(0)")]).ok();
        }));
    }

    fn hide(&self) {
        dom::set_styles(&self.el, &[("opacity", "0"), ("transform", "translateY(30px)")]).ok();
        let el = self.el.clone();
        *self.pending.borrow_mut() = Some(Timeout::new(FILTER_HIDE_DELAY_MS, move || {
            el.style().set_property("display", "none").ok();
        }));
    }
}

pub struct ProjectFilter {
    buttons: Vec<Element>,
    cards: Vec<DomCard>,
    state: RefCell<FilterButtons>,
}

impl ProjectFilter {
    pub fn attach() -> Result<Option<Rc<Self>>, JsValue> {
        let doc = dom::document()?;
        let buttons = dom::query_all(&doc, ".filter-btn")?;
        if buttons.is_empty() {
            log::warn!("no .filter-btn elements; project filter disabled");
            return Ok(None);
        }
        let cards = dom::query_all(&doc, ".project-card")?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .map(DomCard::new)
            .collect();
        let filters = buttons
            .iter()
            .map(|b| b.get_attribute("data-filter").unwrap_or_default())
            .collect();
        let this = Rc::new(Self {
            buttons,
            cards,
            state: RefCell::new(FilterButtons::new(filters)),
        });
        for (idx, button) in this.buttons.iter().enumerate() {
            let this_cb = this.clone();
            dom::listen(button, "click", move |_| this_cb.select(idx))?;
        }
        Ok(Some(this))
    }

    pub fn select(&self, idx: usize) {
        let Some(filter) = self.state.borrow_mut().select(idx).map(str::to_owned) else {
            return;
        };
        for (i, button) in self.buttons.iter().enumerate() {
            dom::set_class(button, "active", i == idx).ok();
        }
        let shown = apply_filter(&self.cards, &filter);
        log::debug!("filter '{filter}': {shown}/{} cards", self.cards.len());
    }
}
