// Integration tests (native) for the `folio-wasm` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use std::cell::RefCell;

use folio_wasm::config::{EMAIL, EmailConfig, PARTICLE_MAX, TYPEWRITER_TEXTS};
use folio_wasm::contact::{
    ContactForm, DeliveryError, FieldError, FieldKind, FormView, MSG_INVALID, MSG_SENT,
    MailTransport, SubmitOutcome, Submission, TemplateParams,
};
use folio_wasm::filter::{CardView, FilterButtons, apply_filter};
use folio_wasm::loading::{LoadingProgress, LoadingTick};
use folio_wasm::nav::{NavState, SectionSpan, anchor_target};
use folio_wasm::notify::NotificationKind;
use folio_wasm::particles::{ParticleField, Surface, particle_count};
use folio_wasm::rng::Lcg;
use folio_wasm::typewriter::{Phase, Timing, Typewriter};

// A full-width field keeps every particle inside the canvas over many frames.
#[test]
fn particle_field_stays_on_canvas() {
    struct Null;
    impl Surface for Null {
        fn clear(&mut self, _: f64, _: f64) {}
        fn fill_circle(&mut self, _: f64, _: f64, _: f64, _: &str, _: f64) {}
        fn stroke_line(&mut self, _: (f64, f64), _: (f64, f64), _: &str, _: f64) {}
    }

    let mut rng = Lcg::new(7);
    let mut field = ParticleField::new(1920.0, 1080.0, &mut rng);
    assert_eq!(field.particles().len(), PARTICLE_MAX);
    field.set_pointer(960.0, 540.0);
    for _ in 0..2_000 {
        field.step(&mut Null);
    }
    for p in field.particles() {
        assert!((0.0..=1920.0).contains(&p.x));
        assert!((0.0..=1080.0).contains(&p.y));
    }

    field.resize(320.0, 200.0);
    field.update();
    assert_eq!(field.size(), (320.0, 200.0));
    assert!(field.particles().iter().all(|p| p.x <= 320.0 && p.y <= 200.0));
    assert_eq!(particle_count(320.0), 32);
}

// The headline walks through every phrase and wraps back to the first.
#[test]
fn typewriter_cycles_all_phrases() {
    let mut tw = Typewriter::new(TYPEWRITER_TEXTS.iter().copied(), Timing::default());
    let mut seen = Vec::new();
    let mut guard = 0;
    loop {
        tw.tick();
        if tw.phase() == Phase::PausedAtFull {
            seen.push(tw.visible_text().to_string());
        }
        if seen.len() == TYPEWRITER_TEXTS.len() + 1 {
            break;
        }
        guard += 1;
        assert!(guard < 10_000);
    }
    assert_eq!(&seen[..TYPEWRITER_TEXTS.len()], TYPEWRITER_TEXTS);
    assert_eq!(seen.last().map(String::as_str), Some(TYPEWRITER_TEXTS[0]));
}

#[test]
fn loading_hands_off_once_after_completion() {
    let mut rng = Lcg::new(99);
    let mut progress = LoadingProgress::default();
    let mut completions = 0;
    for _ in 0..200 {
        if progress.tick(&mut rng) == LoadingTick::Completed {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(progress.percent_label(), "100%");
    assert!(progress.take_handoff());
    assert!(!progress.take_handoff());
}

// Filter buttons and cards together, as a click sequence would drive them.
#[test]
fn filter_clicks_toggle_cards() {
    struct Card {
        tags: &'static str,
        visible: RefCell<bool>,
    }
    impl CardView for Card {
        fn categories(&self) -> String {
            self.tags.to_string()
        }
        fn show(&self) {
            *self.visible.borrow_mut() = true;
        }
        fn hide(&self) {
            *self.visible.borrow_mut() = false;
        }
    }
    let cards: Vec<Card> = ["web ai", "ai", "mobile"]
        .into_iter()
        .map(|tags| Card {
            tags,
            visible: RefCell::new(true),
        })
        .collect();
    fn visible(cards: &[Card]) -> Vec<bool> {
        cards.iter().map(|c| *c.visible.borrow()).collect()
    }

    let mut buttons = FilterButtons::new(vec!["all".into(), "ai".into(), "mobile".into()]);
    assert_eq!(buttons.active(), Some(0));

    let filter = buttons.select(1).map(str::to_owned);
    assert_eq!(apply_filter(&cards, filter.as_deref().unwrap_or_default()), 2);
    assert_eq!(visible(&cards), [true, true, false]);

    let filter = buttons.select(2).map(str::to_owned);
    assert_eq!(apply_filter(&cards, filter.as_deref().unwrap_or_default()), 1);
    assert_eq!(visible(&cards), [false, false, true]);

    let filter = buttons.select(0).map(str::to_owned);
    assert_eq!(apply_filter(&cards, filter.as_deref().unwrap_or_default()), 3);
    assert_eq!(buttons.active(), Some(0));
    assert!(buttons.select(9).is_none());
    assert_eq!(buttons.active(), Some(0));
}

#[test]
fn nav_tracks_scrolled_section() {
    let hrefs = ["#home", "#about", "#projects", "https://example.org"];
    let targets = hrefs
        .iter()
        .map(|h| anchor_target(h).map(str::to_owned))
        .collect();
    let sections = vec![
        SectionSpan { id: "home".into(), top: 0.0, height: 800.0 },
        SectionSpan { id: "about".into(), top: 800.0, height: 600.0 },
        SectionSpan { id: "projects".into(), top: 1400.0, height: 1000.0 },
    ];
    let mut nav = NavState::new(targets);
    assert_eq!(nav.update(&sections, 0.0), Some(0));
    assert_eq!(nav.update(&sections, 750.0), Some(1));
    assert_eq!(nav.update(&sections, 1500.0), Some(2));
    // past the last section nothing contains the probe; keep the last link
    assert_eq!(nav.update(&sections, 5000.0), Some(2));
}

struct Page {
    values: RefCell<Submission>,
    marks: RefCell<Vec<(usize, Option<FieldError>)>>,
    notes: RefCell<Vec<(NotificationKind, String)>>,
}

impl Page {
    fn filled(email: &str) -> Self {
        Self {
            values: RefCell::new(Submission {
                name: "Ada Lovelace".into(),
                email: email.into(),
                subject: "Collaboration".into(),
                message: "Let's build an engine together.".into(),
            }),
            marks: RefCell::new(Vec::new()),
            notes: RefCell::new(Vec::new()),
        }
    }
}

impl FormView for Page {
    fn fields(&self) -> Vec<(FieldKind, String)> {
        let s = self.values.borrow();
        vec![
            (FieldKind::from_input_type("text"), s.name.clone()),
            (FieldKind::from_input_type("email"), s.email.clone()),
            (FieldKind::from_input_type("text"), s.subject.clone()),
            (FieldKind::TextArea, s.message.clone()),
        ]
    }
    fn mark_field(&self, index: usize, error: Option<FieldError>) {
        self.marks.borrow_mut().push((index, error));
    }
    fn submission(&self) -> Submission {
        self.values.borrow().clone()
    }
    fn set_busy(&self, _busy: bool) {}
    fn reset(&self) {
        *self.values.borrow_mut() = Submission::default();
    }
    fn notify(&self, kind: NotificationKind, text: &str) {
        self.notes.borrow_mut().push((kind, text.to_string()));
    }
}

#[derive(Default)]
struct Outbox(RefCell<Vec<serde_json::Value>>);

impl MailTransport for Outbox {
    async fn send(
        &self,
        _config: &EmailConfig,
        params: &TemplateParams<'_>,
    ) -> Result<(), DeliveryError> {
        self.0.borrow_mut().push(serde_json::to_value(params)?);
        Ok(())
    }
}

#[test]
fn contact_form_round_trip() {
    let form = ContactForm::new(Page::filled("ada@example.com"), Outbox::default(), EMAIL);
    let outcome = futures::executor::block_on(form.submit());
    assert_eq!(outcome, SubmitOutcome::Sent);

    let page = form.view();
    assert_eq!(page.notes.borrow().as_slice(), &[(NotificationKind::Success, MSG_SENT.to_string())]);
    assert_eq!(page.submission(), Submission::default());
    assert!(page.marks.borrow().iter().all(|(_, err)| err.is_none()));
}

#[test]
fn contact_form_rejects_bad_email() {
    let outbox = Outbox::default();
    let form = ContactForm::new(Page::filled("not-an-address"), outbox, EMAIL);
    let outcome = futures::executor::block_on(form.submit());
    assert_eq!(outcome, SubmitOutcome::Invalid);

    let page = form.view();
    assert_eq!(page.notes.borrow()[0], (NotificationKind::Error, MSG_INVALID.to_string()));
    assert!(page.marks.borrow().contains(&(1, Some(FieldError::InvalidEmail))));
    assert_eq!(page.submission().email, "not-an-address");
}
