//! Contact form: field validation, submission through a [`MailTransport`],
//! and user feedback through a [`FormView`].
//!
//! The controller is independent of the DOM; `DomForm` is the browser view
//! and `EmailJs` the browser transport.

use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use crate::config::EmailConfig;
use crate::dom;
use crate::notify::{self, NotificationKind};

mod emailjs;

pub use emailjs::EmailJs;

pub const MSG_INVALID: &str = "Please fill in all fields correctly.";
pub const MSG_SENT: &str = "Message sent successfully! I'll get back to you soon.";
pub const MSG_FAILED: &str = "Failed to send message. Please try again.";

// --- Validation ----------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Text,
    TextArea,
    Other,
}

impl FieldKind {
    /// Map an input's `type` (or `"textarea"`) to its validation rule.
    pub fn from_input_type(kind: &str) -> Self {
        match kind {
            "email" => FieldKind::Email,
            "text" => FieldKind::Text,
            "textarea" => FieldKind::TextArea,
            _ => FieldKind::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("not a valid email address")]
    InvalidEmail,
    #[error("must be at least 2 characters")]
    TooShort,
    #[error("required")]
    Empty,
}

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

pub fn validate(kind: FieldKind, value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    match kind {
        FieldKind::Email => {
            if email_pattern().is_some_and(|re| re.is_match(value)) {
                Ok(())
            } else {
                Err(FieldError::InvalidEmail)
            }
        }
        FieldKind::Text | FieldKind::TextArea => {
            if value.chars().count() >= 2 {
                Ok(())
            } else {
                Err(FieldError::TooShort)
            }
        }
        FieldKind::Other => {
            if value.is_empty() {
                Err(FieldError::Empty)
            } else {
                Ok(())
            }
        }
    }
}

// --- Submission ----------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Payload shape the email template expects.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TemplateParams<'a> {
    pub from_name: &'a str,
    pub from_email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub to_name: &'a str,
    pub to_email: &'a str,
}

impl Submission {
    pub fn template_params<'a>(&'a self, config: &'a EmailConfig) -> TemplateParams<'a> {
        TemplateParams {
            from_name: &self.name,
            from_email: &self.email,
            subject: &self.subject,
            message: &self.message,
            to_name: config.to_name,
            to_email: config.to_email,
        }
    }
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("email client is not loaded")]
    Unavailable,
    #[error("email delivery rejected: {0}")]
    Rejected(String),
    #[error("could not encode template parameters: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Hands a message to an email relay.
#[allow(async_fn_in_trait)]
pub trait MailTransport {
    async fn send(
        &self,
        config: &EmailConfig,
        params: &TemplateParams<'_>,
    ) -> Result<(), DeliveryError>;
}

/// UI side of the form.
pub trait FormView {
    /// Kind and current value of every validated field, in document order.
    fn fields(&self) -> Vec<(FieldKind, String)>;
    fn mark_field(&self, index: usize, error: Option<FieldError>);
    fn submission(&self) -> Submission;
    fn set_busy(&self, busy: bool);
    fn reset(&self);
    fn notify(&self, kind: NotificationKind, text: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    Sent,
    Failed,
}

/// Clears the busy state however the submission ends.
struct BusyGuard<'a, V: FormView>(&'a V);

impl<'a, V: FormView> BusyGuard<'a, V> {
    fn engage(view: &'a V) -> Self {
        view.set_busy(true);
        Self(view)
    }
}

impl<V: FormView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.0.set_busy(false);
    }
}

pub struct ContactForm<V, T> {
    view: V,
    transport: T,
    config: EmailConfig,
}

impl<V: FormView, T: MailTransport> ContactForm<V, T> {
    pub fn new(view: V, transport: T, config: EmailConfig) -> Self {
        Self {
            view,
            transport,
            config,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn validate_field(&self, index: usize) -> bool {
        let Some((kind, value)) = self.view.fields().into_iter().nth(index) else {
            return true;
        };
        let result = validate(kind, &value);
        self.view.mark_field(index, result.err());
        result.is_ok()
    }

    /// Validate every field (all of them get marked, no short-circuit).
    pub fn validate_all(&self) -> bool {
        let mut ok = true;
        for (index, (kind, value)) in self.view.fields().into_iter().enumerate() {
            let result = validate(kind, &value);
            self.view.mark_field(index, result.err());
            ok &= result.is_ok();
        }
        ok
    }

    pub fn clear_field(&self, index: usize) {
        self.view.mark_field(index, None);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let submission = self.view.submission();
        if !self.validate_all() {
            self.view.notify(NotificationKind::Error, MSG_INVALID);
            return SubmitOutcome::Invalid;
        }

        let _busy = BusyGuard::engage(&self.view);
        let params = submission.template_params(&self.config);
        match self.transport.send(&self.config, &params).await {
            Ok(()) => {
                log::info!("contact message delivered");
                self.view.notify(NotificationKind::Success, MSG_SENT);
                self.view.reset();
                SubmitOutcome::Sent
            }
            Err(err) => {
                log::error!("email sending failed: {err}");
                self.view.notify(NotificationKind::Error, MSG_FAILED);
                SubmitOutcome::Failed
            }
        }
    }
}

// --- Browser binding ---------------------------------------------------------

pub struct DomForm {
    form: HtmlFormElement,
    submit: Option<HtmlButtonElement>,
    inputs: Vec<Element>,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Result<Self, JsValue> {
        let submit = form
            .query_selector(".submit-btn")?
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let inputs = dom::elements(form.query_selector_all("input, select, textarea")?);
        Ok(Self {
            form,
            submit,
            inputs,
        })
    }

    fn named_value(&self, name: &str) -> String {
        self.form
            .query_selector(&format!("[name=\"{name}\"]"))
            .ok()
            .flatten()
            .map(|el| field_of(&el).1)
            .unwrap_or_default()
    }
}

fn field_of(el: &Element) -> (FieldKind, String) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        (FieldKind::from_input_type(&input.type_()), input.value())
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        (FieldKind::TextArea, area.value())
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        (FieldKind::Other, select.value())
    } else {
        (FieldKind::Other, el.text_content().unwrap_or_default())
    }
}

impl FormView for DomForm {
    fn fields(&self) -> Vec<(FieldKind, String)> {
        self.inputs.iter().map(field_of).collect()
    }

    fn mark_field(&self, index: usize, error: Option<FieldError>) {
        let Some(el) = self.inputs.get(index) else {
            return;
        };
        dom::set_class(el, "error", error.is_some()).ok();
        if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
            let (border, shadow) = match error {
                Some(_) => ("#ef4444", "0 0 0 3px rgba(239, 68, 68, 0.2)"),
                None => ("", ""),
            };
            dom::set_styles(html, &[("border-color", border), ("box-shadow", shadow)]).ok();
        }
    }

    fn submission(&self) -> Submission {
        Submission {
            name: self.named_value("name"),
            email: self.named_value("email"),
            subject: self.named_value("subject"),
            message: self.named_value("message"),
        }
    }

    fn set_busy(&self, busy: bool) {
        if let Some(button) = &self.submit {
            dom::set_class(button, "loading", busy).ok();
            button.set_disabled(busy);
        }
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn notify(&self, kind: NotificationKind, text: &str) {
        notify::show_or_log(kind, text);
    }
}

pub type BrowserContactForm = ContactForm<DomForm, EmailJs>;

/// Wire `#contact-form` to EmailJS.
pub fn attach(config: EmailConfig) -> Result<Option<Rc<BrowserContactForm>>, JsValue> {
    let doc = dom::document()?;
    let Some(form) = doc
        .get_element_by_id("contact-form")
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        log::warn!("#contact-form missing; contact form disabled");
        return Ok(None);
    };
    let controller = Rc::new(ContactForm::new(DomForm::new(form)?, EmailJs, config));

    {
        let form = controller.view().form.clone();
        let c = controller.clone();
        dom::listen(&form, "submit", move |evt| {
            evt.prevent_default();
            let c = c.clone();
            wasm_bindgen_futures::spawn_local(async move {
                c.submit().await;
            });
        })?;
    }

    for (index, input) in controller.view().inputs.iter().enumerate() {
        let c = controller.clone();
        dom::listen(input, "blur", move |_| {
            c.validate_field(index);
        })?;
        let c = controller.clone();
        dom::listen(input, "input", move |_| c.clear_field(index))?;
    }
    Ok(Some(controller))
}
