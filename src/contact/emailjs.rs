//! EmailJS browser client as a [`MailTransport`].
//!
//! The page loads the EmailJS SDK, which installs a global `emailjs` object
//! with `init(publicKey)` and `send(serviceId, templateId, params) -> Promise`.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{DeliveryError, MailTransport, TemplateParams};
use crate::config::EmailConfig;

#[derive(Clone, Copy, Debug, Default)]
pub struct EmailJs;

impl MailTransport for EmailJs {
    async fn send(
        &self,
        config: &EmailConfig,
        params: &TemplateParams<'_>,
    ) -> Result<(), DeliveryError> {
        let client = client().ok_or(DeliveryError::Unavailable)?;

        method(&client, "init")?
            .call1(&client, &JsValue::from_str(config.public_key))
            .map_err(rejected)?;

        let params = to_js_object(params)?;
        let pending = method(&client, "send")?
            .call3(
                &client,
                &JsValue::from_str(config.service_id),
                &JsValue::from_str(config.template_id),
                &params,
            )
            .map_err(rejected)?;
        let promise: Promise = pending
            .dyn_into()
            .map_err(|_| DeliveryError::Rejected("send() did not return a promise".into()))?;
        JsFuture::from(promise).await.map_err(rejected)?;
        Ok(())
    }
}

fn client() -> Option<JsValue> {
    let client = Reflect::get(&js_sys::global(), &JsValue::from_str("emailjs")).ok()?;
    if client.is_undefined() || client.is_null() {
        None
    } else {
        Some(client)
    }
}

fn method(client: &JsValue, name: &str) -> Result<Function, DeliveryError> {
    Reflect::get(client, &JsValue::from_str(name))
        .map_err(rejected)?
        .dyn_into::<Function>()
        .map_err(|_| DeliveryError::Unavailable)
}

fn to_js_object(params: &TemplateParams<'_>) -> Result<JsValue, DeliveryError> {
    let json = serde_json::to_string(params)?;
    js_sys::JSON::parse(&json).map_err(rejected)
}

/// EmailJS rejects with `{ status, text }`; keep whatever is readable.
fn rejected(err: JsValue) -> DeliveryError {
    let detail = err
        .as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .or_else(|| {
            js_sys::JSON::stringify(&err)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"));
    DeliveryError::Rejected(detail)
}
