// Browser tests for the DOM bindings.
// Run with `wasm-pack test --headless --chrome` (or --firefox).
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use folio_wasm::certs;
use folio_wasm::dom;
use folio_wasm::notify::{self, NotificationKind};
use folio_wasm::particles::{CanvasSurface, ParticleField};
use folio_wasm::rng::Lcg;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn renders_particles_onto_canvas() {
    let doc = dom::document().unwrap();
    let canvas: HtmlCanvasElement = doc.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_width(200);
    canvas.set_height(100);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();

    let mut field = ParticleField::new(200.0, 100.0, &mut Lcg::new(3));
    let mut surface = CanvasSurface::new(ctx.clone());
    for _ in 0..10 {
        field.step(&mut surface);
    }

    let pixels = ctx.get_image_data(0.0, 0.0, 200.0, 100.0).unwrap().data();
    assert!(pixels.chunks(4).any(|px| px[3] > 0), "something was drawn");
}

#[wasm_bindgen_test]
fn notification_is_attached_to_body() {
    notify::show(NotificationKind::Error, "boom").unwrap();
    let doc = dom::document().unwrap();
    let toast = doc
        .query_selector(".notification.error")
        .unwrap()
        .expect("toast in the DOM");
    assert_eq!(toast.text_content().as_deref(), Some("boom"));
}

#[wasm_bindgen_test]
fn certifications_toggle_flips_panel_and_label() {
    let doc = dom::document().unwrap();
    let body = doc.body().unwrap();
    let panel = doc.create_element("div").unwrap();
    panel.set_id("allCertifications");
    let button = doc.create_element("button").unwrap();
    button.set_class_name("cert-expand-btn");
    button.set_inner_html(
        r#"<span class="expand-text">View All Certifications</span><i class="fas fa-chevron-down expand-icon"></i>"#,
    );
    body.append_child(&panel).unwrap();
    body.append_child(&button).unwrap();

    assert!(certs::toggle().unwrap());
    assert!(panel.class_list().contains("expanded"));
    let label = button.query_selector(".expand-text").unwrap().unwrap();
    assert_eq!(label.text_content().as_deref(), Some("Show Less"));

    assert!(!certs::toggle().unwrap());
    assert!(!panel.class_list().contains("expanded"));
    assert_eq!(label.text_content().as_deref(), Some("View All Certifications"));
}
