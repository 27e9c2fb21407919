//! Decorative particle background.
//!
//! A bounded 2-D point simulation: particles drift, bounce off the canvas
//! edges, get pushed away from the pointer and are joined by faint lines when
//! close to each other. The simulation (`ParticleField`) renders onto any
//! [`Surface`]; `ParticleCanvas` wires it to a `<canvas>` and a [`FrameLoop`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::config::{
    LINK_COLOR, LINK_DISTANCE, LINK_MAX_ALPHA, PARTICLE_COLORS, PARTICLE_MAX, PARTICLE_SPACING_PX,
    POINTER_FORCE, POINTER_RADIUS,
};
use crate::dom;
use crate::rng::RandomSource;
use crate::schedule::{FrameLoop, TaskState};

// --- Simulation ----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,  // [1, 4)
    pub vx: f64,      // [-0.25, 0.25)
    pub vy: f64,
    pub opacity: f64, // [0.2, 0.7)
    pub color: &'static str,
}

impl Particle {
    pub fn random(rng: &mut impl RandomSource, width: f64, height: f64) -> Self {
        Self {
            x: rng.range(0.0, width),
            y: rng.range(0.0, height),
            radius: rng.range(1.0, 4.0),
            vx: rng.range(-0.25, 0.25),
            vy: rng.range(-0.25, 0.25),
            opacity: rng.range(0.2, 0.7),
            color: PARTICLE_COLORS[rng.index(PARTICLE_COLORS.len())],
        }
    }

    /// Push away from the pointer, drift, bounce, clamp.
    fn advance(&mut self, pointer: (f64, f64), width: f64, height: f64) {
        let dx = pointer.0 - self.x;
        let dy = pointer.1 - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < POINTER_RADIUS {
            let force = (POINTER_RADIUS - distance) / POINTER_RADIUS;
            self.x -= dx * force * POINTER_FORCE;
            self.y -= dy * force * POINTER_FORCE;
        }

        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
        self.x = self.x.clamp(0.0, width.max(0.0));
        self.y = self.y.clamp(0.0, height.max(0.0));
    }
}

/// Number of particles for a viewport: one per 10px of width, at most 100.
pub fn particle_count(viewport_width: f64) -> usize {
    let n = (viewport_width / PARTICLE_SPACING_PX).ceil();
    if n.is_nan() || n <= 0.0 {
        0
    } else {
        (n as usize).min(PARTICLE_MAX)
    }
}

/// Line alpha for two particles `distance` apart; `None` when too far to connect.
pub fn link_alpha(distance: f64) -> Option<f64> {
    if distance < LINK_DISTANCE {
        Some((LINK_DISTANCE - distance) / LINK_DISTANCE * LINK_MAX_ALPHA)
    } else {
        None
    }
}

/// Drawing capability the field renders through.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str, alpha: f64);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, alpha: f64);
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    pointer: (f64, f64),
}

impl ParticleField {
    pub fn new(width: f64, height: f64, rng: &mut impl RandomSource) -> Self {
        let particles = (0..particle_count(width))
            .map(|_| Particle::random(rng, width, height))
            .collect();
        Self::with_particles(width, height, particles)
    }

    pub fn with_particles(width: f64, height: f64, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            width,
            height,
            pointer: (0.0, 0.0),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Canvas dimensions only; the particle set is untouched.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    pub fn update(&mut self) {
        let (pointer, w, h) = (self.pointer, self.width, self.height);
        for p in &mut self.particles {
            p.advance(pointer, w, h);
        }
    }

    /// Every unordered pair close enough to connect, with its line alpha.
    pub fn links(&self) -> Vec<(usize, usize, f64)> {
        let mut out = Vec::new();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let (a, b) = (&self.particles[i], &self.particles[j]);
                let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if let Some(alpha) = link_alpha(distance) {
                    out.push((i, j, alpha));
                }
            }
        }
        out
    }

    pub fn render(&self, surface: &mut impl Surface) {
        surface.clear(self.width, self.height);
        for p in &self.particles {
            surface.fill_circle(p.x, p.y, p.radius, p.color, p.opacity);
        }
        for (i, j, alpha) in self.links() {
            let (a, b) = (&self.particles[i], &self.particles[j]);
            surface.stroke_line((a.x, a.y), (b.x, b.y), LINK_COLOR, alpha);
        }
    }

    pub fn step(&mut self, surface: &mut impl Surface) {
        self.update();
        self.render(surface);
    }
}

// --- Canvas binding ------------------------------------------------------------

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str, alpha: f64) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        self.ctx.fill();
        self.ctx.restore();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, alpha: f64) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_stroke_style(&JsValue::from_str(color));
        self.ctx.set_line_width(1.0);
        line(&self.ctx, from.0, from.1, to.0, to.1);
        self.ctx.restore();
    }
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

/// The running background: canvas, shared field and its frame loop.
#[derive(Clone)]
pub struct ParticleCanvas {
    canvas: HtmlCanvasElement,
    field: Rc<RefCell<ParticleField>>,
    frames: FrameLoop,
}

impl ParticleCanvas {
    pub fn attach(canvas: HtmlCanvasElement, rng: &mut impl RandomSource) -> Result<Self, JsValue> {
        let (w, h) = dom::viewport_size()?;
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let field = Rc::new(RefCell::new(ParticleField::new(w, h, rng)));
        log::debug!("particle field: {} particles on {}x{}", field.borrow().particles().len(), w, h);

        {
            let field = field.clone();
            let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
                field
                    .borrow_mut()
                    .set_pointer(evt.client_x() as f64, evt.client_y() as f64);
            }) as Box<dyn FnMut(_)>);
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let frames = {
            let field = field.clone();
            let mut surface = CanvasSurface::new(ctx);
            FrameLoop::new(move |_ts| {
                field.borrow_mut().step(&mut surface);
                true
            })
        };
        frames.start();

        Ok(Self {
            canvas,
            field,
            frames,
        })
    }

    pub fn resize(&self) -> Result<(), JsValue> {
        let (w, h) = dom::viewport_size()?;
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        self.field.borrow_mut().resize(w, h);
        Ok(())
    }

    pub fn pause(&self) {
        self.frames.pause();
    }

    pub fn resume(&self) {
        self.frames.resume();
    }

    pub fn cancel(&self) {
        self.frames.cancel();
    }

    pub fn state(&self) -> TaskState {
        self.frames.state()
    }
}
