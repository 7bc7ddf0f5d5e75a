//! Full-viewport confetti canvas and its animation-frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::{OsRng, SmallRng};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window, window};

use crate::config::ConfettiConfig;
use crate::confetti::{ConfettiEngine, FrameStatus, Surface, Viewport};
use crate::quiz::Celebration;

struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    }

    fn fill_kite(&mut self, points: [(f64, f64); 4], color: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            ctx.line_to(x, y);
        }
        ctx.close_path();
        ctx.fill();
    }
}

/// Engine, canvas and RNG. Owned by the animation loop, separate from the quiz.
struct ConfettiState {
    engine: ConfettiEngine,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    rng: SmallRng,
}

impl ConfettiState {
    /// Match the canvas to the current window size.
    fn fit_viewport(&self) -> Viewport {
        let (width, height) = window()
            .map(|w| {
                let w_px = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                let h_px = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                (w_px, h_px)
            })
            .unwrap_or((0.0, 0.0));
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        Viewport { width, height }
    }
}

thread_local! {
    static CONFETTI: RefCell<Option<ConfettiState>> = const { RefCell::new(None) };
}

/// [`Celebration`] handle held by the quiz; starts a burst on the shared canvas.
pub struct CanvasConfetti;

impl CanvasConfetti {
    pub fn mount(win: &Window, doc: &Document, cfg: ConfettiConfig) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("lq-confetti-canvas") {
            el.dyn_into()?
        } else {
            let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
            c.set_id("lq-confetti-canvas");
            // Overlay the page without catching clicks.
            c.set_attribute("style", "position:fixed; left:0; top:0; pointer-events:none; z-index:50;").ok();
            doc.body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .append_child(&c)?;
            c
        };
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let seed = win.performance().map(|p| p.now()).unwrap_or(0.0);
        let rng = SmallRng::from_rng(OsRng)
            .unwrap_or_else(|_| SmallRng::seed_from_u64(seed as u64));

        let state = ConfettiState {
            engine: ConfettiEngine::new(cfg),
            canvas,
            surface: CanvasSurface { ctx },
            rng,
        };
        state.fit_viewport();
        CONFETTI.with(|c| c.replace(Some(state)));
        Ok(CanvasConfetti)
    }
}

impl Celebration for CanvasConfetti {
    fn celebrate(&mut self) {
        let started = CONFETTI.with(|cell| {
            let mut slot = cell.borrow_mut();
            match slot.as_mut() {
                Some(state) => {
                    let viewport = state.fit_viewport();
                    state.engine.start(viewport, &mut state.rng)
                }
                None => false,
            }
        });
        if started {
            start_confetti_loop();
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_confetti_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let status = CONFETTI.with(|cell| match cell.borrow_mut().as_mut() {
            Some(state) => state.engine.frame(ts, &mut state.surface),
            None => FrameStatus::Idle,
        });
        if status == FrameStatus::Running {
            request_frame(&f);
        } else {
            // Break the self-reference so the closure is freed after this call.
            let _ = f.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(f: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
        if let Err(err) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            tracing::warn!(?err, "requestAnimationFrame failed");
        }
    }
}
