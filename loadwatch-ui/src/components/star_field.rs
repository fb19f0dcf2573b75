//! Star Field Component
//!
//! Footer star animation on a 2D canvas, driven by `requestAnimationFrame`.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use loadwatch::starfield::{StarField, Surface};
use loadwatch::StarfieldConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use crate::dom;

pub const CANVAS_SELECTOR: &str = ".star-canvas";
pub const FPS_ELEMENT_ID: &str = "fps-counter";

/// [`Surface`] over a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: &str, width: f64, height: f64) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style(&color.into());
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str, alpha: f64) {
        self.ctx.begin_path();
        self.ctx.set_fill_style(&color.into());
        self.ctx.set_global_alpha(alpha);
        // arc() only fails on a negative radius
        let _ = self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0);
        self.ctx.fill();
    }
}

/// Match the canvas to its container; returns the new size
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
    if let Some(parent) = canvas.parent_element() {
        canvas.set_width(parent.client_width().max(0) as u32);
        canvas.set_height(parent.client_height().max(0) as u32);
    }
    (canvas.width() as f64, canvas.height() as f64)
}

fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
    if let Some(window) = dom::window() {
        if window
            .request_animation_frame(f.as_ref().unchecked_ref())
            .is_err()
        {
            web_sys::console::error_1(&"requestAnimationFrame failed".into());
        }
    }
}

/// Start the animation. Without a star canvas this does nothing.
pub fn start(config: StarfieldConfig) {
    let Some(canvas) = dom::query_selector::<HtmlCanvasElement>(CANVAS_SELECTOR) else {
        return;
    };

    let (width, height) = fit_to_parent(&canvas);

    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let field = match StarField::new(config, width, height, StdRng::from_entropy()) {
        Ok(field) => Rc::new(RefCell::new(field)),
        Err(e) => {
            web_sys::console::error_1(&format!("Star field disabled: {}", e).into());
            return;
        }
    };

    // Keep the canvas sized to the footer
    {
        let canvas = canvas.clone();
        let field = Rc::clone(&field);
        let on_resize = Closure::wrap(Box::new(move || {
            let (width, height) = fit_to_parent(&canvas);
            field.borrow_mut().resize(width, height);
        }) as Box<dyn FnMut()>);
        if let Some(window) = dom::window() {
            window
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
                .ok();
        }
        on_resize.forget();
    }

    let fps_el = dom::element_by_id::<Element>(FPS_ELEMENT_ID);
    let mut surface = CanvasSurface::new(ctx);

    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = Rc::clone(&f);

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        {
            let mut field = field.borrow_mut();
            if let Some(fps) = field.tick(timestamp) {
                if let Some(el) = &fps_el {
                    dom::set_text(el, &fps.to_string());
                }
            }
            field.draw(&mut surface);
        }

        // Request next frame
        if let Some(cb) = f.borrow().as_ref() {
            request_animation_frame(cb);
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = g.borrow().as_ref() {
        request_animation_frame(cb);
    }
}
