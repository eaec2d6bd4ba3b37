//! Browser glue: a `Surface` over `CanvasRenderingContext2d` and a
//! cancellable `requestAnimationFrame` scheduler.

use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::renderer::{ColorStop, DrawCommand, Glow, Paint, Surface};

/// 2D canvas render target
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look the canvas up by element id; `None` if it (or its 2D context) is missing
    pub fn from_element_id(id: &str) -> Option<Self> {
        let canvas: HtmlCanvasElement = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into()
            .ok()?;
        Self::from_canvas(&canvas)
    }

    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn gradient_stops(gradient: &CanvasGradient, stops: &[ColorStop]) {
        for stop in stops {
            gradient
                .add_color_stop(stop.offset, &stop.color.to_css())
                .ok();
        }
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                Self::gradient_stops(&gradient, stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                let Ok(gradient) = self.ctx.create_radial_gradient(
                    center.x as f64,
                    center.y as f64,
                    *inner_radius as f64,
                    center.x as f64,
                    center.y as f64,
                    *outer_radius as f64,
                ) else {
                    return;
                };
                Self::gradient_stops(&gradient, stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }

    fn set_glow(&self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_blur(glow.blur as f64);
                self.ctx.set_shadow_color(&glow.color.to_css());
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }

    fn trace_polygon(&self, points: &[Vec2]) -> bool {
        let Some((first, rest)) = points.split_first() else {
            return false;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        true
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear(color) => {
                self.set_glow(None);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
            }
            DrawCommand::FillRect { rect, paint, glow } => {
                self.set_glow(*glow);
                self.set_fill(paint);
                ctx.fill_rect(
                    rect.x as f64,
                    rect.y as f64,
                    rect.width as f64,
                    rect.height as f64,
                );
                self.set_glow(None);
            }
            DrawCommand::StrokeRect {
                rect,
                color,
                line_width,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*line_width as f64);
                ctx.stroke_rect(
                    rect.x as f64,
                    rect.y as f64,
                    rect.width as f64,
                    rect.height as f64,
                );
            }
            DrawCommand::FillCircle {
                center,
                radius,
                paint,
                glow,
            } => {
                if *radius <= 0.0 {
                    return;
                }
                self.set_glow(*glow);
                self.set_fill(paint);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .ok();
                ctx.fill();
                self.set_glow(None);
            }
            DrawCommand::FillPolygon { points, paint } => {
                if self.trace_polygon(points) {
                    self.set_fill(paint);
                    ctx.fill();
                }
            }
            DrawCommand::StrokePolygon {
                points,
                color,
                line_width,
            } => {
                if self.trace_polygon(points) {
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*line_width as f64);
                    ctx.stroke();
                }
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                if *width <= 0.0 {
                    return;
                }
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.set_line_width(*width as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                pos,
                color,
                font,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_font(font);
                ctx.set_text_align("center");
                ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
            }
        }
    }
}

/// `requestAnimationFrame` wrapper that remembers the pending request so it
/// can be cancelled. Clones share the same pending slot.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` with the frame timestamp (ms) at the next refresh
    pub fn request(&self, callback: impl FnOnce(f64) + 'static) {
        let Some(window) = web_sys::window() else {
            log::warn!("No window, cannot schedule frame");
            return;
        };
        let pending = self.pending.clone();
        let closure = Closure::once(move |time: f64| {
            pending.set(None);
            callback(time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => self.pending.set(Some(handle)),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    /// Deregister the pending frame, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                window.cancel_animation_frame(handle).ok();
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}
