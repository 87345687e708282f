// `Surface` for a 2D canvas context.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::render::{RenderError, StrokeStyle, Surface};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    /// Fails if the canvas is detached or refuses a 2D context.
    pub fn attach(canvas: &HtmlCanvasElement) -> Result<Self, RenderError> {
        if !canvas.is_connected() {
            return Err(RenderError::SurfaceUnavailable);
        }
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(RenderError::SurfaceUnavailable)?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn set_scale(&mut self, scale: f64) -> Result<(), RenderError> {
        self.ctx
            .set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
            .map_err(|e| RenderError::ContextLost(format!("{e:?}")))
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64) -> Result<(), RenderError> {
        self.ctx
            .arc(x, y, radius, 0.0, std::f64::consts::TAU)
            .map_err(|e| RenderError::ContextLost(format!("{e:?}")))
    }

    fn stroke(&mut self, style: StrokeStyle) {
        self.ctx.set_stroke_style_str(style.color());
        self.ctx.set_line_width(style.line_width());
        self.ctx.stroke();
    }
}
