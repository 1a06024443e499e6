use crate::core::{Bounds, GradientStop, Surface};
use anyhow::anyhow;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface`] over a Canvas 2D context.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("get_context error: {:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self { ctx })
    }
}

fn add_stops(gradient: &web::CanvasGradient, stops: &[GradientStop]) {
    for s in stops {
        if let Err(e) = gradient.add_color_stop(s.offset, s.color) {
            log::error!("color stop {} error: {:?}", s.color, e);
        }
    }
}

impl Surface for CanvasSurface {
    fn fill_background(&mut self, bounds: Bounds, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    fn fill_radial_gradient(
        &mut self,
        bounds: Bounds,
        center: Vec2,
        radius: f32,
        stops: &[GradientStop],
    ) {
        let (cx, cy) = (center.x as f64, center.y as f64);
        let gradient = match self
            .ctx
            .create_radial_gradient(cx, cy, 0.0, cx, cy, radius.max(0.0) as f64)
        {
            Ok(g) => g,
            Err(e) => {
                log::error!("radial gradient error: {:?}", e);
                return;
            }
        };
        add_stops(&gradient, stops);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
        self.ctx.restore();
    }

    fn stroke_gradient_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f64,
        stops: &[GradientStop],
        alpha: f32,
    ) {
        let gradient = self.ctx.create_linear_gradient(
            from.x as f64,
            from.y as f64,
            to.x as f64,
            to.y as f64,
        );
        add_stops(&gradient, stops);
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.max(0.0) as f64);
        self.ctx.set_stroke_style_canvas_gradient(&gradient);
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        self.ctx.restore();
    }
}
