use std::f64::consts::PI;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::surface::{Color, Surface, TextAlign, TextStyle};

/// `Surface` backed by a browser 2D canvas context.
pub struct CanvasRenderer {
    pub ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Result<Self, JsValue> {
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")?
            .ok_or("No 2D context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(CanvasRenderer { ctx })
    }

    pub fn clear(&self, color: Color) {
        let canvas = match self.canvas() {
            Some(c) => c,
            None => return,
        };
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&color.to_css(1.0));
        self.ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }

    pub fn canvas(&self) -> Option<HtmlCanvasElement> {
        self.ctx.canvas()
    }

    fn trace(&self, points: &[(f64, f64)]) {
        self.ctx.begin_path();
        if let Some((&(x, y), rest)) = points.split_first() {
            self.ctx.move_to(x, y);
            for &(x, y) in rest {
                self.ctx.line_to(x, y);
            }
        }
        self.ctx.close_path();
    }

    fn trace_rounded(&self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        self.ctx.arc_to(x + w, y, x + w, y + h, r).ok();
        self.ctx.arc_to(x + w, y + h, x, y + h, r).ok();
        self.ctx.arc_to(x, y + h, x, y, r).ok();
        self.ctx.arc_to(x, y, x + w, y, r).ok();
        self.ctx.close_path();
    }

    fn set_vertical_gradient(&self, y0: f64, y1: f64, top: Color, bottom: Color) {
        let gradient = self.ctx.create_linear_gradient(0.0, y0, 0.0, y1);
        gradient.add_color_stop(0.0, &top.to_css(1.0)).ok();
        gradient.add_color_stop(1.0, &bottom.to_css(1.0)).ok();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
    }
}

impl Surface for CanvasRenderer {
    fn fill_polygon(&mut self, points: &[(f64, f64)], color: Color, alpha: f64) {
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        self.trace(points);
        self.ctx.fill();
    }

    fn stroke_polygon(&mut self, points: &[(f64, f64)], width: f64, color: Color, alpha: f64) {
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.to_css(alpha));
        self.trace(points);
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, alpha: f64) {
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, width: f64, color: Color, alpha: f64) {
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.to_css(alpha));
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, color: Color, alpha: f64) {
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        self.trace_rounded(x, y, w, h, radius);
        self.ctx.fill();
    }

    fn stroke_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64, width: f64, color: Color, alpha: f64) {
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.to_css(alpha));
        self.trace_rounded(x, y, w, h, radius);
        self.ctx.stroke();
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64, color: Color, alpha: f64) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css(alpha));
        self.ctx.begin_path();
        self.ctx.ellipse(cx, cy, w / 2.0, h / 2.0, 0.0, 0.0, 2.0 * PI).ok();
        self.ctx.fill();
    }

    fn fill_gradient_rect(&mut self, x: f64, y: f64, w: f64, h: f64, top: Color, bottom: Color, alpha: f64) {
        self.set_vertical_gradient(y, y + h, top, bottom);
        self.ctx.set_global_alpha(alpha);
        self.ctx.fill_rect(x, y, w, h);
        self.ctx.set_global_alpha(1.0);
    }

    fn fill_gradient_circle(&mut self, cx: f64, cy: f64, radius: f64, top: Color, bottom: Color, alpha: f64) {
        if radius <= 0.0 {
            return;
        }
        self.set_vertical_gradient(cy - radius, cy + radius, top, bottom);
        self.ctx.set_global_alpha(alpha);
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, radius, 0.0, 2.0 * PI).ok();
        self.ctx.fill();
        self.ctx.set_global_alpha(1.0);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color, alpha: f64) {
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style_str(&color.to_css(alpha));
        self.ctx.begin_path();
        self.ctx.move_to(x1, y1);
        self.ctx.line_to(x2, y2);
        self.ctx.stroke();
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(&style.color.to_css(1.0));
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_text_baseline("top");
        self.ctx.fill_text(text, x, y).ok();
    }
}
