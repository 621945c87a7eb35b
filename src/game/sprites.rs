use std::f64::consts::PI;

use crate::engine::surface::{Color, Surface};
use crate::game::camera::{ProjectedPoint, Viewport};

// World-unit sizes, scaled by the perspective factor of the owning segment.
const CAR_WIDTH: f64 = 700.0;
const CAR_HEIGHT: f64 = 600.0;
const CAR_SHADOW_HEIGHT: f64 = 20.0;
const CAR_SIDE_PARALLAX: f64 = 100.0;

const TRUNK_BASE_WIDTH: f64 = 75.0;
const TRUNK_TOP_WIDTH: f64 = 20.0;
const TRUNK_HEIGHT: f64 = 1300.0;
const FROND_WIDTH: f64 = 260.0;
const FROND_HEIGHT: f64 = 70.0;
const FROND_COUNT: usize = 7;

/// Trapezoid from a bottom edge at `y0` (half-width `w0`) to a top edge at
/// `y1` (half-width `w1`), both centred on `cx`.
fn trapezoid(cx: f64, y0: f64, w0: f64, y1: f64, w1: f64) -> [(f64, f64); 4] {
    [(cx - w0, y0), (cx + w0, y0), (cx + w1, y1), (cx - w1, y1)]
}

pub fn draw_ai_car<S: Surface + ?Sized>(
    surface: &mut S,
    p: &ProjectedPoint,
    lateral: f64,
    color: Color,
    player_lateral: f64,
    viewport: &Viewport,
) {
    let cx = p.lateral_x(lateral);
    let cy = p.y;
    let w = CAR_WIDTH * p.scale * viewport.half_width();
    let h = CAR_HEIGHT * p.scale * viewport.half_height();
    let side = (lateral - player_lateral) * CAR_SIDE_PARALLAX * p.scale * viewport.half_width();

    surface.fill_ellipse(cx, cy, w * 1.1, CAR_SHADOW_HEIGHT * p.scale * viewport.half_height(), Color::BLACK, 0.4);

    // The flank facing the camera shows on the side opposite the car's offset.
    let flank = if side > 0.0 {
        [(cx - w * 0.5, cy), (cx - w * 0.45, cy - h * 0.4), (cx - w * 0.45 - side, cy - h * 0.4), (cx - w * 0.5 - side, cy)]
    } else {
        [(cx + w * 0.5, cy), (cx + w * 0.45, cy - h * 0.4), (cx + w * 0.45 - side, cy - h * 0.4), (cx + w * 0.5 - side, cy)]
    };
    surface.fill_quad(flank, color.darken(50), 1.0);

    surface.fill_quad(trapezoid(cx, cy, w * 0.5, cy - h * 0.4, w * 0.45), color, 1.0);
    surface.fill_quad(trapezoid(cx, cy - h * 0.4, w * 0.45, cy - h * 0.55, w * 0.42), color.darken(20), 1.0);
    surface.fill_quad(trapezoid(cx, cy - h * 0.55, w * 0.35, cy - h * 0.9, w * 0.25), Color(0x111111), 1.0);

    surface.fill_rect(cx - w * 0.44, cy - h * 0.3, w * 0.18, h * 0.12, Color::RED, 1.0);
    surface.fill_rect(cx + w * 0.26, cy - h * 0.3, w * 0.18, h * 0.12, Color::RED, 1.0);
}

pub fn draw_palm_tree<S: Surface + ?Sized>(surface: &mut S, p: &ProjectedPoint, lateral: f64, viewport: &Viewport) {
    let tx = p.lateral_x(lateral);
    let ty = p.y;
    let base = TRUNK_BASE_WIDTH * p.scale * viewport.half_width();
    let top = TRUNK_TOP_WIDTH * p.scale * viewport.half_width();
    let trunk_h = TRUNK_HEIGHT * p.scale * viewport.half_height();

    surface.fill_quad(trapezoid(tx, ty, base / 2.0, ty - trunk_h, top / 2.0), Color::BLACK, 1.0);

    let leaf_w = FROND_WIDTH * p.scale * viewport.half_width();
    let leaf_h = FROND_HEIGHT * p.scale * viewport.half_height();
    let crown = ty - trunk_h;
    for i in 0..FROND_COUNT {
        // Fan the fronds over the upper half circle, left to right.
        let angle = PI + i as f64 * PI / (FROND_COUNT - 1) as f64;
        let fx = tx + angle.cos() * leaf_w * 0.45;
        let fy = crown + angle.sin() * leaf_h * 0.5;
        surface.fill_ellipse(fx, fy, leaf_w, leaf_h, Color::MAGENTA, 0.8 - i as f64 * 0.05);
    }
}

/// The player's car, fixed at the bottom centre of the screen.
pub fn draw_player_car<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, crashed: bool) {
    let cx = viewport.half_width();
    let cy = viewport.height - 7.0;
    let w = 400.0;
    let h = 150.0;

    let (body, detail, lights) = if crashed {
        (Color(0x333333), Color(0x555555), Color(0x222222))
    } else {
        (Color(0x880000), Color::RED, Color::MAGENTA)
    };

    // Wheels
    surface.fill_rect(cx - w * 0.45, cy - 40.0, 80.0, 60.0, Color(0x222222), 1.0);
    surface.fill_rect(cx + w * 0.45 - 80.0, cy - 40.0, 80.0, 60.0, Color(0x222222), 1.0);

    surface.fill_quad(trapezoid(cx, cy, w * 0.5, cy - h * 0.4, w * 0.48), body, 1.0);
    surface.fill_quad(trapezoid(cx, cy - h * 0.4, w * 0.48, cy - h * 0.65, w * 0.42), detail, 1.0);
    surface.fill_quad(trapezoid(cx, cy - h * 0.65, w * 0.38, cy - h * 1.1, w * 0.28), Color(0x111111), 1.0);

    // Neon tail-light bar
    for i in 0..4 {
        surface.fill_rect(cx - w * 0.42, cy - h * 0.55 + i as f64 * 8.0, w * 0.84, 4.0, lights, 1.0);
    }
}
