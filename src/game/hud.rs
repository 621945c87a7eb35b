use crate::engine::surface::{Color, Surface, TextAlign, TextStyle};
use crate::game::camera::Viewport;
use crate::game::Phase;

const SCORE_STYLE: TextStyle = TextStyle { font: "bold 60px monospace", color: Color::CYAN, align: TextAlign::Right };

pub fn score_label(score: u32) -> String {
    format!("{:06}", score)
}

pub fn caption(phase: Phase, score: u32) -> Option<String> {
    match phase {
        Phase::Running => None,
        Phase::Paused => Some(format!("SCORE: {}", score)),
        Phase::Crashed => Some(format!("CRASHED! SCORE: {}", score)),
    }
}

pub fn draw<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, phase: Phase, score: u32, now_ms: f64) {
    let (w, h) = (viewport.width, viewport.height);

    surface.fill_rect(w - 380.0, 115.0, 350.0, 100.0, Color::BLACK, 0.5);
    surface.stroke_rect(w - 380.0, 115.0, 350.0, 100.0, 2.0, Color::CYAN, 0.8);

    if phase != Phase::Running {
        draw_pause_overlay(surface, viewport, phase == Phase::Crashed, now_ms);
    }

    surface.text(w - 50.0, 130.0, &score_label(score), &SCORE_STYLE);

    if let Some(text) = caption(phase, score) {
        let color = if phase == Phase::Crashed { Color::RED } else { Color::CYAN };
        let style = TextStyle { font: "30px monospace", color, align: TextAlign::Center };
        surface.text(w / 2.0, h / 2.0 + 50.0, &text, &style);
    }
}

fn draw_pause_overlay<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, crashed: bool, now_ms: f64) {
    let (w, h) = (viewport.width, viewport.height);
    surface.fill_rect(0.0, 0.0, w, h, Color::BLACK, 0.7);
    surface.stroke_rounded_rect(w / 2.0 - 250.0, h / 2.0 - 120.0, 500.0, 300.0, 40.0, 6.0, Color::CYAN, 1.0);

    let pulse = (now_ms / 200.0).sin() * 0.2 + 0.8;
    let size = 40.0;
    let (cx, cy) = (w / 2.0, h / 2.0 - 20.0);
    let play = [(cx - size, cy - size), (cx + size + 10.0, cy), (cx - size, cy + size)];
    surface.fill_polygon(&play, Color::MAGENTA, pulse);
    surface.stroke_polygon(&play, 4.0, Color::CYAN, pulse);

    if crashed {
        surface.fill_rect(cx - 150.0, cy + 160.0, 300.0, 5.0, Color::RED, 1.0);
    }
}
