//! Sky, sun and the parallax decorations behind the road. Nothing here takes
//! part in collisions or game state.

use rand::Rng;

use crate::engine::surface::{Color, Surface};
use crate::game::camera::Viewport;

const STAR_COUNT: usize = 150;
const CLOUD_COUNT: usize = 8;
const CLOUD_PARTS: usize = 6;
const CLOUD_MARGIN: f64 = 400.0;

const MAX_ZIGZAGS: usize = 4;
const ZIGZAG_SPAWN_CHANCE: f64 = 0.03;
const ZIGZAG_FADE: f64 = 0.04;
const ZIGZAG_STEPS: usize = 4;

// Horizontal shift per unit of player lateral offset, nearer layers move more.
const ZIGZAG_PARALLAX: f64 = 40.0;
const SUN_PARALLAX: f64 = 60.0;
const STAR_PARALLAX: f64 = 80.0;
const CLOUD_PARALLAX: f64 = 120.0;

const SKY_TOP: Color = Color(0x050010);
const SKY_BOTTOM: Color = Color(0x2d0245);
const SUN_RADIUS: f64 = 160.0;

pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

pub struct CloudPart {
    pub dx: f64,
    pub dy: f64,
    pub w: f64,
    pub h: f64,
}

pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub parts: Vec<CloudPart>,
}

pub struct Zigzag {
    pub points: Vec<(f64, f64)>,
    pub alpha: f64,
    pub color: Color,
}

pub struct Ambient {
    pub stars: Vec<Star>,
    pub clouds: Vec<Cloud>,
    pub zigzags: Vec<Zigzag>,
}

impl Ambient {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen::<f64>() * viewport.width,
                y: rng.gen::<f64>() * viewport.horizon,
                size: rng.gen::<f64>() * 2.0,
            })
            .collect();

        let clouds = (0..CLOUD_COUNT)
            .map(|_| {
                let x = rng.gen::<f64>() * viewport.width;
                let y = 100.0 + rng.gen::<f64>() * 300.0;
                let parts = (0..CLOUD_PARTS)
                    .map(|_| CloudPart {
                        dx: rng.gen::<f64>() * 150.0 - 75.0,
                        dy: rng.gen::<f64>() * 60.0 - 30.0,
                        w: 150.0 + rng.gen::<f64>() * 100.0,
                        h: 40.0 + rng.gen::<f64>() * 40.0,
                    })
                    .collect();
                Cloud { x, y, parts }
            })
            .collect();

        Ambient { stars, clouds, zigzags: Vec::new() }
    }

    /// Maybe spawns a zigzag, then fades all of them one step.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: &Viewport) {
        if self.zigzags.len() < MAX_ZIGZAGS && rng.gen::<f64>() < ZIGZAG_SPAWN_CHANCE {
            let mut x = rng.gen::<f64>() * viewport.width;
            let mut y = rng.gen::<f64>() * viewport.horizon * 0.4;
            let mut points = vec![(x, y)];
            for _ in 0..ZIGZAG_STEPS {
                x += rng.gen::<f64>() * 120.0 - 60.0;
                y += rng.gen::<f64>() * 60.0 + 20.0;
                points.push((x, y));
            }
            let color = if rng.gen_bool(0.5) { Color::CYAN } else { Color::MAGENTA };
            self.zigzags.push(Zigzag { points, alpha: 1.0, color });
        }
        self.fade();
    }

    pub fn fade(&mut self) {
        for zigzag in &mut self.zigzags {
            zigzag.alpha -= ZIGZAG_FADE;
        }
        self.zigzags.retain(|z| z.alpha > 0.0);
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: &Viewport, lateral: f64) {
        surface.fill_gradient_rect(0.0, 0.0, viewport.width, viewport.horizon, SKY_TOP, SKY_BOTTOM, 1.0);

        for star in &self.stars {
            let x = (star.x - lateral * STAR_PARALLAX).rem_euclid(viewport.width);
            surface.fill_rect(x, star.y, star.size, star.size, Color::WHITE, 0.7);
        }

        draw_sun(surface, viewport, viewport.half_width() - lateral * SUN_PARALLAX);
        surface.fill_rect(0.0, viewport.horizon, viewport.width, viewport.height - viewport.horizon, SKY_BOTTOM, 1.0);

        for cloud in &self.clouds {
            let mut cx = (cloud.x - lateral * CLOUD_PARALLAX) % viewport.width;
            if cx < -CLOUD_MARGIN {
                cx += viewport.width + CLOUD_MARGIN;
            }
            if cx > viewport.width + CLOUD_MARGIN {
                cx -= viewport.width + CLOUD_MARGIN;
            }
            for part in &cloud.parts {
                surface.fill_rounded_rect(cx + part.dx, cloud.y + part.dy, part.w, part.h, 20.0, Color(0x4b0082), 0.3);
            }
        }

        let shift = lateral * ZIGZAG_PARALLAX;
        for zigzag in &self.zigzags {
            for pair in zigzag.points.windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];
                surface.line(
                    (x1 - shift) % viewport.width,
                    y1,
                    (x2 - shift) % viewport.width,
                    y2,
                    4.0,
                    zigzag.color,
                    zigzag.alpha,
                );
            }
        }
    }
}

/// Striped synthwave sun sitting on the horizon.
fn draw_sun<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, x: f64) {
    let r = SUN_RADIUS;
    let y = viewport.horizon - (r - 15.0);
    let highlight = Color(0xfff000);
    let shadow = Color(0xff3300);

    surface.fill_circle(x, y, r, shadow, 1.0);
    surface.fill_gradient_circle(x - r * 0.1, y - r * 0.15, r * 0.85, highlight, shadow, 0.8);
    for i in 0..5 {
        let band = y + r * 0.3 + i as f64 * r * 0.18;
        if band < viewport.horizon {
            surface.line(x - r, band, x + r, band, r * 0.08, Color(0x1a0033), 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::testing::{Call, RecordingSurface};
    use crate::game::config::ViewportConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn viewport() -> Viewport {
        Viewport::from_config(&ViewportConfig::default())
    }

    #[test]
    fn generated_layers_stay_in_the_sky() {
        let v = viewport();
        let ambient = Ambient::generate(&mut SmallRng::seed_from_u64(5), &v);
        assert_eq!(ambient.stars.len(), STAR_COUNT);
        assert!(ambient.stars.iter().all(|s| s.y < v.horizon && s.x < v.width));
        assert_eq!(ambient.clouds.len(), CLOUD_COUNT);
        assert!(ambient.clouds.iter().all(|c| c.parts.len() == CLOUD_PARTS));
    }

    #[test]
    fn zigzags_fade_out_linearly() {
        let mut ambient = Ambient::generate(&mut SmallRng::seed_from_u64(5), &viewport());
        ambient.zigzags.push(Zigzag { points: vec![(0.0, 0.0), (10.0, 30.0)], alpha: 1.0, color: Color::CYAN });

        ambient.fade();
        assert!((ambient.zigzags[0].alpha - 0.96).abs() < 1e-9);
        for _ in 0..30 {
            ambient.fade();
        }
        assert!(ambient.zigzags.is_empty());
    }

    #[test]
    fn zigzag_count_is_capped() {
        let v = viewport();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut ambient = Ambient::generate(&mut rng, &v);
        let mut seen = false;
        for _ in 0..5_000 {
            ambient.update(&mut rng, &v);
            assert!(ambient.zigzags.len() <= MAX_ZIGZAGS);
            seen |= !ambient.zigzags.is_empty();
        }
        assert!(seen);
        for z in &ambient.zigzags {
            assert_eq!(z.points.len(), ZIGZAG_STEPS + 1);
        }
    }

    #[test]
    fn stars_shift_with_lateral_offset() {
        let v = viewport();
        let mut ambient = Ambient::generate(&mut SmallRng::seed_from_u64(5), &v);
        ambient.stars = vec![Star { x: 10.0, y: 50.0, size: 1.0 }];
        ambient.clouds.clear();

        let mut surface = RecordingSurface::default();
        ambient.draw(&mut surface, &v, 1.0);
        let star_x = surface.calls.iter().find_map(|c| match c {
            Call::Rect { x, color, .. } if *color == Color::WHITE => Some(*x),
            _ => None,
        });
        // 10 - 80 wraps around to the right edge.
        assert_eq!(star_x, Some(1850.0));
    }
}
