use nalgebra::Point3;

use crate::engine::surface::{Color, Surface};
use crate::game::camera::{project, Camera, ProjectedPoint, Viewport};
use crate::game::circuit::{Circuit, Palette};
use crate::game::collision::{CollisionScan, Obstacle};
use crate::game::entities::AiCar;
use crate::game::sprites;

const RUMBLE_RATIO: f64 = 0.05;
const LANE_RATIO: f64 = 0.02;
const LANE_COLOR: Color = Color::YELLOW;

/// Everything one road pass reads.
pub struct RoadScene<'a> {
    pub circuit: &'a Circuit,
    pub camera: &'a Camera,
    pub viewport: &'a Viewport,
    pub traffic: &'a [AiCar],
    pub player_lateral: f64,
    pub max_visible: usize,
}

/// Paints the visible stretch of road far-to-near so nearer strips cover
/// farther ones, with the traffic and trees of each segment on top of its
/// strip. When `scan` is given, every car and tree that is painted is also
/// tested against the player.
pub fn render_road<S: Surface + ?Sized>(surface: &mut S, scene: &RoadScene, mut scan: Option<&mut CollisionScan>) {
    let circuit = scene.circuit;
    let base = circuit.segment_at(scene.camera.position.z).index;

    let car_segments: Vec<usize> = scene
        .traffic
        .iter()
        .map(|car| circuit.segment_at(car.z).index)
        .collect();

    let mut farther: Option<ProjectedPoint> = None;

    for slot in circuit.window(base, scene.max_visible) {
        let segment = circuit.segment(slot.index);
        let near = project(
            Point3::new(0.0, 0.0, slot.world_z),
            scene.camera,
            circuit.road_half_width(),
            scene.viewport,
        );

        if let Some(far) = farther {
            draw_strip(surface, scene.viewport, &near, &far, segment.palette);
        }
        farther = Some(near);

        for (i, car) in scene.traffic.iter().enumerate() {
            if car_segments[i] != slot.index {
                continue;
            }
            sprites::draw_ai_car(surface, &near, car.lateral, car.color, scene.player_lateral, scene.viewport);
            if let Some(scan) = scan.as_deref_mut() {
                scan.check(Obstacle::Car(i), car.z + slot.seam_offset, car.lateral);
            }
        }

        if let Some(decoration) = segment.decoration {
            sprites::draw_palm_tree(surface, &near, decoration.lateral, scene.viewport);
            if let Some(scan) = scan.as_deref_mut() {
                scan.check(Obstacle::Decoration(slot.index), slot.world_z, decoration.lateral);
            }
        }
    }
}

/// One band of road between a segment's near edge and the next segment's.
fn draw_strip<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, near: &ProjectedPoint, far: &ProjectedPoint, palette: Palette) {
    if near.y < viewport.horizon {
        return;
    }
    let colors = palette.colors();
    let top = viewport.horizon.max(far.y);

    surface.fill_rect(0.0, top, viewport.width, near.y - top, colors.grass, 1.0);

    let r1 = near.half_width * RUMBLE_RATIO;
    let r2 = far.half_width * RUMBLE_RATIO;
    let (nl, nr) = (near.x - near.half_width, near.x + near.half_width);
    let (fl, fr) = (far.x - far.half_width, far.x + far.half_width);

    surface.fill_quad([(nl - r1, near.y), (nl, near.y), (fl, top), (fl - r2, top)], colors.rumble, 1.0);
    surface.fill_quad([(nr + r1, near.y), (nr, near.y), (fr, top), (fr + r2, top)], colors.rumble, 1.0);
    surface.fill_quad([(nl, near.y), (nr, near.y), (fr, top), (fl, top)], colors.road, 1.0);

    if palette.has_lane_stripe() {
        let l1 = near.half_width * LANE_RATIO;
        let l2 = far.half_width * LANE_RATIO;
        surface.fill_quad(
            [(near.x - l1, near.y), (near.x + l1, near.y), (far.x + l2, top), (far.x - l2, top)],
            LANE_COLOR,
            1.0,
        );
    }
}
