use nalgebra::{Point3, Vector3};

use crate::game::config::{CameraConfig, ViewportConfig};

/// Depth below which points are clamped before the perspective divide.
/// Geometry touching the camera pops instead of flipping sign.
pub const NEAR_PLANE: f64 = 1.0;

/// Logical canvas size and the screen row of the horizon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub horizon: f64,
}

impl Viewport {
    pub fn from_config(config: &ViewportConfig) -> Self {
        let height = config.height as f64;
        Viewport {
            width: config.width as f64,
            height,
            horizon: height * config.horizon_ratio,
        }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }
}

pub struct Camera {
    pub position: Point3<f64>,
    pub projection_distance: f64,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let half_fov = (config.fov_degrees / 2.0).to_radians();
        Camera {
            position: Point3::new(0.0, config.height, 0.0),
            projection_distance: 1.0 / half_fov.tan(),
        }
    }

    /// Puts the eye over the player: same depth, shifted sideways by the
    /// player's lateral offset in road half-widths.
    pub fn follow(&mut self, z: f64, lateral: f64, road_half_width: f64) {
        self.position.z = z;
        self.position.x = lateral * road_half_width;
    }
}

/// Screen-space result of projecting one world point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Road half-width at this depth, in pixels.
    pub half_width: f64,
    pub scale: f64,
}

impl ProjectedPoint {
    /// Screen x of something standing `lateral` half-widths off the centreline.
    pub fn lateral_x(&self, lateral: f64) -> f64 {
        self.x + lateral * self.half_width
    }
}

pub fn project(point: Point3<f64>, camera: &Camera, road_half_width: f64, viewport: &Viewport) -> ProjectedPoint {
    let rel: Vector3<f64> = point - camera.position;
    let scale = camera.projection_distance / rel.z.max(NEAR_PLANE);

    ProjectedPoint {
        x: (viewport.half_width() + scale * rel.x * viewport.half_width()).round(),
        y: (viewport.horizon - scale * rel.y * viewport.half_height()).round(),
        half_width: (scale * road_half_width * viewport.half_width()).round(),
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn setup() -> (Camera, Viewport) {
        (
            Camera::new(&CameraConfig::default()),
            Viewport::from_config(&ViewportConfig::default()),
        )
    }

    #[test]
    fn projection_distance_comes_from_fov() {
        let (camera, viewport) = setup();
        assert_relative_eq!(camera.projection_distance, 3f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(viewport.horizon, 702.0, epsilon = 1e-9);
    }

    #[test]
    fn scale_shrinks_with_depth() {
        let (camera, viewport) = setup();
        let mut last = f64::INFINITY;
        for z in [2.0, 10.0, 100.0, 1_000.0, 10_000.0, 1e6, 1e9] {
            let p = project(Point3::new(0.0, 0.0, z), &camera, 1000.0, &viewport);
            assert!(p.scale < last);
            last = p.scale;
        }
        assert!(last < 1e-8);
    }

    #[test]
    fn centred_points_stay_on_the_centre_column() {
        let (mut camera, viewport) = setup();
        camera.follow(500.0, 1.5, 1000.0);
        for z in [600.0, 5_000.0, 90_000.0] {
            let p = project(Point3::new(1500.0, 0.0, z), &camera, 1000.0, &viewport);
            assert_eq!(p.x, 960.0);
        }
    }

    #[test]
    fn ground_point_lands_below_horizon() {
        let (camera, viewport) = setup();
        let p = project(Point3::new(0.0, 0.0, 1000.0), &camera, 1000.0, &viewport);
        assert_relative_eq!(p.scale, 3f64.sqrt() / 1000.0, epsilon = 1e-12);
        assert_eq!(p.y, (702.0 + p.scale * 1000.0 * 540.0).round());
        assert_eq!(p.half_width, (p.scale * 1000.0 * 960.0).round());
        assert!(p.y > viewport.horizon);
    }

    #[test]
    fn points_at_or_behind_camera_use_near_plane() {
        let (camera, viewport) = setup();
        let at = project(Point3::new(0.0, 0.0, 0.0), &camera, 1000.0, &viewport);
        let behind = project(Point3::new(0.0, 0.0, -500.0), &camera, 1000.0, &viewport);
        let near = project(Point3::new(0.0, 0.0, NEAR_PLANE), &camera, 1000.0, &viewport);
        assert_eq!(at, near);
        assert_eq!(behind, near);
        assert!(near.scale.is_finite() && near.scale > 0.0);
    }

    #[test]
    fn lateral_x_offsets_by_half_widths() {
        let p = ProjectedPoint { x: 900.0, y: 800.0, half_width: 40.0, scale: 0.01 };
        assert_eq!(p.lateral_x(0.5), 920.0);
        assert_eq!(p.lateral_x(-2.0), 820.0);
    }
}
