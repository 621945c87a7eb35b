use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("circuit needs at least one segment")]
    NoSegments,
    #[error("segment length must be positive, got {0}")]
    SegmentLength(f64),
    #[error("road half-width must be positive, got {0}")]
    RoadWidth(f64),
    #[error("rumble length must be at least 1")]
    RumbleLength,
    #[error("at least one visible segment is required")]
    NoVisibleSegments,
    #[error("{visible} visible segments do not fit a circuit of {segments}")]
    WindowTooLarge { visible: usize, segments: usize },
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    FieldOfView(f64),
    #[error("viewport must have a positive size and a horizon ratio in (0, 1)")]
    Viewport,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CircuitConfig {
    pub segment_count: usize,
    pub segment_length: f64,
    pub road_half_width: f64,
    pub rumble_length: usize,
    pub decoration_probability: f64,
    pub min_decoration_index: usize,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        CircuitConfig {
            segment_count: 1500,
            segment_length: 100.0,
            road_half_width: 1000.0,
            rumble_length: 3,
            decoration_probability: 0.4,
            min_decoration_index: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub height: f64,
    pub fov_degrees: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig { height: 1000.0, fov_degrees: 60.0 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f64,
    pub steer_step: f64,
    pub lateral_limit: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig { speed: 180.0, steer_step: 0.02, lateral_limit: 2.8 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TrafficConfig {
    pub count: usize,
    pub first_spawn: f64,
    pub spacing: f64,
    pub spawn_jitter: f64,
    pub lane_offset: f64,
    pub min_speed: f64,
    pub speed_range: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        TrafficConfig {
            count: 8,
            first_spawn: 5000.0,
            spacing: 16000.0,
            spawn_jitter: 2000.0,
            lane_offset: 0.5,
            min_speed: 70.0,
            speed_range: 30.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    pub forward_offset: f64,
    pub z_threshold: f64,
    pub lateral_threshold: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        CollisionConfig { forward_offset: 700.0, z_threshold: 120.0, lateral_threshold: 0.5 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub max_visible_segments: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig { max_visible_segments: 200 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub horizon_ratio: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig { width: 1920, height: 1080, horizon_ratio: 0.65 }
    }
}

/// Everything tunable about a run. Missing JSON fields fall back to defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub circuit: CircuitConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub traffic: TrafficConfig,
    pub collision: CollisionConfig,
    pub render: RenderConfig,
    pub viewport: ViewportConfig,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.circuit;
        if c.segment_count == 0 {
            return Err(ConfigError::NoSegments);
        }
        if !(c.segment_length > 0.0) {
            return Err(ConfigError::SegmentLength(c.segment_length));
        }
        if !(c.road_half_width > 0.0) {
            return Err(ConfigError::RoadWidth(c.road_half_width));
        }
        if c.rumble_length == 0 {
            return Err(ConfigError::RumbleLength);
        }

        let visible = self.render.max_visible_segments;
        if visible == 0 {
            return Err(ConfigError::NoVisibleSegments);
        }
        // The window starts one past the base segment and must not lap it.
        if visible >= c.segment_count {
            return Err(ConfigError::WindowTooLarge { visible, segments: c.segment_count });
        }

        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::FieldOfView(fov));
        }

        let v = &self.viewport;
        if v.width == 0 || v.height == 0 || !(v.horizon_ratio > 0.0 && v.horizon_ratio < 1.0) {
            return Err(ConfigError::Viewport);
        }
        Ok(())
    }
}
