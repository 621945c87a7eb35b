use rand::Rng;

use crate::engine::surface::Color;
use crate::game::config::{PlayerConfig, TrafficConfig};

const AI_COLORS: [Color; 2] = [Color::CYAN, Color::YELLOW];

pub struct Player {
    pub z: f64,
    pub lateral: f64,
    pub speed: f64,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Player { z: 0.0, lateral: 0.0, speed: config.speed }
    }

    /// Applies one frame of steering, then pins the car between the road edges.
    pub fn steer(&mut self, left: bool, right: bool, config: &PlayerConfig) {
        if left {
            self.lateral -= config.steer_step;
        }
        if right {
            self.lateral += config.steer_step;
        }
        self.lateral = self.lateral.clamp(-config.lateral_limit, config.lateral_limit);
    }

    pub fn advance(&mut self, total_length: f64) {
        self.z = (self.z + self.speed).rem_euclid(total_length);
    }

    pub fn reset(&mut self) {
        self.z = 0.0;
        self.lateral = 0.0;
    }
}

pub struct AiCar {
    pub z: f64,
    /// Where the car returns to after a crash is acknowledged.
    pub spawn_z: f64,
    pub lateral: f64,
    pub speed: f64,
    pub color: Color,
}

impl AiCar {
    pub fn advance(&mut self, total_length: f64) {
        self.z = (self.z + self.speed).rem_euclid(total_length);
    }

    pub fn reset(&mut self) {
        self.z = self.spawn_z;
    }
}

/// Spreads the traffic along the circuit. The first placement is jittered;
/// resets go back to the unjittered slot.
pub fn spawn_traffic<R: Rng + ?Sized>(config: &TrafficConfig, total_length: f64, rng: &mut R) -> Vec<AiCar> {
    (0..config.count)
        .map(|i| {
            let spawn_z = (config.first_spawn + i as f64 * config.spacing).rem_euclid(total_length);
            let z = (spawn_z + rng.gen::<f64>() * config.spawn_jitter).rem_euclid(total_length);
            let lateral = if rng.gen_bool(0.5) { config.lane_offset } else { -config.lane_offset };
            let speed = config.min_speed + rng.gen::<f64>() * config.speed_range;
            let color = AI_COLORS[rng.gen_range(0..AI_COLORS.len())];
            AiCar { z, spawn_z, lateral, speed, color }
        })
        .collect()
}
