use crate::game::config::CollisionConfig;

/// Proximity thresholds between the player's car and anything on the road.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionRules {
    /// How far ahead of the camera the player's car is drawn.
    pub forward_offset: f64,
    pub z_threshold: f64,
    pub lateral_threshold: f64,
}

impl CollisionRules {
    pub fn from_config(config: &CollisionConfig) -> Self {
        CollisionRules {
            forward_offset: config.forward_offset,
            z_threshold: config.z_threshold,
            lateral_threshold: config.lateral_threshold,
        }
    }

    pub fn hits(&self, player_z: f64, player_lateral: f64, entity_z: f64, entity_lateral: f64) -> bool {
        let z_diff = (entity_z - (player_z + self.forward_offset)).abs();
        let lateral_diff = (player_lateral - entity_lateral).abs();
        z_diff < self.z_threshold && lateral_diff < self.lateral_threshold
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Obstacle {
    /// Index into the traffic list.
    Car(usize),
    /// Index of the segment carrying the decoration.
    Decoration(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub obstacle: Obstacle,
    pub z: f64,
}

/// Collision test for one render pass. Keeps the first hit in traversal order.
pub struct CollisionScan {
    rules: CollisionRules,
    player_z: f64,
    player_lateral: f64,
    first: Option<Hit>,
}

impl CollisionScan {
    pub fn new(rules: CollisionRules, player_z: f64, player_lateral: f64) -> Self {
        CollisionScan { rules, player_z, player_lateral, first: None }
    }

    pub fn check(&mut self, obstacle: Obstacle, z: f64, lateral: f64) {
        if self.first.is_some() {
            return;
        }
        if self.rules.hits(self.player_z, self.player_lateral, z, lateral) {
            self.first = Some(Hit { obstacle, z });
        }
    }

    pub fn finish(self) -> Option<Hit> {
        self.first
    }
}
