pub mod ambient;
pub mod camera;
pub mod circuit;
pub mod collision;
pub mod config;
pub mod entities;
pub mod hud;
pub mod road;
pub mod sprites;

use rand::rngs::SmallRng;

use crate::engine::surface::{NullSurface, Surface};
use crate::game::ambient::Ambient;
use crate::game::camera::{Camera, Viewport};
use crate::game::circuit::Circuit;
use crate::game::collision::{CollisionRules, CollisionScan, Hit, Obstacle};
use crate::game::config::{ConfigError, GameConfig};
use crate::game::entities::{spawn_traffic, AiCar, Player};
use crate::game::road::RoadScene;

/// Host input sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Pause / resume / acknowledge-crash, at most once per user action.
    pub action: bool,
    pub now_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Paused,
    Running,
    Crashed,
}

pub struct Game {
    pub config: GameConfig,
    pub circuit: Circuit,
    pub camera: Camera,
    pub viewport: Viewport,
    pub collision: CollisionRules,
    pub player: Player,
    pub traffic: Vec<AiCar>,
    pub ambient: Ambient,
    rng: SmallRng,
    phase: Phase,
    score: u32,
}

impl Game {
    pub fn new(config: GameConfig, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let circuit = Circuit::build(&config.circuit, &mut rng);
        let viewport = Viewport::from_config(&config.viewport);
        let traffic = spawn_traffic(&config.traffic, circuit.total_length(), &mut rng);
        let ambient = Ambient::generate(&mut rng, &viewport);

        Ok(Game {
            camera: Camera::new(&config.camera),
            collision: CollisionRules::from_config(&config.collision),
            player: Player::new(&config.player),
            circuit,
            viewport,
            traffic,
            ambient,
            rng,
            phase: Phase::Paused,
            score: 0,
            config,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dead(&self) -> bool {
        self.phase == Phase::Crashed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_label(&self) -> String {
        hud::score_label(self.score)
    }

    /// Pause/resume, or after a crash put everything back on the grid.
    pub fn trigger_action(&mut self) {
        self.phase = match self.phase {
            Phase::Crashed => {
                self.score = 0;
                self.player.reset();
                for car in &mut self.traffic {
                    car.reset();
                }
                log::info!("crash acknowledged, back to the start");
                Phase::Paused
            }
            Phase::Running => {
                log::info!("paused at score {}", self.score);
                Phase::Paused
            }
            Phase::Paused => {
                log::info!("running");
                Phase::Running
            }
        };
    }

    /// Advances the simulation one frame. Does nothing unless running.
    pub fn update(&mut self, input: &FrameInput) {
        if self.phase != Phase::Running {
            return;
        }
        self.score = self.score.saturating_add(1);

        let total = self.circuit.total_length();
        self.player.steer(input.left, input.right, &self.config.player);
        self.player.advance(total);
        for car in &mut self.traffic {
            car.advance(total);
        }
    }

    /// One complete frame: input, simulation, collision and drawing.
    pub fn frame<S: Surface + ?Sized>(&mut self, input: FrameInput, surface: &mut S) {
        if input.action {
            self.trigger_action();
        }
        self.update(&input);

        self.camera.follow(self.player.z, self.player.lateral, self.circuit.road_half_width());

        self.ambient.update(&mut self.rng, &self.viewport);
        self.ambient.draw(surface, &self.viewport, self.player.lateral);

        let mut scan = (self.phase == Phase::Running)
            .then(|| CollisionScan::new(self.collision, self.player.z, self.player.lateral));
        let scene = RoadScene {
            circuit: &self.circuit,
            camera: &self.camera,
            viewport: &self.viewport,
            traffic: &self.traffic,
            player_lateral: self.player.lateral,
            max_visible: self.config.render.max_visible_segments,
        };
        road::render_road(surface, &scene, scan.as_mut());

        if let Some(hit) = scan.and_then(CollisionScan::finish) {
            self.crash(hit);
        }

        sprites::draw_player_car(surface, &self.viewport, self.is_dead());
        hud::draw(surface, &self.viewport, self.phase, self.score, input.now_ms);
    }

    /// Runs a frame without drawing anything.
    pub fn step(&mut self, input: FrameInput) {
        self.frame(input, &mut NullSurface);
    }

    fn crash(&mut self, hit: Hit) {
        let what = match hit.obstacle {
            Obstacle::Car(i) => format!("car {}", i),
            Obstacle::Decoration(segment) => format!("palm tree on segment {}", segment),
        };
        log::info!("crashed into {} at z={:.0}, score {}", what, hit.z, self.score);
        self.phase = Phase::Crashed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::testing::RecordingSurface;
    use crate::engine::surface::Color;
    use rand::SeedableRng;

    fn game() -> Game {
        let mut game = Game::new(GameConfig::default(), SmallRng::seed_from_u64(42)).unwrap();
        // Keep the random traffic out of the way of the scripted scenarios.
        for car in &mut game.traffic {
            car.lateral = 2.5;
        }
        game
    }

    fn action() -> FrameInput {
        FrameInput { action: true, ..FrameInput::default() }
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn starts_paused_and_frozen() {
        let mut g = game();
        assert_eq!(g.phase(), Phase::Paused);
        g.step(idle());
        g.step(idle());
        assert_eq!(g.score(), 0);
        assert_eq!(g.player.z, 0.0);
    }

    #[test]
    fn action_toggles_between_running_and_paused() {
        let mut g = game();
        g.step(action());
        assert_eq!(g.phase(), Phase::Running);
        assert_eq!(g.score(), 1);
        g.step(idle());
        assert_eq!(g.score(), 2);
        assert_eq!(g.player.z, 360.0);

        g.step(action());
        assert_eq!(g.phase(), Phase::Paused);
        g.step(idle());
        assert_eq!(g.score(), 2);
    }

    #[test]
    fn steering_applies_only_while_running() {
        let mut g = game();
        g.step(FrameInput { right: true, ..idle() });
        assert_eq!(g.player.lateral, 0.0);

        g.step(action());
        g.step(FrameInput { right: true, ..idle() });
        assert!((g.player.lateral - 0.02).abs() < 1e-12);
        for _ in 0..400 {
            g.update(&FrameInput { left: true, ..idle() });
        }
        assert_eq!(g.player.lateral, -2.8);
    }

    #[test]
    fn crash_freezes_score_and_reset_restores_spawns() {
        let mut g = game();
        g.step(action());
        g.step(idle());
        assert_eq!(g.score(), 2);

        let ahead = g.player.z + g.collision.forward_offset;
        g.traffic.push(AiCar {
            z: ahead,
            spawn_z: 9_000.0,
            lateral: g.player.lateral,
            speed: g.player.speed,
            color: Color::YELLOW,
        });

        g.step(idle());
        assert!(g.is_dead());
        assert_eq!(g.phase(), Phase::Crashed);
        let frozen = g.score();
        assert_eq!(frozen, 3);

        g.step(FrameInput { right: true, ..idle() });
        g.step(idle());
        assert_eq!(g.score(), frozen);
        assert_eq!(g.player.lateral, 0.0);

        g.step(action());
        assert_eq!(g.phase(), Phase::Paused);
        assert_eq!(g.score(), 0);
        assert_eq!(g.player.z, 0.0);
        assert_eq!(g.player.lateral, 0.0);
        for car in &g.traffic {
            assert_eq!(car.z, car.spawn_z);
        }
        assert_eq!(g.traffic.last().map(|c| c.z), Some(9_000.0));
    }

    #[test]
    fn no_collision_checks_while_paused() {
        let mut g = game();
        let ahead = g.player.z + g.collision.forward_offset;
        g.traffic.push(AiCar { z: ahead, spawn_z: ahead, lateral: 0.0, speed: 0.0, color: Color::CYAN });
        g.step(idle());
        assert_eq!(g.phase(), Phase::Paused);
    }

    #[test]
    fn player_wraps_around_the_circuit() {
        let mut g = game();
        g.traffic.clear();
        g.step(action());
        g.player.z = g.circuit.total_length() - 100.0;
        g.step(idle());
        assert_eq!(g.player.z, 80.0);
        assert_eq!(g.phase(), Phase::Running);
    }

    #[test]
    fn frame_draws_hud_with_padded_score() {
        let mut g = game();
        let mut surface = RecordingSurface::default();
        g.frame(action(), &mut surface);
        assert_eq!(g.score_label(), "000001");
        assert!(surface.texts().contains(&"000001"));
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut g = game();
        g.traffic.clear();
        g.step(action());
        g.score = u32::MAX - 1;
        g.step(idle());
        g.step(idle());
        assert_eq!(g.score(), u32::MAX);
        assert_eq!(g.phase(), Phase::Running);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.circuit.segment_count = 0;
        let err = Game::new(config, SmallRng::seed_from_u64(1)).err();
        assert_eq!(err, Some(ConfigError::NoSegments));
    }
}
