//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::{CameraShake, Tween};
use super::noise::NoiseField;
use super::spawn::Spawner;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Falling object categories, each with its own consequence on catch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Costs a life when caught
    Penalty,
    /// Scores a point when caught
    Bonus,
    /// Grants a life when caught
    Neutral,
}

impl ObjectKind {
    /// Tint used for the object itself, its particle burst and the paddle
    /// flash it triggers
    pub fn color(&self) -> &'static str {
        match self {
            ObjectKind::Penalty => RED,
            ObjectKind::Bonus => YELLOW,
            ObjectKind::Neutral => WHITE,
        }
    }
}

/// A falling object injected by the spawn engine
#[derive(Debug, Clone, Copy)]
pub struct FallingObject {
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed in px/s; objects only ever translate straight down
    pub speed: f32,
    pub kind: ObjectKind,
}

impl FallingObject {
    pub fn fall(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }
}

/// A burst particle left behind when a falling object is removed
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub kind: ObjectKind,
    pub age: f32,
    /// Fixed at creation, in [0.1, 0.3) seconds
    pub lifetime: f32,
}

impl Particle {
    pub const BASE_RADIUS: f32 = 15.0;

    /// Age as a fraction of lifetime, clamped to [0, 1]. The renderer grows
    /// the radius and fades the alpha linearly with this.
    pub fn progress(&self) -> f32 {
        (self.age / self.lifetime).min(1.0)
    }

    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Center x, driven by input and clamped to the play area
    pub x: f32,
    /// Current tint; reverts to the base tint when the flash deadline passes
    pub tint: &'static str,
    pub tween: Tween,
    /// Sim-time deadline for the tint revert. A new flash overwrites any
    /// pending deadline, so only the latest revert ever applies.
    flash_until: Option<f32>,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: PLAY_WIDTH / 2.0,
            tint: BLUE,
            tween: Tween::default(),
            flash_until: None,
        }
    }
}

impl Paddle {
    pub const Y: f32 = PADDLE_Y;
    pub const HEIGHT: f32 = PADDLE_HEIGHT;

    /// Current width: nominal unless the flash tween is running
    pub fn width(&self) -> f32 {
        self.tween.value(PADDLE_WIDTH)
    }

    /// Flash the paddle with a category tint and kick off the width pop
    pub fn flash(&mut self, tint: &'static str, now: f32) {
        self.tint = tint;
        self.flash_until = Some(now + FLASH_DURATION);
        self.tween.begin(PADDLE_WIDTH, PADDLE_WIDTH * 1.25, 3.0);
    }

    /// Advance the tween and the tint-revert timer on the simulation clock
    pub fn update_effects(&mut self, now: f32, dt: f32) {
        self.tween.advance(dt);
        if let Some(deadline) = self.flash_until
            && now >= deadline
        {
            self.tint = BLUE;
            self.flash_until = None;
        }
    }
}

/// A drifting background star (ambient decor, no gameplay effect)
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

/// Number of background stars
pub const STAR_COUNT: usize = 20;

/// Events emitted by a tick for the external sinks (audio, HUD, lifecycle)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An object landed on the paddle
    Caught(ObjectKind),
    /// An object crossed the ground line
    Missed(ObjectKind),
    /// Score or lives changed; carries the new values for the display sink
    ScoreChanged { score: u32, lives: i32 },
    /// Terminal transition; emitted exactly once per run
    GameOver,
}

/// Complete game state, reproducible from a single seed
pub struct GameState {
    pub seed: u64,
    pub score: u32,
    pub lives: i32,
    pub phase: GamePhase,
    /// Monotonic simulation clock in seconds
    pub sim_time: f32,
    pub objects: Vec<FallingObject>,
    pub particles: Vec<Particle>,
    pub paddle: Paddle,
    pub spawner: Spawner,
    pub shake: CameraShake,
    pub stars: Vec<Star>,
    pub noise: NoiseField,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random::<f32>() * PLAY_WIDTH,
                    rng.random::<f32>() * PLAY_HEIGHT,
                ),
                radius: 10.0 + rng.random::<f32>() * 150.0,
                speed: 20.0 + rng.random::<f32>() * 40.0,
            })
            .collect();

        Self {
            seed,
            score: 0,
            lives: START_LIVES,
            phase: GamePhase::Playing,
            sim_time: 0.0,
            objects: Vec::new(),
            particles: Vec::new(),
            paddle: Paddle::default(),
            spawner: Spawner::default(),
            shake: CameraShake::default(),
            stars,
            noise: NoiseField::new(seed),
            rng,
        }
    }

    /// Spawn the one particle that accompanies every object removal
    pub fn spawn_particle(&mut self, pos: Vec2, kind: ObjectKind) {
        let lifetime = 0.1 + self.rng.random::<f32>() * 0.2;
        self.particles.push(Particle {
            pos,
            kind,
            age: 0.0,
            lifetime,
        });
    }

    /// Render offset from the camera shake (zero when inactive)
    pub fn camera_offset(&self) -> Vec2 {
        self.shake.offset(self.sim_time, &self.noise)
    }

    /// Transition to game over. Idempotent: only the Playing -> GameOver edge
    /// emits the event.
    pub fn trigger_game_over(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver);
            log::info!("game over at score {} (seed {})", self.score, self.seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1234);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.objects.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.stars.len(), STAR_COUNT);
    }

    #[test]
    fn test_particle_lifetime_range() {
        let mut state = GameState::new(5);
        for _ in 0..100 {
            state.spawn_particle(Vec2::new(10.0, 10.0), ObjectKind::Bonus);
        }
        for p in &state.particles {
            assert!(p.lifetime >= 0.1 && p.lifetime < 0.3);
        }
    }

    #[test]
    fn test_flash_revert_is_last_write_wins() {
        let mut paddle = Paddle::default();
        paddle.flash(RED, 0.0);
        // Second flash before the first deadline fires
        paddle.flash(YELLOW, 0.05);

        // First deadline (0.1) passes but must not revert the newer flash
        paddle.update_effects(0.1, 0.0);
        assert_eq!(paddle.tint, YELLOW);

        // Newer deadline (0.15) reverts to the base tint
        paddle.update_effects(0.15, 0.0);
        assert_eq!(paddle.tint, BLUE);
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut state = GameState::new(9);
        let mut events = Vec::new();
        state.trigger_game_over(&mut events);
        state.trigger_game_over(&mut events);
        let count = events.iter().filter(|e| **e == GameEvent::GameOver).count();
        assert_eq!(count, 1);
    }
}
