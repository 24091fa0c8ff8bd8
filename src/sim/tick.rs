//! Per-frame simulation tick
//!
//! Single authoritative update: clock, ambient decor, paddle input, spawn
//! engine, entity population, collision resolution, in that order. Rendering
//! is a separate read-only pass.

use super::collision::resolve_collisions;
use super::state::{FallingObject, GameEvent, GamePhase, GameState};
use crate::consts::*;
use rand::Rng;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer/touch x, if the pointer has moved
    pub pointer_x: Option<f32>,
    /// Directional key hold flags; keyboard wins over the pointer while held
    pub left_held: bool,
    pub right_held: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the game by `dt` seconds, appending events for the external sinks
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // No partial-frame work while paused or after the terminal transition
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.sim_time += dt;
    let now = state.sim_time;

    // Ambient decor: stars drift down and wrap to a fresh column
    for star in &mut state.stars {
        star.pos.y += star.speed * dt;
        if star.pos.y > PLAY_HEIGHT {
            star.pos.y = -star.radius * 2.0;
            star.pos.x = state.rng.random::<f32>() * PLAY_WIDTH;
        }
    }

    // Paddle position from the latest input target
    if input.left_held || input.right_held {
        let mut dx = 0.0;
        if input.left_held {
            dx -= KEYBOARD_SPEED * dt;
        }
        if input.right_held {
            dx += KEYBOARD_SPEED * dt;
        }
        state.paddle.x += dx;
    } else if let Some(x) = input.pointer_x {
        state.paddle.x = x;
    }
    state.paddle.x = state.paddle.x.clamp(0.0, PLAY_WIDTH);

    // Effect timers run on the simulation clock, not the draw rate
    state.paddle.update_effects(now, dt);

    // Spawn engine: at most one new object per frame
    if let Some(cmd) = state.spawner.advance(dt, &state.noise, &mut state.rng) {
        state.objects.push(FallingObject {
            pos: cmd.pos,
            radius: cmd.radius,
            speed: cmd.speed,
            kind: cmd.kind,
        });
    }

    // Entity population: translate objects, age particles, prune the expired.
    // The population owns particle removal; nothing else drops them.
    for obj in &mut state.objects {
        obj.fall(dt);
    }
    for particle in &mut state.particles {
        particle.age += dt;
    }
    state.particles.retain(|p| !p.expired());

    resolve_collisions(state, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObjectKind;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn run(state: &mut GameState, input: &TickInput, frames: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            tick(state, input, DT, &mut events);
        }
        events
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let input = TickInput {
            pointer_x: Some(321.0),
            ..Default::default()
        };

        run(&mut a, &input, 1200);
        run(&mut b, &input, 1200);

        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.objects.len(), b.objects.len());
        assert_eq!(a.particles.len(), b.particles.len());
        assert_eq!(a.sim_time.to_bits(), b.sim_time.to_bits());
        assert_eq!(a.paddle.x.to_bits(), b.paddle.x.to_bits());
    }

    #[test]
    fn test_spawner_populates_over_time() {
        let mut state = GameState::new(7);
        // Park the paddle in a corner so catches don't interfere
        let input = TickInput {
            pointer_x: Some(0.0),
            ..Default::default()
        };
        let mut saw_objects = false;
        let mut events = Vec::new();
        for _ in 0..1800 {
            tick(&mut state, &input, DT, &mut events);
            saw_objects |= !state.objects.is_empty();
        }
        assert!(saw_objects, "spawn engine never injected an object");
    }

    #[test]
    fn test_particle_removal_is_eventual() {
        let mut state = GameState::new(8);
        state.spawn_particle(Vec2::new(100.0, 100.0), ObjectKind::Bonus);
        let lifetime = state.particles[0].lifetime;

        let frames = (lifetime / DT).ceil() as usize;
        let input = TickInput::default();
        run(&mut state, &input, frames);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_pause_freezes_the_clock() {
        let mut state = GameState::new(9);
        let mut events = Vec::new();

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, DT, &mut events);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.sim_time;

        tick(&mut state, &TickInput::default(), DT, &mut events);
        assert_eq!(state.sim_time, frozen);

        // Toggle back and time flows again
        tick(&mut state, &TickInput { pause: true, ..Default::default() }, DT, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.sim_time > frozen);
    }

    #[test]
    fn test_no_mutation_after_game_over() {
        let mut state = GameState::new(10);
        state.phase = GamePhase::GameOver;
        let before = state.sim_time;
        run(&mut state, &TickInput::default(), 10);
        assert_eq!(state.sim_time, before);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_keyboard_overrides_pointer_while_held() {
        let mut state = GameState::new(11);
        let start_x = state.paddle.x;
        let input = TickInput {
            pointer_x: Some(10.0),
            right_held: true,
            ..Default::default()
        };
        run(&mut state, &input, 1);
        assert!(state.paddle.x > start_x, "keyboard hold should win");
    }

    #[test]
    fn test_paddle_clamped_to_play_area() {
        let mut state = GameState::new(12);
        let input = TickInput {
            pointer_x: Some(5000.0),
            ..Default::default()
        };
        run(&mut state, &input, 1);
        assert_eq!(state.paddle.x, PLAY_WIDTH);

        let input = TickInput {
            left_held: true,
            ..Default::default()
        };
        run(&mut state, &input, 2000);
        assert_eq!(state.paddle.x, 0.0);
    }
}
