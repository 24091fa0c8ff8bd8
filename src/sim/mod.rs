//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod noise;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{overlaps_paddle, resolve_collisions};
pub use effects::{CameraShake, Tween};
pub use noise::NoiseField;
pub use spawn::{SpawnCommand, Spawner};
pub use state::{FallingObject, GameEvent, GamePhase, GameState, ObjectKind, Paddle, Particle};
pub use tick::{TickInput, tick};
