//! Transient visual-effect state machines
//!
//! Tween and camera shake are pure state + clock; the renderer only reads
//! them. Both advance on the simulation clock, not the draw rate, so effect
//! speed is independent of frame rate.

use glam::Vec2;

use super::noise::NoiseField;
use crate::consts::TWEEN_UNIT_RATE;

/// Width tween for the paddle flash pop.
///
/// While active, progress moves monotonically from 0 to 1 and the interpolated
/// value is `lerp(start, end, t)`. At t = 1 the tween deactivates and the
/// owner falls back to its nominal value exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tween {
    pub active: bool,
    pub t: f32,
    pub start: f32,
    pub end: f32,
    pub rate: f32,
}

impl Tween {
    /// Restart the tween from t = 0
    pub fn begin(&mut self, start: f32, end: f32, rate: f32) {
        self.active = true;
        self.t = 0.0;
        self.start = start;
        self.end = end;
        self.rate = rate;
    }

    /// Advance progress by the simulation clock. At rate 1 this moves 0.1 per
    /// 60 Hz frame.
    pub fn advance(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.t += self.rate * TWEEN_UNIT_RATE * dt;
        if self.t >= 1.0 {
            self.t = 1.0;
            self.active = false;
        }
    }

    /// Current value, or `nominal` when the tween is not running
    pub fn value(&self, nominal: f32) -> f32 {
        if self.active {
            crate::lerp(self.start, self.end, self.t)
        } else {
            nominal
        }
    }
}

/// Camera shake envelope.
///
/// `begin` stamps the current simulation time; the render offset is
/// noise-derived jitter scaled by `sin(now * 50) * 15 * progress` until
/// progress reaches 1. A non-positive duration counts as already complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraShake {
    pub start_time: f32,
    pub duration: f32,
}

impl CameraShake {
    pub fn begin(&mut self, now: f32, duration: f32) {
        self.start_time = now;
        self.duration = duration;
    }

    pub fn is_active(&self, now: f32) -> bool {
        let elapsed = now - self.start_time;
        self.duration > 0.0 && elapsed >= 0.0 && elapsed / self.duration < 1.0
    }

    /// Render offset at `now`; zero once the shake has run its course
    pub fn offset(&self, now: f32, noise: &NoiseField) -> Vec2 {
        if !self.is_active(now) {
            return Vec2::ZERO;
        }
        let progress = (now - self.start_time) / self.duration;
        let intensity = (now * 50.0).sin() * 15.0 * progress;
        Vec2::new(
            noise.sample(now, 0.0).abs() * intensity,
            noise.sample(0.0, now).abs() * intensity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_tween_completes_and_locks_to_nominal() {
        let mut tween = Tween::default();
        tween.begin(100.0, 125.0, 1.0);
        assert!(tween.active);

        for _ in 0..10 {
            tween.advance(DT);
        }
        assert!(!tween.active);
        assert_eq!(tween.t, 1.0);
        // Width is exactly nominal again, not lerp(start, end, 1)
        assert_eq!(tween.value(100.0), 100.0);
    }

    #[test]
    fn test_tween_progress_is_monotonic() {
        let mut tween = Tween::default();
        tween.begin(100.0, 125.0, 3.0);
        let mut prev = tween.t;
        while tween.active {
            tween.advance(DT);
            assert!(tween.t >= prev);
            prev = tween.t;
        }
    }

    #[test]
    fn test_tween_value_while_active() {
        let mut tween = Tween::default();
        tween.begin(100.0, 125.0, 1.0);
        tween.advance(DT); // t = 0.1
        let v = tween.value(100.0);
        assert!(v > 100.0 && v < 125.0);
    }

    #[test]
    fn test_shake_runs_then_expires() {
        let noise = NoiseField::new(5);
        let mut shake = CameraShake::default();
        assert!(!shake.is_active(0.0));

        shake.begin(1.0, 0.2);
        assert!(shake.is_active(1.1));
        assert!(!shake.is_active(1.2));
        assert_eq!(shake.offset(1.25, &noise), Vec2::ZERO);
    }

    #[test]
    fn test_zero_duration_shake_is_complete() {
        let noise = NoiseField::new(5);
        let mut shake = CameraShake::default();
        shake.begin(1.0, 0.0);
        assert!(!shake.is_active(1.0));
        assert_eq!(shake.offset(1.0, &noise), Vec2::ZERO);

        shake.begin(1.0, -0.5);
        assert!(!shake.is_active(1.0));
    }

    #[test]
    fn test_restart_supersedes_previous_shake() {
        let mut shake = CameraShake::default();
        shake.begin(0.0, 0.2);
        shake.begin(1.0, 0.2);
        // Old window no longer applies
        assert!(!shake.is_active(0.5));
        assert!(shake.is_active(1.1));
    }
}
