//! Audio system using Web Audio API
//!
//! Procedurally generated tones - no sample files. Playback is gated to at
//! most one effect per frame and silently no-ops until the context has been
//! started by a user gesture.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Neutral object landed on the paddle
    Catch,
    /// Object crossed the ground line
    Miss,
    /// Penalty object caught
    Hurt,
    /// Bonus object caught
    Coin,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
    /// At-most-once-per-frame gate; reset by `begin_frame`
    played_this_frame: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; audio is then disabled
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
            played_this_frame: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Reset the per-frame playback gate; call once at the top of each frame
    pub fn begin_frame(&mut self) {
        self.played_this_frame = false;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound effect. No-ops when muted, already played this frame, or
    /// the context is unavailable.
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted || self.played_this_frame {
            return;
        }
        let vol = self.master_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        self.played_this_frame = true;

        match effect {
            SoundEffect::Catch => play_catch(ctx, vol),
            SoundEffect::Miss => play_miss(ctx, vol),
            SoundEffect::Hurt => play_hurt(ctx, vol),
            SoundEffect::Coin => play_coin(ctx, vol),
        }
    }
}

// === Sound generators ===

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Neutral catch - short clean blip
fn play_catch(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sine) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.3, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
        .ok();
    osc.frequency().set_value_at_time(400.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(520.0, t + 0.08)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.15).ok();
}

/// Miss - dull low thud
fn play_miss(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 66.0, OscillatorType::Square) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.25, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.15).ok();
}

/// Penalty hit - harsh descending buzz
fn play_hurt(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 150.0, OscillatorType::Sawtooth) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.4, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
        .ok();
    osc.frequency().set_value_at_time(150.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(50.0, t + 0.2)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.3).ok();

    // Sub bass punch under the buzz
    if let Some((osc2, gain2)) = create_osc(ctx, 45.0, OscillatorType::Sine) {
        gain2.gain().set_value_at_time(vol * 0.3, t).ok();
        gain2
            .gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc2.start().ok();
        osc2.stop_with_when(t + 0.2).ok();
    }
}

/// Bonus collected - two ascending pings
fn play_coin(ctx: &AudioContext, vol: f32) {
    for (i, freq) in [660.0, 990.0].iter().enumerate() {
        let delay = i as f64 * 0.07;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }
}
