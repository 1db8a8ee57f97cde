//! Audio triggers
//!
//! The simulation only queues [`GameEvent`]s; this module turns them into
//! sound effects and hands them to whatever backend the host provides.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Frog starts a hop
    Hop,
    /// Frog hops into a free exit
    Trill,
    /// Frog dies
    Splat,
}

impl SoundEffect {
    pub fn from_event(event: GameEvent) -> Self {
        match event {
            GameEvent::Hop => SoundEffect::Hop,
            GameEvent::Trill => SoundEffect::Trill,
            GameEvent::Splat => SoundEffect::Splat,
        }
    }

    /// Sound asset name
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::Hop => "croak",
            SoundEffect::Trill => "trill",
            SoundEffect::Splat => "splat",
        }
    }
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound: {} (volume {volume:.2})", effect.asset_name());
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play one effect per event, in order
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::from_event(*event));
        }
    }
}
