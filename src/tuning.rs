//! Simulation tuning values
//!
//! Timings, frame counts and the life budget. Passed into a level at
//! construction and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Timing and life budget for a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds one hop takes; also the cooldown between hops
    pub move_duration: f32,
    /// Seconds the death sequence plays
    pub death_duration: f32,
    /// Lives at level load
    pub starting_lives: u8,
    /// Frames in the hop sprite strip
    pub move_frames: u32,
    /// Frames in the death sprite strip
    pub death_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_duration: MOVE_DURATION,
            death_duration: DEATH_DURATION,
            starting_lives: STARTING_LIVES,
            move_frames: MOVE_FRAMES,
            death_frames: DEATH_FRAMES,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.move_duration > 0.0) {
            return Err(ConfigError::Tuning { field: "move_duration" });
        }
        if !(self.death_duration > 0.0) {
            return Err(ConfigError::Tuning { field: "death_duration" });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Tuning { field: "starting_lives" });
        }
        // Hops need a rest frame and at least one stretch frame
        if self.move_frames < 2 {
            return Err(ConfigError::Tuning { field: "move_frames" });
        }
        if self.death_frames < 2 {
            return Err(ConfigError::Tuning { field: "death_frames" });
        }
        Ok(())
    }

    /// Most stretched hop frame (reached halfway through a hop)
    #[inline]
    pub fn move_peak_frame(&self) -> u32 {
        self.move_frames - 1
    }

    /// Last frame of the death strip
    #[inline]
    pub fn death_last_frame(&self) -> u32 {
        self.death_frames - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.starting_lives, 3);
        assert_eq!(tuning.move_peak_frame(), 4);
        assert_eq!(tuning.death_last_frame(), 8);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "move_duration": 0.5 }"#).unwrap();
        assert_eq!(tuning.move_duration, 0.5);
        assert_eq!(tuning.death_duration, DEATH_DURATION);
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = Tuning::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Tuning { field: "starting_lives" }));
    }
}
