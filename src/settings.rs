//! Gameplay tuning
//!
//! Every knob the simulation reads is supplied here at construction time.
//! Defaults reproduce the reference balance; [`Tuning::validate`] rejects
//! configurations the simulation cannot run with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid tuning detected at match construction
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    /// Arena half-extent must be positive
    #[error("arena bounds must be positive, got {0}")]
    NonPositiveBounds(f32),
    /// Trail segment granularity must be positive
    #[error("trail min_step must be positive, got {0}")]
    NonPositiveMinStep(f32),
    /// Collision radius must be positive
    #[error("collision radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    /// Speeds and rates must be positive and consistently ordered
    #[error("invalid kinematics: {0}")]
    InvalidKinematics(&'static str),
}

/// Gameplay configuration (spec-level constants, serializable for presets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Arena ===
    /// Arena half-extent; play field spans [-bounds, +bounds] on both axes
    pub bounds: f32,

    // === Trails & collision ===
    /// Collision radius around a cycle's position
    pub collision_radius: f32,
    /// Most recent segments excluded from self-collision queries
    pub skip_recent: usize,
    /// Minimum trail segment length; larger displacements are subdivided
    pub trail_min_step: f32,

    // === Player kinematics ===
    pub player_base_speed: f32,
    pub player_accel: f32,
    pub player_max_speed: f32,
    /// Degrees per second
    pub player_turn_rate: f32,

    // === AI kinematics & policy ===
    pub ai_base_speed: f32,
    /// Degrees per second
    pub ai_turn_rate: f32,
    /// Randomized re-decision cadence, seconds
    pub ai_think_min: f32,
    pub ai_think_max: f32,
    /// Uniform speed perturbation per decision, ± this value
    pub ai_speed_jitter: f32,
    pub ai_speed_min: f32,
    pub ai_speed_max: f32,
    /// How far ahead the AI probes for the boundary
    pub ai_probe_distance: f32,
    /// Probe counts as "near wall" within this margin of the bounds
    pub ai_wall_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bounds: 72.0,

            collision_radius: 0.30,
            skip_recent: 10,
            trail_min_step: 0.16,

            player_base_speed: 10.5,
            player_accel: 1.3,
            player_max_speed: 30.0,
            player_turn_rate: 175.0,

            ai_base_speed: 11.0,
            ai_turn_rate: 170.0,
            ai_think_min: 0.18,
            ai_think_max: 0.42,
            ai_speed_jitter: 1.1,
            ai_speed_min: 8.0,
            ai_speed_max: 30.0,
            ai_probe_distance: 7.0,
            ai_wall_margin: 5.0,
        }
    }
}

impl Tuning {
    /// Reject configurations the simulation cannot run with.
    ///
    /// Called by `MatchState::new`; a bad config fails fast instead of
    /// degrading mid-match.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.bounds > 0.0) {
            return Err(TuningError::NonPositiveBounds(self.bounds));
        }
        if !(self.trail_min_step > 0.0) {
            return Err(TuningError::NonPositiveMinStep(self.trail_min_step));
        }
        if !(self.collision_radius > 0.0) {
            return Err(TuningError::NonPositiveRadius(self.collision_radius));
        }
        if !(self.player_base_speed > 0.0 && self.player_max_speed >= self.player_base_speed) {
            return Err(TuningError::InvalidKinematics(
                "player max_speed must be >= base_speed > 0",
            ));
        }
        if !(self.player_accel > 0.0) {
            return Err(TuningError::InvalidKinematics("player accel must be > 0"));
        }
        if !(self.player_turn_rate > 0.0 && self.ai_turn_rate > 0.0) {
            return Err(TuningError::InvalidKinematics("turn rates must be > 0"));
        }
        if !(self.ai_base_speed > 0.0) {
            return Err(TuningError::InvalidKinematics("ai base_speed must be > 0"));
        }
        if !(self.ai_think_min > 0.0 && self.ai_think_max >= self.ai_think_min) {
            return Err(TuningError::InvalidKinematics(
                "ai think interval must satisfy 0 < min <= max",
            ));
        }
        if !(self.ai_speed_min > 0.0 && self.ai_speed_max >= self.ai_speed_min) {
            return Err(TuningError::InvalidKinematics(
                "ai speed clamp must satisfy 0 < min <= max",
            ));
        }
        Ok(())
    }

    /// Player turn rate in radians per second
    #[inline]
    pub fn player_turn_rate_rad(&self) -> f32 {
        self.player_turn_rate.to_radians()
    }

    /// AI turn rate in radians per second
    #[inline]
    pub fn ai_turn_rate_rad(&self) -> f32 {
        self.ai_turn_rate.to_radians()
    }
}
