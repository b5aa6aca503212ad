//! Match state and outcome types

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cycle::{AiCycle, PlayerCycle};
use crate::consts::{AI_START_X, PLAYER_START_X, RIDE_HEIGHT};
use crate::settings::{Tuning, TuningError};

/// How the match stands (or ended)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    PlayerWin,
    AiWin,
    Draw,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::InProgress => "in progress",
            Outcome::PlayerWin => "player wins",
            Outcome::AiWin => "ai wins",
            Outcome::Draw => "draw",
        }
    }
}

/// RNG state wrapper for reproducible AI decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Canonical player spawn: left end of the arena, facing inward (+z)
pub fn player_spawn() -> (Vec3, f32) {
    (Vec3::new(PLAYER_START_X, RIDE_HEIGHT, 0.0), 0.0)
}

/// Canonical AI spawn: right end of the arena, facing inward (-z)
pub fn ai_spawn() -> (Vec3, f32) {
    (
        Vec3::new(AI_START_X, RIDE_HEIGHT, 0.0),
        std::f32::consts::PI,
    )
}

/// Complete match state, advanced by [`tick`](super::tick::tick).
///
/// Everything the presentation layer may read is public: the two cycles
/// (position, heading, alive flag, trail segments), the `over` flag, and the
/// outcome. Trails are mutated only by their owning cycle.
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Arena half-extent
    pub bounds: f32,
    pub player: PlayerCycle,
    pub ai: AiCycle,
    /// Set on the first tick that decides the match; ticking past it is a no-op
    pub over: bool,
    pub outcome: Outcome,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// Build a match from validated tuning. An invalid config fails fast
    /// here rather than degrading mid-match.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut rng = RngState::new(seed).to_rng();
        let (player_pos, player_heading) = player_spawn();
        let (ai_pos, ai_heading) = ai_spawn();
        let player = PlayerCycle::new(&tuning, player_pos, player_heading);
        let ai = AiCycle::new(&tuning, ai_pos, ai_heading, &mut rng);
        log::info!("match created: seed={seed} bounds={}", tuning.bounds);
        Ok(Self {
            seed,
            bounds: tuning.bounds,
            player,
            ai,
            over: false,
            outcome: Outcome::InProgress,
            time_ticks: 0,
            tuning,
            rng,
        })
    }

    /// Reset to the canonical start: both cycles respawned at their fixed
    /// poses, trails cleared, outcome back to in-progress. Safe at any point;
    /// nothing from the previous match survives.
    pub fn restart(&mut self) {
        let (player_pos, player_heading) = player_spawn();
        let (ai_pos, ai_heading) = ai_spawn();
        self.player.reset(player_pos, player_heading);
        self.ai.reset(ai_pos, ai_heading, &mut self.rng);
        self.over = false;
        self.outcome = Outcome::InProgress;
        self.time_ticks = 0;
        log::info!("match restarted");
    }

    /// Gameplay configuration this match was built with
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_match_starts_in_progress() {
        let state = MatchState::new(Tuning::default(), 42).unwrap();
        assert!(!state.over);
        assert_eq!(state.outcome, Outcome::InProgress);
        assert!(state.player.alive);
        assert!(state.ai.alive);
        assert!(state.player.trail.is_empty());
        assert!(state.ai.trail.is_empty());
    }

    #[test]
    fn test_canonical_spawns_face_inward() {
        let state = MatchState::new(Tuning::default(), 42).unwrap();
        assert_eq!(state.player.pos.x, PLAYER_START_X);
        assert_eq!(state.ai.pos.x, AI_START_X);
        // Player faces +z, AI faces -z
        assert!(crate::heading_to_forward(state.player.heading).y > 0.99);
        assert!(crate::heading_to_forward(state.ai.heading).y < -0.99);
    }

    #[test]
    fn test_invalid_tuning_fails_fast() {
        let mut tuning = Tuning::default();
        tuning.bounds = -1.0;
        assert!(MatchState::new(tuning, 42).is_err());
    }

    #[test]
    fn test_same_seed_same_initial_state() {
        let a = MatchState::new(Tuning::default(), 1234).unwrap();
        let b = MatchState::new(Tuning::default(), 1234).unwrap();
        assert_eq!(a.ai.speed, b.ai.speed);
        assert_eq!(a.ai.turn, b.ai.turn);
    }
}
