//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Single-threaded, one tick per rendered frame
//! - Seeded RNG only (AI decisions)
//! - Fixed per-tick ordering: advance both cycles, clamp, then resolve collisions
//! - No rendering or platform dependencies

pub mod cycle;
pub mod geom;
pub mod state;
pub mod tick;
pub mod trail;

pub use cycle::{AiCycle, PlayerCycle, TurnIntent};
pub use geom::point_segment_distance_sq;
pub use state::{MatchState, Outcome, RngState};
pub use tick::{TickInput, tick};
pub use trail::{Segment, Trail};
