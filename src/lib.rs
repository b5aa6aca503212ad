//! Neon Cycles - a light-cycle arena duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, trails, collisions, match state)
//! - `settings`: Data-driven gameplay tuning
//!
//! Rendering, camera work, and UI are external collaborators: they call
//! [`sim::tick`] once per frame and draw whatever the match state exposes.

pub mod settings;
pub mod sim;

pub use settings::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Engine-fixed constants (gameplay knobs live in [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Maximum trail segments retained per cycle (ring-buffer cap)
    pub const TRAIL_CAP: usize = 1000;

    /// Fixed height of a cycle above the ground plane
    pub const RIDE_HEIGHT: f32 = 0.5;

    /// Player spawn: x offset from center, heading 0 (forward +z)
    pub const PLAYER_START_X: f32 = -14.0;
    /// AI spawn: x offset from center, heading π (forward -z)
    pub const AI_START_X: f32 = 14.0;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Ground-plane forward direction for a heading (rotation about the vertical
/// axis). Heading 0 faces +z; positive headings turn clockwise seen from above.
#[inline]
pub fn heading_to_forward(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Project a world position onto the ground plane as (x, z)
#[inline]
pub fn planar(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}
