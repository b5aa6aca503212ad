//! The two light-cycles
//!
//! Both variants share the same shape: position on a fixed-height ground
//! plane, a heading about the vertical axis, a scalar speed, and an owned
//! [`Trail`]. The player is driven by the per-tick input snapshot; the AI by
//! a timed decision state machine whose cadence is decoupled from the
//! physics tick.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use super::trail::Trail;
use crate::settings::Tuning;
use crate::{heading_to_forward, normalize_angle, planar};

/// Current steering decision. Positive turn is clockwise seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnIntent {
    Left,
    #[default]
    Straight,
    Right,
}

impl TurnIntent {
    /// Signed yaw factor for `heading += factor * turn_rate * dt`
    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            TurnIntent::Left => -1.0,
            TurnIntent::Straight => 0.0,
            TurnIntent::Right => 1.0,
        }
    }
}

/// The human-driven cycle
#[derive(Debug, Clone)]
pub struct PlayerCycle {
    pub pos: Vec3,
    /// Rotation about the vertical axis, radians
    pub heading: f32,
    pub speed: f32,
    pub alive: bool,
    pub trail: Trail,
    base_speed: f32,
    accel: f32,
    max_speed: f32,
    /// Radians per second
    turn_rate: f32,
}

impl PlayerCycle {
    pub fn new(tuning: &Tuning, pos: Vec3, heading: f32) -> Self {
        Self {
            pos,
            heading,
            speed: tuning.player_base_speed,
            alive: true,
            trail: Trail::new(tuning.trail_min_step),
            base_speed: tuning.player_base_speed,
            accel: tuning.player_accel,
            max_speed: tuning.player_max_speed,
            turn_rate: tuning.player_turn_rate_rad(),
        }
    }

    /// Advance one physics tick from the input snapshot.
    ///
    /// Speed integrates monotonically toward `max_speed`; there is no brake,
    /// only the respawn reset. Forward intent scales the advance, so holding
    /// reverse backs the cycle up at full speed.
    pub fn tick(&mut self, dt: f32, input: &TickInput) {
        if !self.alive {
            return;
        }
        self.speed = (self.speed + self.accel * dt).min(self.max_speed);
        self.heading = normalize_angle(self.heading + input.turn_axis() * self.turn_rate * dt);
        let fwd = heading_to_forward(self.heading) * (input.forward_axis() * self.speed * dt);
        self.pos.x += fwd.x;
        self.pos.z += fwd.y;
        self.trail.record(planar(self.pos));
    }

    /// Terminal: a dead cycle never moves or grows its trail again.
    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Respawn at a pose with base speed and an empty trail
    pub fn reset(&mut self, pos: Vec3, heading: f32) {
        self.pos = pos;
        self.heading = heading;
        self.speed = self.base_speed;
        self.trail.clear();
        self.alive = true;
    }
}

/// The policy-driven opponent
#[derive(Debug, Clone)]
pub struct AiCycle {
    pub pos: Vec3,
    /// Rotation about the vertical axis, radians
    pub heading: f32,
    pub speed: f32,
    pub alive: bool,
    pub trail: Trail,
    /// Steering held between decisions
    pub turn: TurnIntent,
    base_speed: f32,
    /// Radians per second
    turn_rate: f32,
    bounds: f32,
    probe_distance: f32,
    wall_margin: f32,
    think_min: f32,
    think_max: f32,
    speed_jitter: f32,
    speed_min: f32,
    speed_max: f32,
    think_t: f32,
    think_interval: f32,
}

impl AiCycle {
    pub fn new(tuning: &Tuning, pos: Vec3, heading: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            heading,
            speed: tuning.ai_base_speed,
            alive: true,
            trail: Trail::new(tuning.trail_min_step),
            turn: TurnIntent::Straight,
            base_speed: tuning.ai_base_speed,
            turn_rate: tuning.ai_turn_rate_rad(),
            bounds: tuning.bounds,
            probe_distance: tuning.ai_probe_distance,
            wall_margin: tuning.ai_wall_margin,
            think_min: tuning.ai_think_min,
            think_max: tuning.ai_think_max,
            speed_jitter: tuning.ai_speed_jitter,
            speed_min: tuning.ai_speed_min,
            speed_max: tuning.ai_speed_max,
            think_t: 0.0,
            think_interval: rng.random_range(tuning.ai_think_min..=tuning.ai_think_max),
        }
    }

    /// Would continuing straight run the cycle near the boundary?
    /// Probes a point ahead along the current heading.
    fn near_wall(&self) -> bool {
        let ahead = planar(self.pos) + heading_to_forward(self.heading) * self.probe_distance;
        let limit = self.bounds - self.wall_margin;
        ahead.x.abs() > limit || ahead.y.abs() > limit
    }

    /// Re-decide turn and speed. Near a wall the turn is a forced evasive
    /// left-or-right, never straight; in the open it is mostly straight.
    /// Trails are not considered, only the static boundary.
    fn think(&mut self, rng: &mut impl Rng) {
        self.speed = (self.speed + rng.random_range(-self.speed_jitter..=self.speed_jitter))
            .clamp(self.speed_min, self.speed_max);
        self.turn = if self.near_wall() {
            if rng.random_bool(0.5) {
                TurnIntent::Left
            } else {
                TurnIntent::Right
            }
        } else {
            let roll: f32 = rng.random_range(0.0..1.0);
            if roll < 0.7 {
                TurnIntent::Straight
            } else if roll < 0.85 {
                TurnIntent::Left
            } else {
                TurnIntent::Right
            }
        };
    }

    /// Advance one physics tick. The decision timer runs on its own cadence;
    /// steering and speed persist between decisions, which keeps the motion
    /// smooth instead of jittering every frame. The AI always moves forward.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        if !self.alive {
            return;
        }
        self.think_t += dt;
        if self.think_t >= self.think_interval {
            self.think_t = 0.0;
            self.think_interval = rng.random_range(self.think_min..=self.think_max);
            self.think(rng);
        }
        self.heading = normalize_angle(self.heading + self.turn.as_f32() * self.turn_rate * dt);
        let fwd = heading_to_forward(self.heading) * (self.speed * dt);
        self.pos.x += fwd.x;
        self.pos.z += fwd.y;
        self.trail.record(planar(self.pos));
    }

    /// Terminal: a dead cycle never moves or grows its trail again.
    pub fn die(&mut self) {
        self.alive = false;
    }

    /// Respawn at a pose with base speed, an empty trail, and a fresh
    /// decision timer
    pub fn reset(&mut self, pos: Vec3, heading: f32, rng: &mut impl Rng) {
        self.pos = pos;
        self.heading = heading;
        self.speed = self.base_speed;
        self.trail.clear();
        self.turn = TurnIntent::Straight;
        self.think_t = 0.0;
        self.think_interval = rng.random_range(self.think_min..=self.think_max);
        self.alive = true;
    }
}
