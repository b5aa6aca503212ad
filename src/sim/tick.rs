//! Per-tick match orchestration
//!
//! One [`tick`] per rendered frame. The order inside a tick is fixed and
//! significant: advance both cycles, clamp them into the arena, then query
//! both trails against both post-motion positions. Resolving a collision
//! against a pre-tick position or a stale trail would be a correctness bug.

use glam::Vec3;

use super::state::{MatchState, Outcome};
use crate::planar;

/// Per-tick snapshot of player input.
///
/// Plain held-key booleans; nothing in the core reads ambient input state.
/// `restart` is a one-shot the caller debounces (fire once per press, not
/// once per frame held).
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    /// Debounced restart request
    pub restart: bool,
}

impl TickInput {
    /// Forward intent: +1 forward, -1 reverse, 0 neutral
    #[inline]
    pub fn forward_axis(&self) -> f32 {
        (self.forward as i8 - self.reverse as i8) as f32
    }

    /// Signed turn intent: -1 left, +1 right, 0 straight
    #[inline]
    pub fn turn_axis(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

/// Clip a position onto the arena's ground square. Hard walls: only the
/// position is clipped, velocity is untouched. Idempotent.
#[inline]
pub fn clamp_to_bounds(pos: Vec3, bounds: f32) -> Vec3 {
    Vec3::new(
        pos.x.clamp(-bounds, bounds),
        pos.y,
        pos.z.clamp(-bounds, bounds),
    )
}

/// Advance the match by one tick.
///
/// Returns `Some(outcome)` exactly once, on the tick that decides the match;
/// every later call is a safe no-op returning `None`. A `restart` input is
/// honored at any time, including after the match is over.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) -> Option<Outcome> {
    if input.restart {
        state.restart();
        return None;
    }
    if state.over {
        return None;
    }

    state.time_ticks += 1;

    // Advance both cycles before any collision query
    state.player.tick(dt, input);
    {
        let MatchState { ai, rng, .. } = state;
        ai.tick(dt, rng);
    }

    state.player.pos = clamp_to_bounds(state.player.pos, state.bounds);
    state.ai.pos = clamp_to_bounds(state.ai.pos, state.bounds);

    // Each cycle dies on contact with either trail, tested at its own
    // post-clamp position. Both can die in the same tick.
    let skip = state.tuning.skip_recent;
    let radius = state.tuning.collision_radius;
    let p = planar(state.player.pos);
    let a = planar(state.ai.pos);

    let player_crashed = state.player.alive
        && (state.player.trail.hits(p, skip, radius) || state.ai.trail.hits(p, skip, radius));
    let ai_crashed = state.ai.alive
        && (state.ai.trail.hits(a, skip, radius) || state.player.trail.hits(a, skip, radius));

    if player_crashed {
        log::debug!("player crashed at ({:.2}, {:.2})", p.x, p.y);
        state.player.die();
    }
    if ai_crashed {
        log::debug!("ai crashed at ({:.2}, {:.2})", a.x, a.y);
        state.ai.die();
    }

    let outcome = match (state.player.alive, state.ai.alive) {
        (false, false) => Outcome::Draw,
        (false, true) => Outcome::AiWin,
        (true, false) => Outcome::PlayerWin,
        (true, true) => Outcome::InProgress,
    };

    if outcome != Outcome::InProgress {
        state.outcome = outcome;
        state.over = true;
        log::info!(
            "match over after {} ticks: {}",
            state.time_ticks,
            outcome.as_str()
        );
        return Some(outcome);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Tuning;
    use crate::sim::trail::Trail;
    use glam::Vec2;
    use proptest::prelude::*;

    fn forward_input() -> TickInput {
        TickInput {
            forward: true,
            ..Default::default()
        }
    }

    /// Record a straight wall into a trail, one sample per 0.2 of travel
    fn lay_wall(trail: &mut Trail, from: Vec2, to: Vec2) {
        let total = (to - from).length();
        let dir = (to - from) / total;
        trail.record(from);
        let mut t = 0.0;
        while t < total {
            t = (t + 0.2).min(total);
            trail.record(from + dir * t);
        }
    }

    #[test]
    fn test_free_run_reaches_wall_without_false_collision() {
        // Slow, fixed AI speed keeps the opponent in open field for the
        // whole run; the player holds forward and never turns.
        let mut tuning = Tuning::default();
        tuning.ai_base_speed = 8.0;
        tuning.ai_speed_min = 8.0;
        tuning.ai_speed_max = 8.0;
        let mut state = MatchState::new(tuning, 2024).unwrap();

        let input = forward_input();
        let mut ticks = 0;
        let mut trail_len_at_1s = 0;
        while state.player.pos.z < state.bounds - 0.1 {
            assert!(ticks < 1200, "player never reached the wall");
            let decided = tick(&mut state, &input, SIM_DT);
            assert_eq!(decided, None);
            assert_eq!(state.outcome, Outcome::InProgress);
            assert!(state.player.alive);
            assert!(state.ai.alive);
            ticks += 1;
            // The wall behind the cycle must actually exist and keep
            // growing; "no false collision" against an empty trail would
            // prove nothing
            if ticks == 120 {
                trail_len_at_1s = state.player.trail.len();
                assert!(trail_len_at_1s > 0);
            }
            if ticks == 240 {
                assert!(state.player.trail.len() > trail_len_at_1s);
            }
        }
        assert!(state.player.trail.len() > 100);
        assert!(!state.ai.trail.is_empty());

        // Pinned against the wall, still no phantom collision
        for _ in 0..120 {
            assert_eq!(tick(&mut state, &input, SIM_DT), None);
        }
        assert!(state.player.alive);
        assert!(state.player.pos.z <= state.bounds);
    }

    #[test]
    fn test_simultaneous_crash_is_a_draw_reported_once() {
        let mut state = MatchState::new(Tuning::default(), 7).unwrap();

        // Opposing walls laid through each cycle's current position, long
        // enough that skip_recent does not exclude the crossing segments
        let p = planar(state.player.pos);
        let a = planar(state.ai.pos);
        lay_wall(&mut state.ai.trail, Vec2::new(p.x, -5.0), Vec2::new(p.x, 5.0));
        lay_wall(
            &mut state.player.trail,
            Vec2::new(a.x, -5.0),
            Vec2::new(a.x, 5.0),
        );
        assert!(state.ai.trail.len() > state.tuning().skip_recent);

        let decided = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(decided, Some(Outcome::Draw));
        assert!(state.over);
        assert!(!state.player.alive);
        assert!(!state.ai.alive);

        // Once over, ticking is an idempotent no-op
        let ticks_at_end = state.time_ticks;
        for _ in 0..5 {
            assert_eq!(tick(&mut state, &forward_input(), SIM_DT), None);
        }
        assert_eq!(state.time_ticks, ticks_at_end);
        assert_eq!(state.outcome, Outcome::Draw);
    }

    #[test]
    fn test_player_crash_into_ai_trail_loses() {
        let mut state = MatchState::new(Tuning::default(), 7).unwrap();
        let p = planar(state.player.pos);
        lay_wall(&mut state.ai.trail, Vec2::new(p.x, -5.0), Vec2::new(p.x, 5.0));

        let decided = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(decided, Some(Outcome::AiWin));
        assert!(!state.player.alive);
        assert!(state.ai.alive);
    }

    #[test]
    fn test_ai_crash_into_player_trail_wins() {
        let mut state = MatchState::new(Tuning::default(), 7).unwrap();
        let a = planar(state.ai.pos);
        lay_wall(
            &mut state.player.trail,
            Vec2::new(a.x, -5.0),
            Vec2::new(a.x, 5.0),
        );

        let decided = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(decided, Some(Outcome::PlayerWin));
        assert!(state.player.alive);
        assert!(!state.ai.alive);
    }

    #[test]
    fn test_restart_resets_all_state() {
        let mut state = MatchState::new(Tuning::default(), 99).unwrap();
        let input = forward_input();
        for _ in 0..400 {
            let _ = tick(&mut state, &input, SIM_DT);
        }
        assert!(!state.player.trail.is_empty());

        state.restart();
        assert!(!state.over);
        assert_eq!(state.outcome, Outcome::InProgress);
        assert!(state.player.alive);
        assert!(state.ai.alive);
        assert!(state.player.trail.is_empty());
        assert!(state.ai.trail.is_empty());
        assert_eq!(state.time_ticks, 0);
        let (spawn_pos, spawn_heading) = super::super::state::player_spawn();
        assert_eq!(state.player.pos, spawn_pos);
        assert_eq!(state.player.heading, spawn_heading);
    }

    #[test]
    fn test_restart_input_supersedes_finished_match() {
        let mut state = MatchState::new(Tuning::default(), 7).unwrap();
        let p = planar(state.player.pos);
        lay_wall(&mut state.ai.trail, Vec2::new(p.x, -5.0), Vec2::new(p.x, 5.0));
        assert_eq!(
            tick(&mut state, &TickInput::default(), SIM_DT),
            Some(Outcome::AiWin)
        );

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &restart, SIM_DT), None);
        assert!(!state.over);
        assert!(state.player.alive);
        assert!(state.ai.trail.is_empty());
    }

    #[test]
    fn test_determinism_across_runs() {
        let mut a = MatchState::new(Tuning::default(), 555).unwrap();
        let mut b = MatchState::new(Tuning::default(), 555).unwrap();
        let inputs = [
            forward_input(),
            TickInput {
                forward: true,
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            let ra = tick(&mut a, input, SIM_DT);
            let rb = tick(&mut b, input, SIM_DT);
            assert_eq!(ra, rb);
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.ai.pos, b.ai.pos);
        assert_eq!(a.ai.heading, b.ai.heading);
        assert_eq!(a.ai.trail.len(), b.ai.trail.len());
    }

    proptest! {
        /// Clamping is idempotent and a no-op on in-bounds positions.
        #[test]
        fn prop_clamp_idempotent(x in -200.0f32..200.0, z in -200.0f32..200.0) {
            let bounds = 72.0;
            let pos = Vec3::new(x, 0.5, z);
            let once = clamp_to_bounds(pos, bounds);
            let twice = clamp_to_bounds(once, bounds);
            prop_assert_eq!(once, twice);
            prop_assert!(once.x.abs() <= bounds && once.z.abs() <= bounds);
            if x.abs() <= bounds && z.abs() <= bounds {
                prop_assert_eq!(once, pos);
            }
        }
    }
}
