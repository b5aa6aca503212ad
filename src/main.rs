//! Neon Cycles entry point
//!
//! Headless demo runner: simulates a seeded match at the fixed timestep with
//! a scripted player (hold forward, evade the boundary) and prints a
//! machine-readable summary when the match decides. A renderer would drive
//! the same `tick` loop from its frame callback instead.

use neon_cycles::consts::SIM_DT;
use neon_cycles::sim::{MatchState, Outcome, TickInput, tick};
use neon_cycles::{Tuning, heading_to_forward, planar};

use serde::Serialize;

/// Final match summary emitted as JSON
#[derive(Serialize)]
struct MatchSummary {
    seed: u64,
    ticks: u64,
    outcome: &'static str,
    player_trail_segments: usize,
    ai_trail_segments: usize,
}

/// Crude autopilot for the demo player: hold forward, turn left whenever the
/// probe point ahead leaves the safe area. Mirrors the AI's wall probe so the
/// demo lasts long enough to watch.
fn scripted_input(state: &MatchState) -> TickInput {
    let tuning = state.tuning();
    let ahead = planar(state.player.pos)
        + heading_to_forward(state.player.heading) * tuning.ai_probe_distance;
    let limit = state.bounds - tuning.ai_wall_margin;
    TickInput {
        forward: true,
        left: ahead.x.abs() > limit || ahead.y.abs() > limit,
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC1C1E5);

    let mut state = match MatchState::new(Tuning::default(), seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("bad tuning: {err}");
            std::process::exit(1);
        }
    };

    // Cap the demo at five simulated minutes
    let max_ticks = (300.0 / SIM_DT) as u64;
    let outcome = loop {
        let input = scripted_input(&state);
        if let Some(outcome) = tick(&mut state, &input, SIM_DT) {
            break outcome;
        }
        if state.time_ticks >= max_ticks {
            break Outcome::InProgress;
        }
        if state.time_ticks % (10.0 / SIM_DT) as u64 == 0 {
            log::info!(
                "t={:.0}s player=({:.1}, {:.1}) ai=({:.1}, {:.1}) trails={}+{}",
                state.time_ticks as f32 * SIM_DT,
                state.player.pos.x,
                state.player.pos.z,
                state.ai.pos.x,
                state.ai.pos.z,
                state.player.trail.len(),
                state.ai.trail.len(),
            );
        }
    };

    let summary = MatchSummary {
        seed,
        ticks: state.time_ticks,
        outcome: outcome.as_str(),
        player_trail_segments: state.player.trail.len(),
        ai_trail_segments: state.ai.trail.len(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("summary serialization failed: {err}"),
    }
}
