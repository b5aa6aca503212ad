//! Light-cycle trails
//!
//! A trail is the persistent wall a cycle extrudes behind itself: an
//! append-only polyline on the ground plane, bounded to the most recent
//! [`TRAIL_CAP`] segments. Large per-tick displacements are subdivided so no
//! single segment is long enough for a cycle to tunnel through the collision
//! radius between samples.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::point_segment_distance_sq;
use crate::consts::TRAIL_CAP;

/// One straight piece of a trail, on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

/// Bounded polyline history for one cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trail {
    segments: VecDeque<Segment>,
    /// Last recorded position; `None` until the first sample after creation/clear
    cursor: Option<Vec2>,
    min_step: f32,
}

impl Trail {
    pub fn new(min_step: f32) -> Self {
        Self {
            segments: VecDeque::with_capacity(TRAIL_CAP + 1),
            cursor: None,
            min_step,
        }
    }

    /// Record the cycle's position for this tick.
    ///
    /// The first sample after creation or [`clear`](Self::clear) only primes
    /// the cursor. A displacement of at least `2.5 × min_step` (fast motion,
    /// or a sharp turn in one tick) is subdivided into
    /// `max(2, floor(dist / min_step))` equal pieces so emitted segment
    /// lengths stay close to `min_step`. A displacement still below
    /// `min_step` leaves the cursor in place, so slow motion accumulates
    /// across ticks into a full-length segment instead of vanishing — at the
    /// fixed 120 Hz timestep a single tick of travel is shorter than
    /// `min_step` until roughly speed 19.
    pub fn record(&mut self, pos: Vec2) {
        let Some(last) = self.cursor else {
            self.cursor = Some(pos);
            return;
        };

        let d = pos - last;
        let dist = d.length();
        if dist >= self.min_step * 2.5 {
            let steps = ((dist / self.min_step) as usize).max(2);
            let step = d / steps as f32;
            let mut prev = last;
            for _ in 0..steps {
                let next = prev + step;
                self.push_segment(prev, next);
                prev = next;
            }
            self.cursor = Some(prev);
        } else if dist >= self.min_step {
            self.push_segment(last, pos);
            self.cursor = Some(pos);
        }
    }

    /// Append one segment, dropping the oldest beyond the cap.
    /// Sub-`min_step` pieces are still rejected here as a guard against
    /// float edges on the subdivision path; callers pre-check the
    /// direct-append case.
    fn push_segment(&mut self, a: Vec2, b: Vec2) {
        if (b - a).length() < self.min_step {
            return;
        }
        self.segments.push_back(Segment { a, b });
        if self.segments.len() > TRAIL_CAP {
            let _ = self.segments.pop_front();
        }
    }

    /// Does `point` come within `radius` of this trail?
    ///
    /// The most recent `skip_recent` segments are excluded so a cycle never
    /// collides with the wall it is actively extruding behind itself; a trail
    /// with at most `skip_recent` segments can never report a hit.
    pub fn hits(&self, point: Vec2, skip_recent: usize, radius: f32) -> bool {
        let len = self.segments.len();
        if len <= skip_recent {
            return false;
        }
        let r_sq = radius * radius;
        self.segments
            .iter()
            .take(len - skip_recent)
            .any(|seg| point_segment_distance_sq(point, seg.a, seg.b) <= r_sq)
    }

    /// Empty the history and reset the cursor
    pub fn clear(&mut self) {
        self.segments.clear();
        self.cursor = None;
    }

    /// Segments oldest-first, for rendering
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
