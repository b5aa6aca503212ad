//! Ground-plane geometry helpers for collision queries

use glam::Vec2;

/// Squared distance from point `p` to the segment `[a, b]`.
///
/// Projects `p` onto the line through `a` and `b`, clamps the parameter to
/// [0, 1], and measures to the clamped point. A degenerate segment
/// (squared length <= 1e-6) reduces to point distance. Squared distance is
/// returned so callers compare against radius² without a sqrt per segment.
#[inline]
pub fn point_segment_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let ap = p - a;
    let ab_len_sq = ab.length_squared();
    if ab_len_sq <= 1e-6 {
        return ap.length_squared();
    }
    let t = (ap.dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).length_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_on_segment() {
        let d = point_segment_distance_sq(Vec2::new(0.5, 0.0), Vec2::ZERO, Vec2::new(1.0, 0.0));
        assert!(d < 1e-10);
    }

    #[test]
    fn test_perpendicular_offset() {
        // Point at (0.5, 2) above the unit x-axis segment
        let d = point_segment_distance_sq(Vec2::new(0.5, 2.0), Vec2::ZERO, Vec2::new(1.0, 0.0));
        assert!((d - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_projection_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(1.0, 0.0);
        // Beyond b: distance is to b itself
        let d = point_segment_distance_sq(Vec2::new(2.0, 0.0), a, b);
        assert!((d - 1.0).abs() < 1e-5);
        // Before a: distance is to a itself
        let d = point_segment_distance_sq(Vec2::new(-3.0, 4.0), a, b);
        assert!((d - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Vec2::new(1.0, 1.0);
        let d = point_segment_distance_sq(Vec2::new(4.0, 5.0), a, a);
        assert!((d - 25.0).abs() < 1e-4);
    }
}
