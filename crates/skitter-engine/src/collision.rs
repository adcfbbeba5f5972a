#![forbid(unsafe_code)]

//! Axis-aligned overlap correction for the repelled element.
//!
//! Given a proposed translation and the obstacle's current box, the resolver
//! pushes the moving element out along the axis of least penetration (the
//! minimum-translation-vector heuristic). Correction is applied once per
//! call, not iterated to a fixed point; a single correction per frame is
//! stable at interactive event rates.
//!
//! Ties (`penetration.x == penetration.y`) resolve along the X axis.

use skitter_core::geometry::{Rect, Vec2};

/// Direction multiplier pushing `delta`'s side of the axis. A zero delta
/// (exactly concentric centers) pushes toward positive coordinates so the
/// correction is still deterministic and separating.
#[inline]
fn push_sign(delta: f64) -> f64 {
    if delta < 0.0 { -1.0 } else { 1.0 }
}

/// Correct a proposed translation so the moving element does not overlap the
/// obstacle.
///
/// `moving_initial` is the moving element's rest box; the candidate box is
/// that box shifted by `proposed`. `obstacle` must be the obstacle's box in
/// the same coordinate space, read fresh for this call (it may itself be
/// mid-animation).
///
/// Returns the translation unchanged when the candidate box does not contact
/// the obstacle, or when the contact has no positive interior depth on both
/// axes (edge contact / bounding-box slack). Otherwise the translation is
/// extended along the cheaper axis, away from the obstacle's center, by
/// exactly the penetration depth, leaving the boxes in edge contact.
#[must_use]
pub fn resolve(proposed: Vec2, moving_initial: &Rect, obstacle: &Rect) -> Vec2 {
    let candidate = moving_initial.translated(proposed);
    if !candidate.overlaps(obstacle) {
        return proposed;
    }

    let pen = candidate.penetration(obstacle);
    if !pen.is_overlap() {
        return proposed;
    }

    let a = candidate.center();
    let b = obstacle.center();
    if pen.x <= pen.y {
        Vec2::new(proposed.x + push_sign(a.x - b.x) * pen.x, proposed.y)
    } else {
        Vec2::new(proposed.x, proposed.y + push_sign(a.y - b.y) * pen.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_proposal_passes_through() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(100.0, 100.0, 10.0, 10.0);
        let proposed = Vec2::new(5.0, 5.0);
        assert_eq!(resolve(proposed, &moving, &obstacle), proposed);
    }

    #[test]
    fn resolves_along_smaller_axis() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(20.0, 2.0, 10.0, 10.0);
        // Shift right by 14: candidate at (14, 0), overlapping the obstacle
        // 4 deep in x and 8 deep in y. X is cheaper; candidate center is left
        // of the obstacle center, so the correction pushes back left.
        let resolved = resolve(Vec2::new(14.0, 0.0), &moving, &obstacle);
        assert_eq!(resolved, Vec2::new(10.0, 0.0));

        let corrected = moving.translated(resolved);
        assert!(!corrected.penetration(&obstacle).is_overlap());
    }

    #[test]
    fn resolves_along_y_when_cheaper() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(2.0, 20.0, 10.0, 10.0);
        let resolved = resolve(Vec2::new(0.0, 14.0), &moving, &obstacle);
        assert_eq!(resolved, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn tie_resolves_along_x() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(8.0, 8.0, 10.0, 10.0);
        // Candidate overlaps 2 deep on both axes; the tie goes to X, pushing
        // left since the candidate center sits up-left of the obstacle.
        let resolved = resolve(Vec2::ZERO, &moving, &obstacle);
        assert_eq!(resolved, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn edge_contact_is_left_alone() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(10.0, 0.0, 10.0, 10.0);
        // Touching edges: closed-interval overlap, but zero interior depth.
        assert_eq!(resolve(Vec2::ZERO, &moving, &obstacle), Vec2::ZERO);
    }

    #[test]
    fn pushes_away_from_obstacle_center() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(4.0, 0.0, 10.0, 10.0);
        // Candidate center (5,5) is left of obstacle center (9,5): push left
        // by the x penetration (6).
        let resolved = resolve(Vec2::ZERO, &moving, &obstacle);
        assert_eq!(resolved, Vec2::new(-6.0, 0.0));
    }

    #[test]
    fn concentric_boxes_still_separate() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(0.0, 0.0, 10.0, 10.0);
        let resolved = resolve(Vec2::ZERO, &moving, &obstacle);
        let corrected = moving.translated(resolved);
        assert!(!corrected.penetration(&obstacle).is_overlap());
        // Deterministic direction for the degenerate case.
        assert_eq!(resolved, Vec2::new(10.0, 0.0));
    }
}
