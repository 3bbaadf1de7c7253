//! Collision detection and response for axis-aligned geometry
//!
//! Two kinds of checks:
//! - Full-rectangle overlap: goal, hazards, pickup
//! - Feet band: "land on top" of a platform. The actor's bottom edge must sit
//!   strictly inside the platform's vertical thickness while the horizontal
//!   spans overlap.

use super::rect::Rect;

/// Full-rectangle overlap test (strict on all four edges)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Check whether `actor` is standing in the top band of `platform`
///
/// True iff the horizontal spans overlap and the actor's bottom edge lies
/// strictly between the platform's top and bottom edges.
#[inline]
pub fn feet_in_platform(actor: &Rect, platform: &Rect) -> bool {
    actor.overlaps_x(platform) && actor.bottom() > platform.top() && actor.bottom() < platform.bottom()
}

/// Result of resolving a landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Landing {
    /// No contact
    Miss,
    /// Actor snapped onto a surface; holds the new top-left y
    Snap(f32),
}

/// Resolve a landing on a platform top
pub fn resolve_platform(actor: &Rect, platform: &Rect) -> Landing {
    if feet_in_platform(actor, platform) {
        Landing::Snap(platform.top() - actor.height())
    } else {
        Landing::Miss
    }
}

/// Resolve the world floor: bottom edge may not pass `floor_y`
pub fn resolve_floor(actor: &Rect, floor_y: f32) -> Landing {
    if actor.bottom() > floor_y {
        Landing::Snap(floor_y - actor.height())
    } else {
        Landing::Miss
    }
}

/// Clamp a left edge so a body of `width` stays inside `[0, world_width]`
#[inline]
pub fn clamp_horizontal(x: f32, width: f32, world_width: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else if x + width > world_width {
        world_width - width
    } else {
        x
    }
}

/// Index of the first collider in `colliders` that overlaps `actor`
pub fn first_overlap(actor: &Rect, colliders: &[Rect]) -> Option<usize> {
    colliders.iter().position(|c| overlaps(actor, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps() {
        let a = Rect::new(0.0, 0.0, 20.0, 30.0);
        assert!(overlaps(&a, &Rect::new(10.0, 10.0, 20.0, 20.0)));
        // Touching on the right edge
        assert!(!overlaps(&a, &Rect::new(20.0, 0.0, 20.0, 20.0)));
        // Touching on the bottom edge
        assert!(!overlaps(&a, &Rect::new(0.0, 30.0, 20.0, 20.0)));
        // Contained
        assert!(overlaps(&Rect::new(0.0, 0.0, 100.0, 100.0), &Rect::new(40.0, 40.0, 5.0, 5.0)));
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        let a = Rect::new(5.0, 5.0, 20.0, 30.0);
        let b = Rect::new(15.0, 30.0, 20.0, 20.0);
        assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn test_feet_band_landing() {
        let platform = Rect::new(200.0, 400.0, 200.0, 20.0);

        // Bottom edge at 405: inside the band
        let actor = Rect::new(250.0, 375.0, 20.0, 30.0);
        assert_eq!(resolve_platform(&actor, &platform), Landing::Snap(370.0));

        // Bottom edge exactly on the top: resting, no snap needed
        let resting = Rect::new(250.0, 370.0, 20.0, 30.0);
        assert_eq!(resolve_platform(&resting, &platform), Landing::Miss);

        // Bottom edge below the platform: passes under
        let below = Rect::new(250.0, 395.0, 20.0, 30.0);
        assert_eq!(resolve_platform(&below, &platform), Landing::Miss);

        // Horizontally clear of the platform
        let beside = Rect::new(180.0, 375.0, 20.0, 30.0);
        assert_eq!(resolve_platform(&beside, &platform), Landing::Miss);
    }

    #[test]
    fn test_body_overlap_without_feet_contact_is_not_a_landing() {
        // Actor's head inside the platform (jumping up through it)
        let platform = Rect::new(200.0, 400.0, 200.0, 20.0);
        let actor = Rect::new(250.0, 410.0, 20.0, 30.0);
        assert!(overlaps(&actor, &platform));
        assert!(!feet_in_platform(&actor, &platform));
    }

    #[test]
    fn test_resolve_floor() {
        let actor = Rect::new(100.0, 570.8, 20.0, 30.0);
        assert_eq!(resolve_floor(&actor, 600.0), Landing::Snap(570.0));
        let airborne = Rect::new(100.0, 500.0, 20.0, 30.0);
        assert_eq!(resolve_floor(&airborne, 600.0), Landing::Miss);
    }

    #[test]
    fn test_clamp_horizontal() {
        assert_eq!(clamp_horizontal(-5.0, 20.0, 800.0), 0.0);
        assert_eq!(clamp_horizontal(790.0, 20.0, 800.0), 780.0);
        assert_eq!(clamp_horizontal(400.0, 20.0, 800.0), 400.0);
    }

    #[test]
    fn test_first_overlap_respects_order() {
        let actor = Rect::new(100.0, 100.0, 20.0, 30.0);
        let colliders = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(110.0, 110.0, 20.0, 20.0),
            Rect::new(105.0, 105.0, 20.0, 20.0),
        ];
        assert_eq!(first_overlap(&actor, &colliders), Some(1));
        assert_eq!(first_overlap(&actor, &colliders[..1]), None);
    }
}
