//! Collision resolution between the player body and platforms
//!
//! Platforms are one-way in spirit: a falling body lands on top, a rising body
//! bumps its head on the underside. Both only snap when the penetration is
//! shallower than [`SNAP_TOLERANCE`]; deeper overlaps are treated as passing
//! through. This is a discrete check, not a swept one, which is fine because
//! vertical speed is clamped well below the tolerance.

use super::platform::Platform;
use super::rect::Rect;

/// Maximum penetration (pixels) that still snaps the body onto a surface
pub const SNAP_TOLERANCE: i32 = 20;

/// Outcome of resolving one tick of vertical motion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Index of the platform the body ended up standing on
    pub landed_on: Option<usize>,
    /// Index of the platform the body bumped its head on
    pub head_bump: Option<usize>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }

    #[inline]
    pub fn landed(&self) -> bool {
        self.landed_on.is_some()
    }
}

/// Resolve `body` against every solid platform, snapping position and zeroing
/// `vy` on contact
///
/// Platforms are visited in order; once a contact zeroes `vy` later overlaps
/// can no longer snap, so at most one landing or head bump happens per tick.
pub fn resolve_vertical(body: &mut Rect, vy: &mut f32, platforms: &[Platform]) -> CollisionResult {
    let mut result = CollisionResult::miss();

    for (index, plat) in platforms.iter().enumerate() {
        if !plat.is_solid_now() {
            continue;
        }
        let surface = plat.bounds();
        if !body.overlaps(&surface) {
            continue;
        }

        if *vy > 0.0 && body.bottom() - surface.top() < SNAP_TOLERANCE {
            body.set_bottom(surface.top());
            *vy = 0.0;
            result.landed_on = Some(index);
        } else if *vy < 0.0 && surface.bottom() - body.top() < SNAP_TOLERANCE {
            body.set_top(surface.bottom());
            *vy = 0.0;
            result.head_bump = Some(index);
        }
    }

    result
}
