//! Platform entities and their hazard behaviors

use serde::{Deserialize, Serialize};

use super::catalog::PlatformSpec;
use super::rect::Rect;
use super::timer::{Millis, Timer};
use crate::consts::*;

/// Time an expired crumble platform stays gone before it resets
pub const CRUMBLE_COOLDOWN_MS: Millis = 5000;

/// Crumble platforms come in a short and a long fuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrumbleVariant {
    Short,
    Long,
}

impl CrumbleVariant {
    /// Time from first contact until the platform gives way
    pub fn base_duration_ms(&self) -> Millis {
        match self {
            CrumbleVariant::Short => 500,
            CrumbleVariant::Long => 2000,
        }
    }
}

/// Platform types, fixed for the lifetime of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Regular,
    Moving,
    Conveyor,
    Icy,
    Crumble(CrumbleVariant),
}

impl PlatformKind {
    pub fn label(&self) -> &'static str {
        match self {
            PlatformKind::Regular => "regular",
            PlatformKind::Moving => "moving",
            PlatformKind::Conveyor => "conveyor",
            PlatformKind::Icy => "icy",
            PlatformKind::Crumble(CrumbleVariant::Long) => "crumble_long",
            PlatformKind::Crumble(CrumbleVariant::Short) => "crumble_short",
        }
    }
}

/// Crumble timing state
///
/// unarmed -> armed (first landing) -> expired (after the fuse) -> unarmed
/// (after the cooldown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrumbleState {
    /// Fuse started by the first landing; `None` while unarmed
    pub armed: Option<Timer>,
    pub expired: bool,
}

/// A platform in the tower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    bounds: Rect,
    kind: PlatformKind,
    /// Horizontal oscillation speed (Moving only); sign flips at screen edges
    velocity: i32,
    /// Push applied to a standing player each tick (Conveyor only)
    conveyor: i32,
    crumble: Option<CrumbleState>,
    /// The ground never culls
    ground: bool,
}

impl Platform {
    pub fn new(bounds: Rect, kind: PlatformKind, speed: i32) -> Self {
        let (velocity, conveyor) = match kind {
            PlatformKind::Moving => (speed, 0),
            PlatformKind::Conveyor => (0, speed),
            _ => (0, 0),
        };
        let crumble = match kind {
            PlatformKind::Crumble(_) => Some(CrumbleState::default()),
            _ => None,
        };
        Self {
            bounds,
            kind,
            velocity,
            conveyor,
            crumble,
            ground: false,
        }
    }

    /// A regular platform of catalog thickness
    pub fn regular(x: i32, y: i32, width: i32) -> Self {
        Self::new(Rect::new(x, y, width, PLATFORM_HEIGHT), PlatformKind::Regular, 0)
    }

    /// The permanent full-width ground platform with its top at `base_y`
    pub fn ground(base_y: i32) -> Self {
        let mut plat = Self::new(
            Rect::new(0, base_y, SCREEN_WIDTH, GROUND_HEIGHT),
            PlatformKind::Regular,
            0,
        );
        plat.ground = true;
        plat
    }

    pub fn from_spec(spec: &PlatformSpec, x: i32, y: i32) -> Self {
        Self::new(Rect::new(x, y, spec.width, PLATFORM_HEIGHT), spec.kind, spec.speed)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn kind(&self) -> PlatformKind {
        self.kind
    }

    #[inline]
    pub fn is_ground(&self) -> bool {
        self.ground
    }

    #[inline]
    pub fn is_icy(&self) -> bool {
        self.kind == PlatformKind::Icy
    }

    /// Current signed moving speed (zero unless Moving)
    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    /// Horizontal push on a standing player (zero unless Conveyor)
    pub fn conveyor_speed(&self) -> i32 {
        self.conveyor
    }

    pub fn crumble_state(&self) -> Option<CrumbleState> {
        self.crumble
    }

    /// HUD glyph for the platform type
    pub fn symbol(&self) -> &'static str {
        match self.kind {
            PlatformKind::Regular => "",
            PlatformKind::Moving => "~",
            PlatformKind::Conveyor if self.conveyor < 0 => "<-",
            PlatformKind::Conveyor => "->",
            PlatformKind::Icy => "*",
            PlatformKind::Crumble(CrumbleVariant::Long) => "!",
            PlatformKind::Crumble(CrumbleVariant::Short) => "!!",
        }
    }

    /// Whether the player can currently collide with this platform
    pub fn is_solid_now(&self) -> bool {
        !self.crumble.is_some_and(|c| c.expired)
    }

    /// Advance one tick of platform behavior
    pub fn tick(&mut self, now: Millis) {
        if self.kind == PlatformKind::Moving {
            self.bounds.x += self.velocity;
            // Bounce off the screen, not the world
            if self.bounds.left() < 0 || self.bounds.right() > SCREEN_WIDTH {
                self.velocity = -self.velocity;
            }
        }

        if let (PlatformKind::Crumble(variant), Some(state)) = (self.kind, self.crumble.as_mut()) {
            let Some(fuse) = state.armed else {
                return;
            };
            if !state.expired && fuse.is_finished(now) {
                log::debug!("crumble platform at y={} gave way", self.bounds.y);
                state.expired = true;
            }
            if state.expired && fuse.elapsed(now) >= variant.base_duration_ms() + CRUMBLE_COOLDOWN_MS {
                log::debug!("crumble platform at y={} reset", self.bounds.y);
                *state = CrumbleState::default();
            }
        }
    }

    /// Called when the player lands on top; arms an unarmed crumble fuse
    pub fn on_player_landed(&mut self, now: Millis) {
        if let (PlatformKind::Crumble(variant), Some(state)) = (self.kind, self.crumble.as_mut()) {
            if state.armed.is_none() {
                state.armed = Some(Timer::start(now, variant.base_duration_ms()));
            }
        }
    }
}
