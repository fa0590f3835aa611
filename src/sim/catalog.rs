//! Platform catalog: the difficulty curve of the tower
//!
//! Pure functions mapping (distance climbed, climb mode) to a sampled platform
//! specification. All randomness comes through [`RandomSource`] so a seeded
//! PCG stream or a scripted test source produce identical towers.
//!
//! Draw order for one platform is fixed: gap, horizontal offset, kind, kind
//! parameters. Changing it changes every seeded tower.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::platform::{CrumbleVariant, Platform, PlatformKind};
use crate::consts::*;
use crate::pixels_to_meters;

/// Vertical gap between consecutive platforms (inclusive range, pixels)
pub const GAP_MIN: i32 = 60;
pub const GAP_MAX: i32 = 110;

/// Maximum horizontal drift of a platform center from the previous one
pub const MAX_OFFSET: i32 = 150;

/// Source of uniform random draws for generation
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]`
    fn int_in(&mut self, lo: i32, hi: i32) -> i32;
    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;
}

impl RandomSource for Pcg32 {
    fn int_in(&mut self, lo: i32, hi: i32) -> i32 {
        self.random_range(lo..=hi)
    }

    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Pick one item uniformly
pub fn pick<T: Copy, R: RandomSource + ?Sized>(rng: &mut R, items: &[T]) -> T {
    assert!(!items.is_empty(), "cannot pick from an empty slice");
    let last = items.len() as i32 - 1;
    items[rng.int_in(0, last) as usize]
}

/// "A Normal Climb" or "A Harder Climb"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClimbMode {
    #[default]
    Normal,
    Harder,
}

impl ClimbMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimbMode::Normal => "A Normal Climb",
            ClimbMode::Harder => "A Harder Climb",
        }
    }
}

/// Named width-shrink presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WidthPreset {
    /// 250 px shrinking to 30 px, one pixel per 80 px climbed past 100 m
    #[default]
    Standard,
    /// 200 px shrinking to 50 px, one pixel per 50 px climbed past 500 m
    Compact,
}

impl WidthPreset {
    pub fn profile(&self) -> WidthProfile {
        match self {
            WidthPreset::Standard => WidthProfile::STANDARD,
            WidthPreset::Compact => WidthProfile::COMPACT,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(WidthPreset::Standard),
            "compact" => Some(WidthPreset::Compact),
            _ => None,
        }
    }
}

/// How platform width shrinks with height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthProfile {
    pub base_width: i32,
    pub min_width: i32,
    /// Pixels climbed per pixel of width lost
    pub shrink_divisor: i32,
    /// Height (meters) below which width stays at `base_width`
    pub shrink_threshold_m: i32,
}

impl WidthProfile {
    pub const STANDARD: WidthProfile = WidthProfile {
        base_width: 250,
        min_width: 30,
        shrink_divisor: 80,
        shrink_threshold_m: 100,
    };

    pub const COMPACT: WidthProfile = WidthProfile {
        base_width: 200,
        min_width: 50,
        shrink_divisor: 50,
        shrink_threshold_m: 500,
    };

    /// Build a custom profile
    ///
    /// # Panics
    /// On a profile that could produce non-positive or inverted widths.
    pub fn new(base_width: i32, min_width: i32, shrink_divisor: i32, shrink_threshold_m: i32) -> Self {
        let profile = Self {
            base_width,
            min_width,
            shrink_divisor,
            shrink_threshold_m,
        };
        profile.validate();
        profile
    }

    fn validate(&self) {
        assert!(self.min_width > 0, "min_width must be positive");
        assert!(
            self.min_width <= self.base_width,
            "min_width {} exceeds base_width {}",
            self.min_width,
            self.base_width
        );
        assert!(self.base_width <= SCREEN_WIDTH, "base_width wider than the screen");
        assert!(self.shrink_divisor > 0, "shrink_divisor must be positive");
        assert!(self.shrink_threshold_m >= 0, "shrink_threshold_m must not be negative");
    }

    fn threshold_px(&self) -> i32 {
        (f64::from(self.shrink_threshold_m) * PIXELS_PER_METER) as i32
    }

    /// Platform width at `distance` pixels above the tower base
    pub fn width_at(&self, distance: i32) -> i32 {
        let threshold = self.threshold_px();
        if distance < threshold {
            return self.base_width;
        }
        let shrink = (distance - threshold) / self.shrink_divisor;
        (self.base_width - shrink).max(self.min_width)
    }
}

impl Default for WidthProfile {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A sampled platform before placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSpec {
    pub width: i32,
    pub kind: PlatformKind,
    /// Signed horizontal speed for Moving and Conveyor kinds, zero otherwise
    pub speed: i32,
}

/// Width for a platform at `distance` pixels above the base
pub fn platform_width(distance: i32, mode: ClimbMode, profile: &WidthProfile) -> i32 {
    match mode {
        ClimbMode::Normal => profile.width_at(distance),
        ClimbMode::Harder => profile.min_width,
    }
}

/// Sample the platform kind for a platform `distance` pixels above the base
pub fn sample_kind<R: RandomSource + ?Sized>(distance: i32, mode: ClimbMode, rng: &mut R) -> PlatformKind {
    use CrumbleVariant::{Long, Short};
    use PlatformKind::*;

    if mode == ClimbMode::Harder {
        if rng.unit() < 0.9 {
            return Crumble(Short);
        }
        // The residual 10% splits again on a fresh draw
        let r = rng.unit();
        return if r < 0.1 {
            Moving
        } else if r < 0.2 {
            Conveyor
        } else {
            Regular
        };
    }

    let d = pixels_to_meters(distance);
    if d < 500.0 {
        Regular
    } else if d < 1000.0 {
        if rng.unit() < 0.1 { Moving } else { Regular }
    } else if d < 1500.0 {
        let r = rng.unit();
        if r < 0.1 {
            Moving
        } else if r < 0.2 {
            Conveyor
        } else {
            Regular
        }
    } else if d < 2000.0 {
        let r = rng.unit();
        if r < 0.15 {
            Moving
        } else if r < 0.30 {
            Conveyor
        } else if r < 0.45 {
            Icy
        } else {
            Regular
        }
    } else if d < 2500.0 {
        let r = rng.unit();
        if r < 0.15 {
            Moving
        } else if r < 0.30 {
            Conveyor
        } else if r < 0.45 {
            Icy
        } else if r < 0.60 {
            Crumble(Long)
        } else {
            Regular
        }
    } else if rng.unit() < 0.2 {
        Regular
    } else {
        pick(rng, &[Moving, Conveyor, Icy, Crumble(Long), Crumble(Short)])
    }
}

/// Signed speed for a freshly sampled kind
fn sample_speed<R: RandomSource + ?Sized>(kind: PlatformKind, rng: &mut R) -> i32 {
    match kind {
        PlatformKind::Moving => pick(rng, &[1, -1]),
        PlatformKind::Conveyor => pick(rng, &[1, -1, 2, -2]),
        _ => 0,
    }
}

/// Sample width, kind and kind parameters for a platform `distance` pixels up
pub fn sample_spec<R: RandomSource + ?Sized>(
    distance: i32,
    mode: ClimbMode,
    profile: &WidthProfile,
    rng: &mut R,
) -> PlatformSpec {
    let width = platform_width(distance, mode, profile);
    debug_assert!(width >= profile.min_width && width <= profile.base_width);
    let kind = sample_kind(distance, mode, rng);
    let speed = sample_speed(kind, rng);
    PlatformSpec { width, kind, speed }
}

/// Clamp a platform center so a platform of `width` stays fully on screen
///
/// Odd widths put the extra pixel right of center, so the upper bound uses the
/// rounded-up half.
#[inline]
pub fn clamp_center(center_x: i32, width: i32) -> i32 {
    center_x.clamp(width / 2, SCREEN_WIDTH - (width - width / 2))
}

/// Generate the platform above one centered at `prev_center_x` with top `prev_y`
pub fn next_platform<R: RandomSource + ?Sized>(
    prev_center_x: i32,
    prev_y: i32,
    base_y: i32,
    mode: ClimbMode,
    profile: &WidthProfile,
    rng: &mut R,
) -> Platform {
    let gap = rng.int_in(GAP_MIN, GAP_MAX);
    let new_y = prev_y - gap;
    let distance = base_y - new_y;

    let offset = rng.int_in(-MAX_OFFSET, MAX_OFFSET);
    let spec = sample_spec(distance, mode, profile, rng);

    let center_x = clamp_center(prev_center_x + offset, spec.width);
    let x = center_x - spec.width / 2;
    Platform::from_spec(&spec, x, new_y)
}

/// Deterministic random source replaying scripted draws
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    ints: std::collections::VecDeque<i32>,
    units: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(ints: &[i32], units: &[f64]) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            units: units.iter().copied().collect(),
        }
    }

    /// A source whose integer draws are always `lo` and unit draws `unit`
    pub(crate) fn constant(unit: f64) -> Self {
        Self::new(&[], &[unit])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn int_in(&mut self, lo: i32, hi: i32) -> i32 {
        match self.ints.pop_front() {
            Some(v) => {
                assert!(v >= lo && v <= hi, "scripted {v} outside [{lo}, {hi}]");
                v
            }
            None => lo,
        }
    }

    fn unit(&mut self) -> f64 {
        // The last scripted unit repeats once the queue runs dry
        if self.units.len() > 1 {
            self.units.pop_front().unwrap_or(0.0)
        } else {
            self.units.front().copied().unwrap_or(0.0)
        }
    }
}
