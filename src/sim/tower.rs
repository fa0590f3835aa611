//! The streaming tower
//!
//! Owns every live platform. Generation runs upward ahead of the camera and
//! culling runs behind it, so the live set stays a few screens tall no matter
//! how high the climb goes.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::catalog::{ClimbMode, RandomSource, WidthProfile, next_platform};
use super::platform::Platform;
use super::timer::Millis;
use crate::consts::*;

/// Initial generation fills this many screens above the base
pub const INITIAL_SCREENS: i32 = 2;

pub struct Tower<R: RandomSource = Pcg32> {
    /// Live platforms in generation order; the ground is always first
    platforms: Vec<Platform>,
    base_y: i32,
    /// y of the most recently generated platform
    highest_generated_y: i32,
    mode: ClimbMode,
    profile: WidthProfile,
    rng: R,
}

impl Tower<Pcg32> {
    /// Build a tower from a seeded PCG stream
    pub fn seeded(seed: u64, base_y: i32, mode: ClimbMode, profile: WidthProfile) -> Self {
        Self::generate_initial(base_y, mode, profile, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Tower<R> {
    /// Lay the ground at `base_y` and stack platforms two screens up
    pub fn generate_initial(base_y: i32, mode: ClimbMode, profile: WidthProfile, rng: R) -> Self {
        let mut tower = Self {
            platforms: vec![Platform::ground(base_y)],
            base_y,
            highest_generated_y: base_y,
            mode,
            profile,
            rng,
        };

        let mut last_center_x = SCREEN_WIDTH / 2;
        let mut last_y = base_y;
        while last_y > base_y - SCREEN_HEIGHT * INITIAL_SCREENS {
            let plat = tower.generate_above(last_center_x, last_y);
            last_center_x = plat.bounds().center_x();
            last_y = plat.bounds().y;
        }

        log::info!(
            "Tower generated: {} platforms, mode={:?}, frontier={}",
            tower.platforms.len(),
            mode,
            tower.highest_generated_y
        );
        tower
    }

    fn generate_above(&mut self, center_x: i32, y: i32) -> &Platform {
        let plat = next_platform(center_x, y, self.base_y, self.mode, &self.profile, &mut self.rng);
        log::debug!(
            "platform {} at y={} width={}",
            plat.kind().label(),
            plat.bounds().y,
            plat.bounds().width
        );
        self.highest_generated_y = plat.bounds().y;
        self.platforms.push(plat);
        &self.platforms[self.platforms.len() - 1]
    }

    /// Advance platform behavior, cull below the camera, generate above it
    pub fn tick(&mut self, camera_top_y: i32, now: Millis) {
        for plat in &mut self.platforms {
            plat.tick(now);
        }

        let cull_y = cull_line(camera_top_y);
        let before = self.platforms.len();
        self.platforms
            .retain(|p| p.is_ground() || p.bounds().bottom() <= cull_y);
        let culled = before - self.platforms.len();
        if culled > 0 {
            log::debug!("culled {} platforms below y={}", culled, cull_y);
        }

        while self.highest_generated_y > camera_top_y - FRONTIER_MARGIN {
            let top = self.topmost().bounds();
            self.generate_above(top.center_x(), top.y);
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Mutable access for collision side effects during the player tick
    pub fn platforms_mut(&mut self) -> &mut [Platform] {
        &mut self.platforms
    }

    #[inline]
    pub fn base_y(&self) -> i32 {
        self.base_y
    }

    /// Generation frontier: y of the latest generated platform
    #[inline]
    pub fn frontier(&self) -> i32 {
        self.highest_generated_y
    }

    #[inline]
    pub fn mode(&self) -> ClimbMode {
        self.mode
    }

    #[inline]
    pub fn profile(&self) -> &WidthProfile {
        &self.profile
    }

    /// The highest live platform (the ground is never culled, so one exists)
    pub fn topmost(&self) -> &Platform {
        self.platforms
            .iter()
            .min_by_key(|p| p.bounds().y)
            .unwrap_or(&self.platforms[0])
    }
}

/// Platforms whose bottom has passed this y are culled: one screen below the
/// visible window plus a buffer
#[inline]
pub fn cull_line(camera_top_y: i32) -> i32 {
    camera_top_y + SCREEN_HEIGHT * 2 + CULL_BUFFER
}
