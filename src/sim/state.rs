//! Run state: one climb from spawn to death
//!
//! Ties a `Player` to a `Tower` and tracks the score, milestones and
//! collectibles of a single run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::{ClimbMode, WidthProfile};
use super::collectible::{Collectible, Progress};
use super::player::Player;
use super::tower::Tower;
use crate::consts::*;
use crate::score_meters;

/// Voice-line heights (meters), each announced once per run
pub const MILESTONES_M: [u32; 5] = [1000, 3000, 5000, 7000, 9000];

/// Meters of progress between collectible spawn rolls
pub const COLLECTIBLE_INTERVAL_M: f64 = 200.0;
/// Chance a roll spawns a collectible
pub const COLLECTIBLE_CHANCE: f64 = 1.0 / 8.0;

/// Meters of progress between Normal-mode checkpoints
pub const CHECKPOINT_INTERVAL_M: f64 = 200.0;

/// Things external collaborators (audio, HUD) react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Score crossed a voice-line height for the first time
    Milestone(u32),
    /// A collectible was picked up for the first time
    Collected(usize),
    /// A Normal-mode checkpoint was saved at the current height
    Checkpoint,
    /// Fell too far below the best height
    Died,
}

/// Whether the run is still going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Climbing,
    Dead,
}

/// Final numbers of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub score: f64,
    pub best_height: f64,
    pub mode: ClimbMode,
}

pub struct Session {
    pub mode: ClimbMode,
    /// Ground top; all height math is relative to this
    pub start_y: i32,
    /// Height credited at spawn when starting from a checkpoint
    pub start_score: f64,
    pub tower: Tower,
    pub player: Player,
    pub phase: RunPhase,
    /// Instantaneous height in meters (drops when falling)
    pub score: f64,
    /// Collectibles currently in the world
    pub collectibles: Vec<Collectible>,
    /// Owned unlocks; updated as collectibles are picked up
    pub progress: Progress,
    /// Score at the last collectible roll
    pub(super) last_collectible_roll: f64,
    /// Score at the last saved checkpoint
    pub(super) last_checkpoint: f64,
    pub(super) milestones_reached: Vec<u32>,
    pub(super) events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
}

impl Session {
    /// Start a run on a fresh tower; `progress` decides which collectibles can still spawn
    pub fn new(seed: u64, mode: ClimbMode, profile: WidthProfile, progress: Progress) -> Self {
        Self::from_checkpoint(seed, mode, profile, progress, 0.0)
    }

    /// Start a run credited with `start_score` meters; only Normal climbs use checkpoints
    pub fn from_checkpoint(
        seed: u64,
        mode: ClimbMode,
        profile: WidthProfile,
        progress: Progress,
        start_score: f64,
    ) -> Self {
        let start_y = SCREEN_HEIGHT - 50;
        let start_score = match mode {
            ClimbMode::Normal => start_score.max(0.0),
            ClimbMode::Harder => 0.0,
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let tower_seed = rng.random::<u64>();
        log::info!(
            "Starting {} (seed {}, from {:.1} m)",
            mode.as_str(),
            seed,
            start_score
        );
        let player = Player::spawn(SCREEN_WIDTH / 2, start_y);
        let score = start_score + score_meters(start_y, player.bounds.y);
        Self {
            mode,
            start_y,
            start_score,
            tower: Tower::seeded(tower_seed, start_y, mode, profile),
            player,
            phase: RunPhase::Climbing,
            score,
            collectibles: Vec::new(),
            progress,
            last_collectible_roll: start_score,
            last_checkpoint: start_score,
            milestones_reached: Vec::new(),
            events: Vec::new(),
            rng,
        }
    }

    /// Run height in meters for a player top edge at `y`
    #[inline]
    pub fn height_at(&self, y: i32) -> f64 {
        self.start_score + score_meters(self.start_y, y)
    }

    /// Top of the visible window, keeping the player vertically centered
    #[inline]
    pub fn camera_top(&self) -> i32 {
        self.player.bounds.y - SCREEN_HEIGHT / 2
    }

    /// World y of the best height reached
    #[inline]
    pub fn max_height_reached(&self) -> i32 {
        self.player.peak_y()
    }

    /// Best height reached, in meters
    pub fn best_score(&self) -> f64 {
        self.height_at(self.max_height_reached())
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::Dead
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            best_height: self.best_score(),
            mode: self.mode,
        }
    }

    /// Apply a finished run's achievements to `progress`
    pub fn finish(&self, progress: &mut Progress) -> RunSummary {
        let summary = self.summary();
        progress.collected.extend(self.progress.collected.iter().copied());
        for &cp in &self.progress.checkpoints {
            progress.record_checkpoint(cp);
        }
        progress.record_run(summary.score, self.mode);
        log::info!(
            "Run over: {:.1} m (best {:.1} m)",
            summary.score,
            summary.best_height
        );
        summary
    }
}
