//! Collectibles, achievements, checkpoints and the player's unlock progress

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::ClimbMode;
use super::rect::Rect;

/// Random collectibles, indexed 0..16
pub const COLLECTIBLE_NAMES: [&str; 16] = [
    "Red", "Green", "Blue", "Yellow", "Cyan", "Magenta", "Orange", "Purple", "Pink", "Brown",
    "Teal", "Gold", "Silver", "Maroon", "Olive", "Turquoise",
];

/// Height achievements: 0..8 for the normal climb, 8..16 for the harder one
pub const ACHIEVEMENT_COUNT: usize = 16;
/// Meters between achievement tiers
pub const ACHIEVEMENT_STEP_M: f64 = 500.0;
pub const ACHIEVEMENT_TIERS: usize = 8;

/// Collectible side length in pixels
pub const COLLECTIBLE_SIZE: i32 = 20;

/// A collectible waiting in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub index: usize,
    pub bounds: Rect,
}

impl Collectible {
    pub fn new(index: usize, x: i32, y: i32) -> Self {
        debug_assert!(index < COLLECTIBLE_NAMES.len());
        Self {
            index,
            bounds: Rect::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
        }
    }

    pub fn name(&self) -> &'static str {
        COLLECTIBLE_NAMES[self.index]
    }
}

/// Display name for an achievement index
pub fn achievement_name(index: usize) -> String {
    let tier = index % ACHIEVEMENT_TIERS;
    let meters = (tier as f64 + 1.0) * ACHIEVEMENT_STEP_M;
    let mode = if index < ACHIEVEMENT_TIERS { "Normal" } else { "Hard" };
    format!("{meters}m {mode}")
}

/// Achievement indices earned by finishing a run at `score` meters
pub fn achievements_for(score: f64, mode: ClimbMode) -> impl Iterator<Item = usize> {
    let offset = match mode {
        ClimbMode::Normal => 0,
        ClimbMode::Harder => ACHIEVEMENT_TIERS,
    };
    (0..ACHIEVEMENT_TIERS)
        .filter(move |&i| score >= (i as f64 + 1.0) * ACHIEVEMENT_STEP_M)
        .map(move |i| i + offset)
}

/// Which unlock the crown shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crown {
    Collectible(usize),
    Achievement(usize),
}

/// Everything a player has unlocked across runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub collected: BTreeSet<usize>,
    pub achievements: BTreeSet<usize>,
    pub crown: Option<Crown>,
    /// Normal-mode checkpoint heights (meters), in the order they were reached
    #[serde(default)]
    pub checkpoints: Vec<f64>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_collectible(&self, index: usize) -> bool {
        self.collected.contains(&index)
    }

    pub fn collect(&mut self, index: usize) -> bool {
        self.collected.insert(index)
    }

    /// Unlock the achievements a finished run earned; returns the new ones
    pub fn record_run(&mut self, score: f64, mode: ClimbMode) -> Vec<usize> {
        let new: Vec<usize> = achievements_for(score, mode)
            .filter(|i| self.achievements.insert(*i))
            .collect();
        if !new.is_empty() {
            log::info!("Unlocked achievements: {:?}", new);
        }
        new
    }

    /// Save a checkpoint height; repeats are ignored
    pub fn record_checkpoint(&mut self, meters: f64) {
        if !self.checkpoints.contains(&meters) {
            self.checkpoints.push(meters);
        }
    }

    /// Labels for the checkpoint menu: "Start from Bottom" then each saved height
    pub fn checkpoint_options(&self) -> Vec<String> {
        std::iter::once("Start from Bottom".to_string())
            .chain(self.checkpoints.iter().map(|cp| format!("{cp:.1} m")))
            .collect()
    }

    /// Starting height for a checkpoint menu entry; 0 is the bottom
    pub fn checkpoint_start(&self, option: usize) -> f64 {
        option
            .checked_sub(1)
            .and_then(|i| self.checkpoints.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Wear a crown; only unlocked items can be chosen
    pub fn select_crown(&mut self, crown: Crown) -> bool {
        let owned = match crown {
            Crown::Collectible(i) => self.collected.contains(&i),
            Crown::Achievement(i) => self.achievements.contains(&i),
        };
        if owned {
            self.crown = Some(crown);
        }
        owned
    }
}
