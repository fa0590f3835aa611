//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time comes from the caller as `Millis`, never from a wall clock
//! - No rendering, audio or input-device dependencies

pub mod bot;
pub mod catalog;
pub mod collectible;
pub mod collision;
pub mod platform;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod timer;
pub mod tower;

pub use bot::{DemoBot, DemoRun};
pub use catalog::{
    ClimbMode, PlatformSpec, RandomSource, WidthPreset, WidthProfile, next_platform,
    platform_width, sample_kind, sample_spec,
};
pub use collectible::{Collectible, Crown, Progress};
pub use collision::{CollisionResult, resolve_vertical};
pub use platform::{CrumbleState, CrumbleVariant, Platform, PlatformKind};
pub use player::{Player, PlayerInput, PlayerTickResult};
pub use rect::Rect;
pub use state::{GameEvent, RunPhase, RunSummary, Session};
pub use tick::tick;
pub use timer::{Millis, SimClock, Timer};
pub use tower::Tower;
