//! Player physics body
//!
//! Per tick, in order: dash settle, input, dash start, gravity, integration,
//! collision, conveyor push, buffered jump. Every timed window (dash, coyote
//! time, jump buffer) is measured against the `now` passed in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::resolve_vertical;
use super::platform::Platform;
use super::rect::Rect;
use super::timer::{Millis, Timer};
use crate::consts::*;

// Physics (per tick at 60 Hz)
pub const MOVE_SPEED: f32 = 5.0;
pub const GRAVITY: f32 = 0.8;
pub const MAX_FALL_SPEED: f32 = 10.0;
pub const JUMP_STRENGTH: f32 = -15.0;

// Ice
pub const ICE_ACCEL: f32 = 1.0;
pub const ICE_MAX_SPEED: f32 = MOVE_SPEED * 3.0;
pub const ICE_DECAY: f32 = 0.999;

// Dash
pub const DASH_BOOST_MULTIPLIER: f32 = 3.0;
pub const DASH_DURATION_MS: Millis = 160;

// Forgiveness windows
pub const COYOTE_MS: Millis = 150;
pub const JUMP_BUFFER_MS: Millis = 150;

/// After falling this far, air control drops to half speed
pub const FALL_SLOWDOWN_DISTANCE: i32 = 500;

/// Discrete commands for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    /// Jump key went down this tick
    pub jump_requested: bool,
    /// Dash key went down this tick
    pub dash_requested: bool,
}

/// What happened to the player this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerTickResult {
    pub grounded: bool,
    /// Fell more than `DEATH_FALL_DISTANCE` below the best height reached
    pub died: bool,
    /// Horizontal displacement from a conveyor this tick
    pub landed_on_conveyor_delta: i32,
}

/// True once `y` is more than `DEATH_FALL_DISTANCE` below `peak_y`
#[inline]
pub fn is_dead(peak_y: i32, y: i32) -> bool {
    y > peak_y + DEATH_FALL_DISTANCE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Rect,
    pub vel: Vec2,
    pub facing_right: bool,
    grounded: bool,
    /// Last time the player stood on something; cleared by jumping
    grounded_at: Option<Millis>,
    on_ice: bool,
    dash: Option<Timer>,
    jump_buffer: Option<Millis>,
    /// y where the current fall began
    fall_start_y: Option<i32>,
    /// Smallest y ever reached
    peak_y: i32,
}

impl Player {
    /// Spawn standing on a surface whose top is `floor_y`, centered at `center_x`
    pub fn spawn(center_x: i32, floor_y: i32) -> Self {
        let bounds = Rect::new(
            center_x - PLAYER_WIDTH / 2,
            floor_y - PLAYER_HEIGHT,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        );
        Self {
            bounds,
            vel: Vec2::ZERO,
            facing_right: true,
            grounded: false,
            grounded_at: None,
            on_ice: false,
            dash: None,
            jump_buffer: None,
            fall_start_y: None,
            peak_y: bounds.y,
        }
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    #[inline]
    pub fn on_ice(&self) -> bool {
        self.on_ice
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dash.is_some()
    }

    /// Dashing grants invulnerability for the dash window
    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.is_dashing()
    }

    /// Best (smallest) y reached this run
    #[inline]
    pub fn peak_y(&self) -> i32 {
        self.peak_y
    }

    /// Advance one tick against `platforms`
    pub fn tick(&mut self, platforms: &mut [Platform], input: &PlayerInput, now: Millis) -> PlayerTickResult {
        self.settle_dash(now);

        if input.jump_requested {
            self.jump_buffer = Some(now);
        }
        self.apply_input(input);

        if input.dash_requested && self.dash.is_none() {
            self.start_dash(now);
        }

        self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL_SPEED);
        self.bounds.x += self.vel.x.round() as i32;
        self.bounds.y += self.vel.y.round() as i32;

        if self.grounded || self.fall_start_y.is_none() {
            self.fall_start_y = Some(self.bounds.y);
        }

        let collision = resolve_vertical(&mut self.bounds, &mut self.vel.y, platforms);
        self.grounded = false;
        self.on_ice = false;
        let mut conveyor_delta = 0;
        if let Some(index) = collision.landed_on {
            let plat = &mut platforms[index];
            plat.on_player_landed(now);
            self.grounded = true;
            self.grounded_at = Some(now);
            self.on_ice = plat.is_icy();

            conveyor_delta = plat.conveyor_speed();
            self.bounds.x += conveyor_delta;
        }

        self.resolve_jump(now);

        self.peak_y = self.peak_y.min(self.bounds.y);

        PlayerTickResult {
            grounded: self.grounded,
            died: is_dead(self.peak_y, self.bounds.y),
            landed_on_conveyor_delta: conveyor_delta,
        }
    }

    /// End an elapsed dash, keeping normal speed in the travel direction
    fn settle_dash(&mut self, now: Millis) {
        if let Some(dash) = self.dash {
            if dash.is_finished(now) {
                self.dash = None;
                if self.vel.x != 0.0 {
                    self.vel.x = MOVE_SPEED.copysign(self.vel.x);
                }
            }
        }
    }

    fn apply_input(&mut self, input: &PlayerInput) {
        if input.left {
            self.facing_right = false;
        } else if input.right {
            self.facing_right = true;
        }

        if self.on_ice {
            if input.left {
                self.vel.x -= ICE_ACCEL;
            } else if input.right {
                self.vel.x += ICE_ACCEL;
            } else {
                self.vel.x *= ICE_DECAY;
            }
            self.vel.x = self.vel.x.clamp(-ICE_MAX_SPEED, ICE_MAX_SPEED);
            return;
        }

        // A dash owns horizontal velocity until it settles
        if self.dash.is_some() {
            return;
        }

        let speed = if self.falling_far() {
            MOVE_SPEED * 0.5
        } else {
            MOVE_SPEED
        };
        self.vel.x = if input.left {
            -speed
        } else if input.right {
            speed
        } else {
            0.0
        };
    }

    fn falling_far(&self) -> bool {
        !self.grounded
            && self
                .fall_start_y
                .is_some_and(|start| self.bounds.y - start > FALL_SLOWDOWN_DISTANCE)
    }

    fn start_dash(&mut self, now: Millis) {
        let boost = MOVE_SPEED * (DASH_BOOST_MULTIPLIER - 1.0);
        if self.facing_right {
            self.vel.x += boost;
        } else {
            self.vel.x -= boost;
        }
        self.dash = Some(Timer::start(now, DASH_DURATION_MS));
    }

    fn resolve_jump(&mut self, now: Millis) {
        let Some(requested_at) = self.jump_buffer else {
            return;
        };
        if now.saturating_sub(requested_at) > JUMP_BUFFER_MS {
            self.jump_buffer = None;
            return;
        }
        let coyote = self
            .grounded_at
            .is_some_and(|t| now.saturating_sub(t) <= COYOTE_MS);
        if self.grounded || coyote {
            self.jump();
        }
    }

    fn jump(&mut self) {
        self.vel.y = JUMP_STRENGTH;
        self.grounded = false;
        self.grounded_at = None;
        self.on_ice = false;
        self.jump_buffer = None;
        self.fall_start_y = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::PlatformKind;
    use crate::sim::rect::Rect;

    const FLOOR: i32 = 500;

    fn floor() -> Vec<Platform> {
        vec![Platform::regular(0, FLOOR, SCREEN_WIDTH)]
    }

    fn standing_player(platforms: &mut [Platform]) -> Player {
        let mut player = Player::spawn(400, FLOOR);
        player.tick(platforms, &PlayerInput::default(), 0);
        assert!(player.grounded());
        player
    }

    fn hold_right() -> PlayerInput {
        PlayerInput {
            right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_player_stays_grounded() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        for t in 1..120 {
            let result = player.tick(&mut platforms, &PlayerInput::default(), t * 16);
            assert!(result.grounded);
            assert_eq!(player.bounds.bottom(), FLOOR);
        }
    }

    #[test]
    fn test_gravity_clamps_fall_speed() {
        let mut player = Player::spawn(400, 0);
        for t in 0..40 {
            player.tick(&mut [], &PlayerInput::default(), t * 16);
            assert!(player.vel.y <= MAX_FALL_SPEED);
        }
        assert_eq!(player.vel.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_walk_speed() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        let x0 = player.bounds.x;
        player.tick(&mut platforms, &hold_right(), 16);
        assert_eq!(player.bounds.x, x0 + 5);
        assert!(player.facing_right);

        let left = PlayerInput {
            left: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &left, 32);
        assert_eq!(player.bounds.x, x0);
        assert!(!player.facing_right);
    }

    #[test]
    fn test_landing_snap_boundary() {
        let mut platforms = vec![Platform::regular(0, 300, SCREEN_WIDTH)];
        // Pre-tick bottom 9px into the surface; moving 10px makes 19px
        let mut player = Player::spawn(400, 300 + 9);
        player.vel.y = MAX_FALL_SPEED;
        let result = player.tick(&mut platforms, &PlayerInput::default(), 0);
        assert!(result.grounded);
        assert_eq!(player.bounds.bottom(), 300);

        // 20px of penetration is too deep and falls through
        let mut player = Player::spawn(400, 300 + 10);
        player.vel.y = MAX_FALL_SPEED;
        let result = player.tick(&mut platforms, &PlayerInput::default(), 0);
        assert!(!result.grounded);
        assert_eq!(player.bounds.bottom(), 320);
    }

    #[test]
    fn test_dash_impulse_and_settle() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        player.tick(&mut platforms, &hold_right(), 16);
        assert_eq!(player.vel.x, 5.0);

        let dash = PlayerInput {
            right: true,
            dash_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &dash, 100);
        assert_eq!(player.vel.x, 15.0);
        assert!(player.invulnerable());

        player.tick(&mut platforms, &hold_right(), 259);
        assert_eq!(player.vel.x, 15.0);

        player.tick(&mut platforms, &hold_right(), 260);
        assert_eq!(player.vel.x, 5.0);
        assert!(!player.is_dashing());
    }

    #[test]
    fn test_dash_settles_to_speed_not_zero() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        let dash = PlayerInput {
            dash_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &dash, 0);
        assert_eq!(player.vel.x, 10.0);
        // No input held: the dash keeps its momentum until it settles
        player.tick(&mut platforms, &PlayerInput::default(), 100);
        assert_eq!(player.vel.x, 10.0);
        player.settle_dash(160);
        assert_eq!(player.vel.x, 5.0);
    }

    #[test]
    fn test_dash_facing_left() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        let dash_left = PlayerInput {
            left: true,
            dash_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &dash_left, 16);
        assert_eq!(player.vel.x, -15.0);
    }

    #[test]
    fn test_dash_does_not_restack() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        let dash = PlayerInput {
            right: true,
            dash_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &dash, 16);
        player.tick(&mut platforms, &dash, 32);
        assert_eq!(player.vel.x, 15.0);
    }

    #[test]
    fn test_conveyor_push() {
        let mut platforms = vec![Platform::new(
            Rect::new(0, FLOOR, SCREEN_WIDTH, 20),
            PlatformKind::Conveyor,
            -2,
        )];
        let mut player = Player::spawn(400, FLOOR);
        player.tick(&mut platforms, &PlayerInput::default(), 0);
        for t in 1..30 {
            let x0 = player.bounds.x;
            let result = player.tick(&mut platforms, &PlayerInput::default(), t * 16);
            assert_eq!(player.bounds.x, x0 - 2);
            assert_eq!(result.landed_on_conveyor_delta, -2);
        }
    }

    #[test]
    fn test_ice_accelerates_and_coasts() {
        let mut platforms = vec![Platform::new(Rect::new(0, FLOOR, SCREEN_WIDTH, 20), PlatformKind::Icy, 0)];
        let mut player = Player::spawn(100, FLOOR);
        player.tick(&mut platforms, &PlayerInput::default(), 0);
        assert!(player.on_ice());

        for t in 1..=30 {
            player.tick(&mut platforms, &hold_right(), t * 16);
        }
        assert_eq!(player.vel.x, ICE_MAX_SPEED);

        player.tick(&mut platforms, &PlayerInput::default(), 31 * 16);
        assert!((player.vel.x - ICE_MAX_SPEED * ICE_DECAY).abs() < 1e-4);
    }

    #[test]
    fn test_ice_input_is_additive() {
        let mut platforms = vec![Platform::new(Rect::new(0, FLOOR, SCREEN_WIDTH, 20), PlatformKind::Icy, 0)];
        let mut player = Player::spawn(400, FLOOR);
        player.tick(&mut platforms, &PlayerInput::default(), 0);
        player.tick(&mut platforms, &hold_right(), 16);
        assert_eq!(player.vel.x, 1.0);
        player.tick(&mut platforms, &hold_right(), 32);
        assert_eq!(player.vel.x, 2.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        let jump = PlayerInput {
            jump_requested: true,
            ..Default::default()
        };
        let result = player.tick(&mut platforms, &jump, 16);
        assert!(!result.grounded);
        assert_eq!(player.vel.y, JUMP_STRENGTH);

        player.tick(&mut platforms, &PlayerInput::default(), 32);
        assert!(player.bounds.bottom() < FLOOR);
    }

    #[test]
    fn test_jump_buffer_consumed_on_landing() {
        let mut platforms = floor();
        // Falling, 25px above the floor: lands on the third tick
        let mut player = Player::spawn(400, FLOOR - 25);
        player.vel.y = MAX_FALL_SPEED;
        let jump = PlayerInput {
            jump_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &jump, 1000);
        assert!(!player.grounded());
        player.tick(&mut platforms, &PlayerInput::default(), 1016);
        player.tick(&mut platforms, &PlayerInput::default(), 1032);
        // Landed within the buffer window and jumped straight away
        assert_eq!(player.vel.y, JUMP_STRENGTH);
    }

    #[test]
    fn test_stale_jump_buffer_expires() {
        let mut platforms = floor();
        let mut player = Player::spawn(400, FLOOR - 300);
        let jump = PlayerInput {
            jump_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &jump, 0);
        let mut t = 0;
        while !player.grounded() {
            t += 16;
            player.tick(&mut platforms, &PlayerInput::default(), t);
        }
        assert!(t > JUMP_BUFFER_MS);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_coyote_time() {
        let mut platforms = vec![Platform::regular(0, FLOOR, 200)];
        let jump = PlayerInput {
            jump_requested: true,
            ..Default::default()
        };

        let mut player = Player::spawn(100, FLOOR);
        player.tick(&mut platforms, &PlayerInput::default(), 1000);
        assert!(player.grounded());
        // Step off the edge
        player.bounds.x = 300;
        player.tick(&mut platforms, &PlayerInput::default(), 1050);
        assert!(!player.grounded());
        player.tick(&mut platforms, &jump, 1140);
        assert_eq!(player.vel.y, JUMP_STRENGTH);

        let mut late = Player::spawn(100, FLOOR);
        late.tick(&mut platforms, &PlayerInput::default(), 1000);
        late.bounds.x = 300;
        late.tick(&mut platforms, &PlayerInput::default(), 1050);
        late.tick(&mut platforms, &jump, 1200);
        assert!(late.vel.y > 0.0);
    }

    #[test]
    fn test_no_double_jump_from_coyote() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        let jump = PlayerInput {
            jump_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &jump, 16);
        player.tick(&mut platforms, &jump, 32);
        assert!((player.vel.y - (JUMP_STRENGTH + GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_landing_arms_crumble() {
        use crate::sim::platform::CrumbleVariant;
        let mut platforms = vec![Platform::new(
            Rect::new(0, FLOOR, SCREEN_WIDTH, 20),
            PlatformKind::Crumble(CrumbleVariant::Short),
            0,
        )];
        let mut player = Player::spawn(400, FLOOR);
        player.tick(&mut platforms, &PlayerInput::default(), 40);
        let armed = platforms[0].crumble_state().and_then(|c| c.armed);
        assert_eq!(armed.map(|t| t.started_at), Some(40));
    }

    #[test]
    fn test_death_threshold() {
        assert!(!is_dead(-5000, -5000 + 999));
        assert!(!is_dead(-5000, -5000 + 1000));
        assert!(is_dead(-5000, -5000 + 1001));
    }

    #[test]
    fn test_peak_never_reverses() {
        let mut platforms = floor();
        let mut player = standing_player(&mut platforms);
        let jump = PlayerInput {
            jump_requested: true,
            ..Default::default()
        };
        player.tick(&mut platforms, &jump, 16);
        let mut best = player.peak_y();
        for t in 2..200 {
            player.tick(&mut platforms, &PlayerInput::default(), t * 16);
            assert!(player.peak_y() <= best);
            best = player.peak_y();
        }
        assert!(best < FLOOR - PLAYER_HEIGHT);
        assert_eq!(player.bounds.bottom(), FLOOR);
    }

    #[test]
    fn test_falling_far_halves_air_control() {
        let mut player = Player::spawn(400, 0);
        let mut t = 0;
        while player.bounds.y - player.fall_start_y.unwrap_or(player.bounds.y) <= FALL_SLOWDOWN_DISTANCE {
            t += 16;
            player.tick(&mut [], &PlayerInput::default(), t);
        }
        player.tick(&mut [], &hold_right(), t + 16);
        assert_eq!(player.vel.x, MOVE_SPEED * 0.5);
    }
}
