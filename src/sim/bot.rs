//! Demo bot for the menu background
//!
//! Drives the real player/tower tick path with randomized input instead of a
//! keyboard, so it doubles as a fuzz harness for the simulation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::{ClimbMode, RandomSource, WidthProfile, pick};
use super::player::{Player, PlayerInput};
use super::timer::{Millis, Timer};
use super::tower::Tower;
use crate::consts::*;

/// Random interval between direction changes (ms, inclusive)
pub const FLIP_MIN_MS: i32 = 1000;
pub const FLIP_MAX_MS: i32 = 3000;
/// Chance per grounded tick that the bot jumps
pub const JUMP_CHANCE: f64 = 0.03;
/// Distance from a screen edge that forces the bot to turn around
pub const EDGE_MARGIN: i32 = 10;

#[derive(Debug, Clone)]
pub struct DemoBot {
    /// -1 for left, 1 for right
    direction: i32,
    next_flip: Timer,
}

impl DemoBot {
    pub fn new(now: Millis) -> Self {
        Self {
            direction: 1,
            next_flip: Timer::start(now, FLIP_MIN_MS as Millis),
        }
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Choose this tick's input for `player`
    pub fn input<R: RandomSource + ?Sized>(&mut self, player: &Player, now: Millis, rng: &mut R) -> PlayerInput {
        if self.next_flip.is_finished(now) {
            self.direction = pick(rng, &[-1, 1]);
            let wait = rng.int_in(FLIP_MIN_MS, FLIP_MAX_MS);
            self.next_flip = Timer::start(now, wait as Millis);
        }

        if player.bounds.right() > SCREEN_WIDTH - EDGE_MARGIN {
            self.direction = -1;
        } else if player.bounds.left() < EDGE_MARGIN {
            self.direction = 1;
        }

        PlayerInput {
            left: self.direction < 0,
            right: self.direction > 0,
            jump_requested: player.grounded() && rng.unit() < JUMP_CHANCE,
            dash_requested: false,
        }
    }
}

/// A self-playing climb for the menu background
pub struct DemoRun {
    pub tower: Tower,
    pub player: Player,
    bot: DemoBot,
    rng: Pcg32,
    base_y: i32,
    restarts: u32,
}

impl DemoRun {
    pub fn new(seed: u64, now: Millis) -> Self {
        let base_y = SCREEN_HEIGHT - 50;
        let mut rng = Pcg32::seed_from_u64(seed);
        let tower_seed = rng.random::<u64>();
        Self {
            tower: Tower::seeded(tower_seed, base_y, ClimbMode::Normal, WidthProfile::STANDARD),
            player: Player::spawn(SCREEN_WIDTH / 2, base_y),
            bot: DemoBot::new(now),
            rng,
            base_y,
            restarts: 0,
        }
    }

    /// Camera top keeping the bot centered vertically
    pub fn camera_top(&self) -> i32 {
        self.player.bounds.y - SCREEN_HEIGHT / 2
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// One tick of the background climb; a fallen bot restarts on a fresh tower
    pub fn tick(&mut self, now: Millis) {
        let input = self.bot.input(&self.player, now, &mut self.rng);
        let result = self.player.tick(self.tower.platforms_mut(), &input, now);
        if result.died {
            self.restart(now);
            return;
        }
        self.tower.tick(self.camera_top(), now);
    }

    fn restart(&mut self, now: Millis) {
        self.restarts += 1;
        log::debug!("demo bot fell, restarting ({})", self.restarts);
        let tower_seed = self.rng.random::<u64>();
        self.tower = Tower::seeded(tower_seed, self.base_y, ClimbMode::Normal, WidthProfile::STANDARD);
        self.player = Player::spawn(SCREEN_WIDTH / 2, self.base_y);
        self.bot = DemoBot::new(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::ScriptedRandom;
    use crate::sim::tower::cull_line;
    use proptest::prelude::*;

    #[test]
    fn test_bot_turns_at_edges() {
        let mut bot = DemoBot::new(0);
        let mut rng = ScriptedRandom::constant(0.5);
        let mut player = Player::spawn(SCREEN_WIDTH - 5, 500);
        let input = bot.input(&player, 10, &mut rng);
        assert!(input.left && !input.right);

        player.bounds.x = 2;
        let input = bot.input(&player, 20, &mut rng);
        assert!(input.right && !input.left);
    }

    #[test]
    fn test_bot_flips_on_timer() {
        let mut bot = DemoBot::new(0);
        // First flip draws index 0 (left) then a 2000ms wait
        let mut rng = ScriptedRandom::new(&[0, 2000], &[0.5]);
        let player = Player::spawn(400, 500);
        assert!(bot.input(&player, 999, &mut rng).right);
        let input = bot.input(&player, 1000, &mut rng);
        assert!(input.left);
        assert_eq!(bot.direction(), -1);
        // Still left before the new wait elapses
        assert!(bot.input(&player, 2999, &mut rng).left);
    }

    #[test]
    fn test_bot_only_jumps_when_grounded() {
        let mut bot = DemoBot::new(0);
        let mut rng = ScriptedRandom::constant(0.0);
        let player = Player::spawn(400, 500);
        assert!(!player.grounded());
        assert!(!bot.input(&player, 0, &mut rng).jump_requested);
    }

    #[test]
    fn test_demo_run_keeps_going() {
        let mut run = DemoRun::new(1234, 0);
        let mut now = 0;
        for _ in 0..3000 {
            now += 16;
            run.tick(now);
            assert!(run.tower.platforms()[0].is_ground());
        }
        assert!(run.player.bounds.y < SCREEN_HEIGHT * 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_bot_climb_keeps_world_invariants(seed in any::<u64>()) {
            let mut run = DemoRun::new(seed, 0);
            let mut now = 0;
            for _ in 0..1500 {
                now += 16;
                run.tick(now);
                let camera_top = run.camera_top();
                prop_assert!(run.tower.topmost().bounds().y <= camera_top - crate::consts::FRONTIER_MARGIN);
                let cull_y = cull_line(camera_top);
                for plat in run.tower.platforms() {
                    prop_assert!(plat.is_ground() || plat.bounds().bottom() <= cull_y);
                }
                prop_assert!(run.player.peak_y() <= run.player.bounds.y);
            }
        }
    }
}
