//! Needed Climb entry point
//!
//! Headless runner: plays one climb with the demo bot at the fixed tick rate
//! and records the result like a real run would.
//!
//! Usage: `needed-climb [seed] [max_ticks] [checkpoint]`
//!
//! `checkpoint` picks an entry of the checkpoint menu; 0 starts from the bottom.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use needed_climb::consts::TICKS_PER_SECOND;
use needed_climb::highscores::HIGHSCORES_FILE;
use needed_climb::settings::SETTINGS_FILE;
use needed_climb::sim::{DemoBot, GameEvent, Session, SimClock, tick};
use needed_climb::{HighScores, Settings};

/// Ten minutes of play
const DEFAULT_MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let max_ticks = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);
    let checkpoint = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);

    let mut settings = Settings::load(SETTINGS_FILE);
    let mut high_scores = HighScores::load(HIGHSCORES_FILE);
    log::info!(
        "Needed Climb starting: seed={}, width={:?}, best={:?}",
        seed,
        settings.width_preset,
        high_scores.top_score()
    );

    let start_score = settings.progress.checkpoint_start(checkpoint);
    if start_score > 0.0 {
        log::info!("Starting from checkpoint {:.1} m", start_score);
    }
    let mut session = Session::from_checkpoint(
        seed,
        settings.climb_mode,
        settings.width_profile(),
        settings.progress.clone(),
        start_score,
    );
    let mut clock = SimClock::new();
    let mut bot = DemoBot::new(clock.now());
    let mut bot_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));

    while !session.is_over() && clock.ticks() < max_ticks {
        let now = clock.advance();
        let input = bot.input(&session.player, now, &mut bot_rng);
        tick(&mut session, &input, now);

        for event in session.events() {
            match event {
                GameEvent::Milestone(m) => log::info!("Milestone {} m at tick {}", m, clock.ticks()),
                GameEvent::Collected(i) => log::info!("Collectible {} picked up", i),
                GameEvent::Checkpoint => log::debug!("Checkpoint at {:.1} m", session.score),
                GameEvent::Died => log::info!("Died after {} ticks", clock.ticks()),
            }
        }
    }

    if !session.is_over() {
        log::info!("Tick cap reached ({} ticks)", max_ticks);
    }

    let summary = session.finish(&mut settings.progress);
    match high_scores.add_score(summary.score) {
        Some(rank) => log::info!("New high score #{}: {:.1} m", rank, summary.score),
        None => log::info!("Final height {:.1} m", summary.score),
    }
    log::info!(
        "{}: best {:.1} m, {} platforms live",
        summary.mode.as_str(),
        summary.best_height,
        session.tower.platforms().len()
    );

    log::info!("{}", high_scores.record_message());

    high_scores.save(HIGHSCORES_FILE);
    settings.save(SETTINGS_FILE);
}
