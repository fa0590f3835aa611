//! Fixed timestep run tick
//!
//! Phases run in a fixed order each tick: input -> player physics and
//! collision -> score and death -> checkpoints and collectibles -> camera ->
//! world stream.

use rand::Rng;

use super::catalog::ClimbMode;
use super::collectible::{COLLECTIBLE_NAMES, Collectible};
use super::player::PlayerInput;
use super::state::{
    CHECKPOINT_INTERVAL_M, COLLECTIBLE_CHANCE, COLLECTIBLE_INTERVAL_M, GameEvent, MILESTONES_M,
    RunPhase, Session,
};
use super::timer::Millis;
use super::tower::cull_line;
use crate::consts::*;

/// Advance a run by one tick at time `now`
pub fn tick(session: &mut Session, input: &PlayerInput, now: Millis) {
    session.events.clear();
    if session.phase == RunPhase::Dead {
        return;
    }

    let result = session
        .player
        .tick(session.tower.platforms_mut(), input, now);
    session.score = session.height_at(session.player.bounds.y);

    if result.died {
        session.phase = RunPhase::Dead;
        session.events.push(GameEvent::Died);
        log::info!("Player fell at {:.1} m", session.score);
        return;
    }

    announce_milestones(session);
    save_checkpoint(session);
    roll_collectible(session);
    pick_up_collectibles(session);

    let camera_top = session.camera_top();
    cull_collectibles(session, camera_top);
    session.tower.tick(camera_top, now);
}

fn announce_milestones(session: &mut Session) {
    for &m in &MILESTONES_M {
        if session.score >= f64::from(m) && !session.milestones_reached.contains(&m) {
            session.milestones_reached.push(m);
            session.events.push(GameEvent::Milestone(m));
            log::info!("Reached {} m", m);
        }
    }
}

/// Normal climbs save a checkpoint every `CHECKPOINT_INTERVAL_M` of progress
fn save_checkpoint(session: &mut Session) {
    if session.mode != ClimbMode::Normal
        || session.score < session.last_checkpoint + CHECKPOINT_INTERVAL_M
    {
        return;
    }
    session.last_checkpoint = session.score;
    session.progress.record_checkpoint(session.score);
    session.events.push(GameEvent::Checkpoint);
    log::info!("Checkpoint reached at {:.1} m", session.score);
}

/// Every `COLLECTIBLE_INTERVAL_M` of progress, maybe place an unowned collectible
/// in the upper half of the view
fn roll_collectible(session: &mut Session) {
    if session.score - session.last_collectible_roll < COLLECTIBLE_INTERVAL_M {
        return;
    }
    session.last_collectible_roll = session.score;
    let camera_top = session.camera_top();

    let rng = &mut session.rng;
    if rng.random::<f64>() >= COLLECTIBLE_CHANCE {
        return;
    }
    let index = rng.random_range(0..COLLECTIBLE_NAMES.len());
    let live = session.collectibles.iter().any(|c| c.index == index);
    if live || session.progress.has_collectible(index) {
        return;
    }
    let x = rng.random_range(50..=SCREEN_WIDTH - 50);
    let y = camera_top + rng.random_range(50..=SCREEN_HEIGHT / 2);
    log::debug!("spawned collectible {} at ({}, {})", COLLECTIBLE_NAMES[index], x, y);
    session.collectibles.push(Collectible::new(index, x, y));
}

fn pick_up_collectibles(session: &mut Session) {
    let body = session.player.bounds;
    let (taken, remaining): (Vec<Collectible>, Vec<Collectible>) = session
        .collectibles
        .drain(..)
        .partition(|c| body.overlaps(&c.bounds));
    session.collectibles = remaining;

    for c in taken {
        if session.progress.collect(c.index) {
            log::info!("Collected {}", c.name());
            session.events.push(GameEvent::Collected(c.index));
        }
    }
}

/// Drop collectibles that fell behind the camera along with the platforms
fn cull_collectibles(session: &mut Session, camera_top: i32) {
    let cull_y = cull_line(camera_top);
    session.collectibles.retain(|c| c.bounds.bottom() <= cull_y);
}
