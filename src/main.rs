use std::thread;
use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use log::info;

mod core;
mod engine;
mod game;

use engine::game_loop::FrameClock;
use game::{Arena, Direction, GameSession, SessionEvent};

/// How long the scripted demo may run before giving up
const DEMO_TIME_BUDGET_SECS: f32 = 30.0;

/// Player/enemy distance below which the autopilot stops steering
const CATCH_RADIUS: f32 = 2.0;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting box-chase...");

    let arena = Arena::new(390.0, 844.0);
    let mut session = match std::env::args().nth(1) {
        Some(seed) => GameSession::with_seed(arena, seed.parse()?),
        None => GameSession::new(arena),
    };

    // Headless demo: an autopilot "finger" drags the enemy toward the
    // player while the player steers toward the enemy, restarting after a
    // loss, until the level is completed or the time budget runs out.
    let mut clock = FrameClock::new();
    loop {
        if !session.is_game_started() || session.is_game_over() {
            session.start_game();
        }

        let delta_ms = clock.begin_frame();
        session.update(delta_ms);

        for event in session.poll_events() {
            match event {
                SessionEvent::Started => info!("session running"),
                SessionEvent::ScoreChanged(score) => {
                    // The player flashes a new color on every catch
                    let color = session
                        .sprites()
                        .iter()
                        .find(|sprite| sprite.name == "player")
                        .map(|sprite| sprite.color.to_string())
                        .unwrap_or_default();
                    info!("score: {score} (player now {color})");
                }
                SessionEvent::GameOver { won: true } => info!("level completed!"),
                SessionEvent::GameOver { won: false } => info!("game over, restarting"),
            }
        }

        if session.level_completed() {
            break;
        }
        if clock.elapsed_secs() > DEMO_TIME_BUDGET_SECS {
            info!("demo time budget reached, stopping");
            break;
        }

        steer(&mut session);
        thread::sleep(Duration::from_millis(16));
    }

    info!(
        "demo finished after {} frames at {:.0} fps (score {}, completed {})",
        clock.frame_count(),
        clock.fps(),
        session.score(),
        session.level_completed()
    );

    Ok(())
}

/// Steer the player toward the enemy one axis at a time and drag the enemy
/// toward the player, so the two converge
fn steer(session: &mut GameSession) {
    let Some((player, enemy)) = centers(session) else {
        return;
    };

    let gap = enemy - player;
    if gap.length() < CATCH_RADIUS {
        session.stop_player();
    } else if gap.x.abs() > gap.y.abs() {
        session.move_player(if gap.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        });
    } else {
        session.move_player(if gap.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        });
    }

    // Gesture deltas get scaled down by the drag factor downstream, so a
    // small step per frame is plenty
    session.drag_enemy((-gap).clamp_length_max(20.0));
}

/// Current player and enemy box centers, if a session is live
fn centers(session: &GameSession) -> Option<(Vec2, Vec2)> {
    let sprites = session.sprites();
    let center = |name: &str| {
        sprites
            .iter()
            .find(|sprite| sprite.name == name)
            .map(|sprite| sprite.top_left + sprite.size / 2.0)
    };
    Some((center("player")?, center("enemy")?))
}
