//! Pocket Shot entry point
//!
//! Deals a table from a seed, evaluates every aim on it and plays the first
//! shot that finds a pocket.
//!
//! Usage: `pocket-shot [seed] [settings.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use pocket_shot::Settings;
use pocket_shot::geom::Point;
use pocket_shot::sim::{GameEvent, Session, ShotParams, TickInput, calculate_trajectory, tick};

/// An aim that ends in a pocket
#[derive(Debug, Serialize)]
struct PocketingAim {
    cell: (u32, u32),
    contacts: usize,
    pocket: Point,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    let settings = args.next().map(Settings::load_or_default).unwrap_or_default();

    log::info!("Pocket Shot starting with seed {}", seed);
    if let Err(e) = run(settings, seed) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run(settings: Settings, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    settings.validate()?;
    let mut session = Session::new(settings, seed)?;
    let round = &session.round;
    let params = ShotParams::from(&session.settings);

    println!(
        "Table {}x{} cells, ball at {:?} {}",
        round.params.width_cells, round.params.height_cells, round.params.ball_cell, round.ball
    );

    let mut pocketing = Vec::new();
    for target in round.board.grid.iter().filter(|g| g.point != round.ball) {
        let trajectory = calculate_trajectory(&round.board, round.ball, target.point, &params)?;
        println!(
            "  aim {:?}: {} contacts, {:?}",
            target.cell,
            trajectory.points.len(),
            trajectory.termination
        );
        if let Some(pocket) = trajectory.pocket {
            pocketing.push(PocketingAim {
                cell: target.cell,
                contacts: trajectory.points.len(),
                pocket,
            });
        }
    }
    println!("{}", serde_json::to_string_pretty(&pocketing)?);

    let Some(best) = pocketing.iter().min_by_key(|aim| aim.contacts) else {
        println!("No aim on this table reaches a pocket");
        return Ok(());
    };
    let click = session.round.board.grid_point(best.cell);
    let mut input = TickInput {
        click,
        hit: true,
        ..Default::default()
    };
    loop {
        let events = tick(&mut session, &input)?;
        input = TickInput::default();
        if let Some(GameEvent::ShotSettled { outcome, score }) = events
            .into_iter()
            .find(|e| matches!(e, GameEvent::ShotSettled { .. }))
        {
            println!("Played aim {:?}: {:?}, score {}", best.cell, outcome, score);
            break;
        }
    }
    Ok(())
}
