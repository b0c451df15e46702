//! Watches AI opponents play a table from the terminal.
//!
//! Usage: cargo run -p coach-table -- --hands 5 --fast

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use coach_engine::player::{ActionKind, PlayerAction};
use coach_table::settings::AiThinkTime;
use coach_table::{GameSettings, PokerGame, TableError};

#[derive(Parser, Debug)]
#[command(name = "coach-table", about = "Run a Hold'em trainer table with AI opponents")]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hands to play before exiting
    #[arg(long, default_value_t = 3)]
    hands: u32,
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the AI thinking pause
    #[arg(long)]
    fast: bool,
}

/// The human seat checks when it can and calls otherwise.
fn passive_action(legal: &[ActionKind]) -> PlayerAction {
    if legal.contains(&ActionKind::Check) {
        PlayerAction::Check
    } else if legal.contains(&ActionKind::Call) {
        PlayerAction::Call
    } else {
        PlayerAction::Fold
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    coach_table::logging::init_logging()?;
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if args.fast {
        settings.ai_think_time_ms = AiThinkTime { min: 0, max: 0 };
    }

    let game = PokerGame::new(settings)?;
    println!("game {}", game.game_id());
    game.start_ai_actions();

    for _ in 0..args.hands {
        match game.start_new_hand() {
            Ok(()) => {}
            Err(TableError::Game(err)) => {
                println!("table finished: {err}");
                break;
            }
            Err(err) => return Err(err.into()),
        }
        while !game.is_hand_complete() {
            let human_turn = game.current_player()?.is_some_and(|p| p.is_human);
            if human_turn {
                let action = passive_action(&game.valid_actions()?);
                game.player_action(action);
            } else if !game.ai_turn_pending() {
                game.play_ai_turn();
            } else {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        }
        let state = game.game_state()?;
        if let Some(result) = &state.last_result {
            for payout in &result.payouts {
                println!(
                    "hand {}: {} wins {}",
                    result.hand_number, state.players[payout.seat].display_name, payout.amount
                );
            }
        }
    }

    game.stop_ai_actions();
    for seat in 1..game.game_state()?.players.len() {
        if let (Some(name), Some(stats)) = (game.ai_name(seat), game.ai_stats(seat)) {
            println!(
                "seat {seat} {name}: {} hands, VPIP {:.0}%, PFR {:.0}%",
                stats.hands_played,
                stats.vpip(),
                stats.pfr()
            );
        }
    }
    Ok(())
}
