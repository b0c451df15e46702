//! # coach-table: Single-Table Hold'em Trainer
//!
//! Seats a human against personality AI opponents. [`game::PokerGame`] owns
//! the engine and plays AI turns on cancellable tokio timers so a front end
//! only has to submit the human's actions and render snapshots.
//!
//! ## Modules
//!
//! - [`game`] - The table facade and AI turn scheduler
//! - [`settings`] - Trainer settings loaded from TOML
//! - [`logging`] - Subscriber setup and a capture layer for tests
//! - [`errors`] - Table-level error type

pub mod errors;
pub mod game;
pub mod logging;
pub mod settings;

pub use errors::TableError;
pub use game::PokerGame;
pub use settings::{GameSettings, SettingsError};
