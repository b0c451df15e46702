use coach_engine::errors::GameError;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("game error: {0}")]
    Game(#[from] GameError),
    #[error("table state poisoned")]
    StatePoisoned,
}
