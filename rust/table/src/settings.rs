use std::fs;
use std::path::Path;

use coach_engine::game::{ShowOpponentCards, TableConfig, MAX_PLAYERS, MIN_PLAYERS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How often training quizzes pop up between hands.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizFrequency {
    Low,
    #[default]
    Medium,
    High,
}

impl QuizFrequency {
    pub fn trigger_probability(self) -> f64 {
        match self {
            QuizFrequency::Low => 0.10,
            QuizFrequency::Medium => 0.25,
            QuizFrequency::High => 0.40,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Bounds of the simulated AI thinking pause, in milliseconds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct AiThinkTime {
    pub min: u64,
    pub max: u64,
}

impl Default for AiThinkTime {
    fn default() -> Self {
        Self {
            min: 500,
            max: 3000,
        }
    }
}

/// Trainer settings, loadable from TOML. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub num_players: usize,
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub show_opponent_cards: ShowOpponentCards,
    pub quiz_frequency: QuizFrequency,
    pub difficulty: Difficulty,
    pub enable_hints: bool,
    pub seed: Option<u64>,
    pub ai_think_time_ms: AiThinkTime,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            num_players: 6,
            starting_chips: 1500,
            small_blind: 25,
            big_blind: 50,
            show_opponent_cards: ShowOpponentCards::Sometimes,
            quiz_frequency: QuizFrequency::Medium,
            difficulty: Difficulty::Beginner,
            enable_hints: true,
            seed: None,
            ai_think_time_ms: AiThinkTime::default(),
        }
    }
}

impl GameSettings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(SettingsError::InvalidValue(format!(
                "num_players must be between {MIN_PLAYERS} and {MAX_PLAYERS}"
            )));
        }
        if self.starting_chips == 0 {
            return Err(SettingsError::InvalidValue(
                "starting_chips must be greater than 0".to_string(),
            ));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(SettingsError::InvalidValue(
                "blinds must be greater than 0".to_string(),
            ));
        }
        if self.big_blind < self.small_blind {
            return Err(SettingsError::InvalidValue(
                "big_blind must be at least small_blind".to_string(),
            ));
        }
        if self.ai_think_time_ms.min > self.ai_think_time_ms.max {
            return Err(SettingsError::InvalidValue(
                "ai_think_time_ms.min must not exceed ai_think_time_ms.max".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: GameSettings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Engine parameters; the human always sits in seat 0.
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            num_players: self.num_players,
            starting_chips: self.starting_chips,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            show_opponent_cards: self.show_opponent_cards,
            human_seat: Some(0),
            seed: self.seed,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    #[error("Cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}
