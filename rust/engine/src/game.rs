use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::logger::{ActionRecord, ShowdownInfo};
use crate::player::Player;
use crate::pot::SidePot;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// Represents a stage of a Hold'em hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Hand over, pot distributed
    Showdown,
}

impl Stage {
    pub fn next(self) -> Stage {
        match self {
            Stage::Preflop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River | Stage::Showdown => Stage::Showdown,
        }
    }

    /// Community cards dealt when entering this stage.
    pub fn cards_dealt(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            Stage::Preflop | Stage::Showdown => 0,
        }
    }
}

/// How often non-human hole cards are revealed to the observer after the flop.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowOpponentCards {
    Never,
    #[default]
    Sometimes,
    Always,
}

/// Table parameters the engine is built from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub num_players: usize,
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub show_opponent_cards: ShowOpponentCards,
    /// Seat played by the human; `None` for an all-AI table.
    pub human_seat: Option<usize>,
    /// Seed for the deck and reveal RNG; random when absent.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_players: 6,
            starting_chips: 1500,
            small_blind: 25,
            big_blind: 50,
            show_opponent_cards: ShowOpponentCards::Sometimes,
            human_seat: Some(0),
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(GameError::InvalidConfig(format!(
                "num_players must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.num_players
            )));
        }
        if self.starting_chips == 0 {
            return Err(GameError::InvalidConfig(
                "starting_chips must be greater than 0".to_string(),
            ));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(GameError::InvalidConfig(
                "blinds must be greater than 0".to_string(),
            ));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(
                "big_blind must be at least small_blind".to_string(),
            ));
        }
        if let Some(seat) = self.human_seat {
            if seat >= self.num_players {
                return Err(GameError::InvalidConfig(format!(
                    "human_seat {seat} is outside the table"
                )));
            }
        }
        Ok(())
    }
}

/// Full table state. The engine owns the authoritative copy; everyone else
/// works on clones returned by [`crate::engine::Engine::game_state`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub stage: Stage,
    pub pot: u32,
    pub community_cards: Vec<Card>,
    /// Ordered by seat; the table size never changes.
    pub players: Vec<Player>,
    pub dealer: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub current_player_index: usize,
    pub action_log: Vec<ActionRecord>,
    pub min_raise: u32,
    /// Always empty: the engine plays a single main pot.
    pub side_pots: Vec<SidePot>,
    /// 0 until the first hand is dealt.
    pub hand_number: u64,
    /// Bumped on every mutation.
    pub version: u64,
    pub last_result: Option<ShowdownInfo>,
}

impl GameState {
    pub(crate) fn new(players: Vec<Player>, config: &TableConfig) -> Self {
        let n = players.len();
        Self {
            stage: Stage::Preflop,
            pot: 0,
            community_cards: Vec::with_capacity(5),
            players,
            // first hand moves the button to seat 0
            dealer: n - 1,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            current_player_index: 0,
            action_log: Vec::new(),
            min_raise: config.big_blind,
            side_pots: Vec::new(),
            hand_number: 0,
            version: 0,
            last_result: None,
        }
    }

    /// A hand has been dealt and has not reached showdown.
    pub fn hand_in_progress(&self) -> bool {
        self.hand_number > 0 && self.stage != Stage::Showdown
    }

    /// Highest bet any player has made this round.
    pub fn table_max_bet(&self) -> u32 {
        self.players
            .iter()
            .map(|p| p.current_bet_this_round)
            .max()
            .unwrap_or(0)
    }

    /// Chips `seat` must add to match the table's max bet.
    pub fn call_amount(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map(|p| self.table_max_bet().saturating_sub(p.current_bet_this_round))
            .unwrap_or(0)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn human_player(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_human)
    }

    pub fn contesting_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_contesting()).count()
    }

    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(|p| p.chips).sum::<u32>() + self.pot
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
