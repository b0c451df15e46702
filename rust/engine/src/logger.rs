use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::Stage;
use crate::hand::{Category, HandEvaluation};
use crate::player::PlayerAction;

/// Records a single player action during a hand.
/// Associates the action with the seat and the stage when it occurred.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index of the acting player
    pub seat: usize,
    /// Stable player identifier (`player_<seat>`)
    pub player_id: String,
    /// The betting stage when this action occurred
    pub stage: Stage,
    /// The action taken by the player
    pub action: PlayerAction,
    /// Chips moved into the pot by this action
    pub amount: u32,
    /// When the action was applied
    pub timestamp: DateTime<Utc>,
}

/// What one winning seat took from the pot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub amount: u32,
    /// `None` when the pot was won uncontested.
    pub category: Option<Category>,
}

/// Outcome of a finished hand.
/// Records which players won, what they were paid and how the hand ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Hand number the result belongs to
    pub hand_number: u64,
    /// Seats that won a share of the pot, in payout order
    pub winners: Vec<usize>,
    pub payouts: Vec<Payout>,
    /// Pot size before distribution
    pub pot: u32,
    /// True when everyone else folded and no hands were shown
    pub uncontested: bool,
    /// Best hand of every contesting seat, strongest first; empty when uncontested
    #[serde(default)]
    pub hands: Vec<(usize, HandEvaluation)>,
    /// Optional notes about the showdown (e.g. "split pot")
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShowdownInfo {
    pub fn payout_for(&self, seat: usize) -> u32 {
        self.payouts
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.amount)
            .sum()
    }
}
