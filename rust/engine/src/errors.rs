use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("Player is already all-in")]
    PlayerAllIn,
    #[error("Player in seat {0} is not active")]
    PlayerInactive(usize),
    #[error("Cannot check while {owed} is owed")]
    CannotCheck { owed: u32 },
    #[error("Nothing to call")]
    NothingToCall,
    #[error("Not enough players with chips to deal a hand")]
    NotEnoughPlayers,
    #[error("Hand evaluation needs 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),
    #[error("Card {0} is used more than once")]
    DuplicateCard(Card),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}
