use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// A seat's position relative to the dealer button.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Early,
    Middle,
    Late,
    Button,
    SmallBlind,
    BigBlind,
}

impl Position {
    /// Derives the position of `seat` at a table of `num_players` with the button at `dealer`.
    ///
    /// Tables of three or fewer only have button and blinds; larger tables put the
    /// seat after the big blind in early position, the next two in middle and the
    /// rest in late position.
    pub fn from_seat(seat: usize, num_players: usize, dealer: usize) -> Position {
        let n = num_players.max(1);
        let relative = (seat + n - dealer % n) % n;
        if n <= 3 {
            return match relative {
                0 => Position::Button,
                1 => Position::SmallBlind,
                _ => Position::BigBlind,
            };
        }
        match relative {
            0 => Position::Button,
            1 => Position::SmallBlind,
            2 => Position::BigBlind,
            3 => Position::Early,
            4 | 5 => Position::Middle,
            _ => Position::Late,
        }
    }

    pub fn is_late(self) -> bool {
        matches!(self, Position::Late | Position::Button)
    }
}

/// Represents a player action during a betting round.
/// Actions can involve betting amounts or no-cost moves like check/fold.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if nothing is owed)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting by the given amount above the table's max bet
    Bet(u32),
    /// Raise the table's max bet by the given amount
    Raise(u32),
    /// Bet all remaining chips
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Bet(_) => ActionKind::Bet,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

/// Amount-free action kinds, as offered by the valid-actions query.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    /// Builds the matching action; `amount` is ignored by kinds that carry none.
    pub fn with_amount(self, amount: u32) -> PlayerAction {
        match self {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Bet => PlayerAction::Bet(amount),
            ActionKind::Raise => PlayerAction::Raise(amount),
            ActionKind::AllIn => PlayerAction::AllIn,
        }
    }
}

/// A seated player. Seat and humanity are fixed at creation, chips persist
/// across hands and everything else is reset when a hand starts.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub display_name: String,
    pub chips: u32,
    pub seat: usize,
    pub hole_cards: Vec<Card>,
    pub is_human: bool,
    /// Has chips and is dealt into the current hand.
    pub is_active: bool,
    pub is_folded: bool,
    pub is_all_in: bool,
    pub has_acted_this_round: bool,
    pub current_bet_this_round: u32,
    /// Learning mode: hole cards may be shown to the human observer.
    pub reveal_cards_to_observer: bool,
}

impl Player {
    pub fn new(seat: usize, display_name: impl Into<String>, chips: u32, is_human: bool) -> Self {
        Self {
            id: format!("player_{seat}"),
            display_name: display_name.into(),
            chips,
            seat,
            hole_cards: Vec::with_capacity(2),
            is_human,
            is_active: chips > 0,
            is_folded: false,
            is_all_in: false,
            has_acted_this_round: false,
            current_bet_this_round: 0,
            reveal_cards_to_observer: false,
        }
    }

    /// Still contesting the pot (dealt in and not folded).
    pub fn is_contesting(&self) -> bool {
        self.is_active && !self.is_folded
    }

    /// Can still be asked to act this hand.
    pub fn can_act(&self) -> bool {
        self.is_contesting() && !self.is_all_in
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.is_folded = false;
        self.is_all_in = false;
        self.has_acted_this_round = false;
        self.current_bet_this_round = 0;
        self.reveal_cards_to_observer = false;
        self.is_active = self.chips > 0;
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.has_acted_this_round = false;
        self.current_bet_this_round = 0;
    }

    /// Moves up to `amount` chips into the current round's bet and returns what moved.
    /// An emptied stack marks the player all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.current_bet_this_round += moved;
        if self.chips == 0 {
            self.is_all_in = true;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_never_goes_negative() {
        let mut p = Player::new(1, "Player 2", 15, false);
        assert_eq!(p.commit(25), 15);
        assert_eq!(p.chips, 0);
        assert!(p.is_all_in);
        assert_eq!(p.current_bet_this_round, 15);
    }

    #[test]
    fn positions_rotate_with_dealer() {
        assert_eq!(Position::from_seat(2, 6, 2), Position::Button);
        assert_eq!(Position::from_seat(3, 6, 2), Position::SmallBlind);
        assert_eq!(Position::from_seat(4, 6, 2), Position::BigBlind);
        assert_eq!(Position::from_seat(5, 6, 2), Position::Early);
        assert_eq!(Position::from_seat(0, 6, 2), Position::Middle);
        assert_eq!(Position::from_seat(1, 9, 2), Position::Late);
        assert_eq!(Position::from_seat(0, 3, 1), Position::BigBlind);
    }
}
