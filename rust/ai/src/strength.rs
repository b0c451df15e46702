//! Hand-strength heuristics the decision model scores with.

use coach_engine::cards::{all_suits, Card};
use coach_engine::errors::GameError;
use coach_engine::game::Stage;
use coach_engine::hand::{evaluate_hand, Category};
use coach_engine::player::Position;

/// Strength estimates, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandStrength {
    /// Made-hand category scaled to `[0.1, 1]`, or the preflop table value
    pub raw: f64,
    /// `raw` discounted for dangerous boards
    pub relative: f64,
    pub draw: f64,
    pub nut: f64,
}

impl HandStrength {
    /// Overall value used in scoring; draws only count before the river.
    pub fn hand_value(&self, stage: Stage) -> f64 {
        let draw = if stage == Stage::River {
            0.0
        } else {
            self.draw * 0.3
        };
        (self.raw + draw + self.nut * 0.1).min(1.0)
    }
}

pub fn evaluate_strength(hole: &[Card], board: &[Card]) -> Result<HandStrength, GameError> {
    if hole.len() + board.len() < 5 {
        return Ok(preflop_strength(hole));
    }
    let cards: Vec<Card> = hole.iter().chain(board).copied().collect();
    let eval = evaluate_hand(&cards)?;
    let raw = f64::from(eval.category.rank()) / 10.0;
    Ok(HandStrength {
        raw,
        relative: adjust_for_board(raw, board),
        draw: draw_potential(&cards, board),
        nut: nut_potential(eval.category),
    })
}

/// Starting-hand table: pairs by height, then ace-x, broadway, connectors.
pub fn preflop_strength(hole: &[Card]) -> HandStrength {
    let [a, b] = hole else {
        return HandStrength::default();
    };
    let (r1, r2) = (a.rank.value(), b.rank.value());
    let (high, low) = (r1.max(r2), r1.min(r2));
    let suited = a.suit == b.suit;
    let pair = r1 == r2;
    let connected = high - low <= 1;
    let pick = |s: f64, o: f64| if suited { s } else { o };

    let raw = if pair {
        match high {
            10.. => 0.9,
            7..=9 => 0.7,
            5..=6 => 0.5,
            _ => 0.3,
        }
    } else if high == 14 {
        match low {
            10.. => pick(0.8, 0.75),
            7..=9 => pick(0.6, 0.5),
            _ => pick(0.4, 0.2),
        }
    } else if high >= 11 {
        match low {
            10.. => pick(0.7, 0.6),
            7..=9 => pick(0.5, 0.3),
            _ => pick(0.3, 0.15),
        }
    } else if connected {
        pick(0.4, 0.25)
    } else {
        0.1
    };

    HandStrength {
        raw,
        relative: raw,
        draw: if suited || connected { 0.3 } else { 0.1 },
        nut: if pair || high >= 12 { 0.5 } else { 0.2 },
    }
}

/// Three of a suit, or three ranks within a five-rank window.
pub fn board_is_dangerous(board: &[Card]) -> bool {
    if board.len() < 3 {
        return false;
    }
    let flush_possible = all_suits()
        .into_iter()
        .any(|s| board.iter().filter(|c| c.suit == s).count() >= 3);
    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.value()).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let straight_possible = ranks.windows(3).any(|w| w[0] - w[2] <= 4);
    flush_possible || straight_possible
}

fn adjust_for_board(raw: f64, board: &[Card]) -> f64 {
    if raw > 0.3 && raw < 0.7 && board_is_dangerous(board) {
        raw * 0.8
    } else {
        raw
    }
}

fn draw_potential(cards: &[Card], board: &[Card]) -> f64 {
    if board.is_empty() {
        return 0.0;
    }
    let mut suits = [0u8; 4];
    let mut present = [false; 15];
    for c in cards {
        suits[c.suit.index()] += 1;
        present[c.rank.value() as usize] = true;
    }

    let mut draw: f64 = match suits.iter().max() {
        Some(4) => 0.4,
        Some(3) => 0.2,
        _ => 0.0,
    };

    let mut run = 0;
    let mut longest = 0;
    for &p in &present[2..] {
        run = if p { run + 1 } else { 0 };
        longest = longest.max(run);
    }
    draw += match longest {
        4.. => 0.3,
        3 => 0.15,
        _ => 0.0,
    };
    draw.min(0.8)
}

fn nut_potential(category: Category) -> f64 {
    match category.rank() {
        8.. => 0.9,
        6..=7 => 0.7,
        4..=5 => 0.5,
        _ => 0.2,
    }
}

pub fn position_value(position: Position) -> f64 {
    match position {
        Position::Early => 0.0,
        Position::Middle => 0.3,
        Position::Late => 0.6,
        Position::Button => 0.8,
        Position::SmallBlind => 0.1,
        Position::BigBlind => 0.2,
    }
}
