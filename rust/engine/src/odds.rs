//! Pot odds, outs and equity estimates for the coaching tools.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{available_cards, Card, Rank};
use crate::errors::GameError;
use crate::hand::{compare_hands, evaluate_hand};

/// Opponents faced in a simulation when fewer are specified.
const SIMULATED_OPPONENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotOdds {
    pub pot_size: u32,
    pub bet_size: u32,
    pub call_amount: u32,
    /// Total pot (including the bet) per chip called, e.g. `3.0` for 3:1
    pub odds: f64,
    pub required_equity_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedOdds {
    pub pot_odds: PotOdds,
    pub implied_winnings: u32,
    pub effective_odds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsCalculation {
    pub outs: usize,
    /// Percent chance to hit by the river (two cards) or on the next card
    pub equity: f64,
    pub one_card_odds: f64,
    pub two_card_odds: f64,
}

/// Pot odds for calling `bet_size` into `pot_size`.
///
/// ```
/// use coach_engine::odds::calculate_pot_odds;
///
/// let odds = calculate_pot_odds(100, 50, None);
/// assert_eq!(odds.odds, 3.0);
/// assert_eq!(odds.required_equity_percent, 25.0);
/// ```
pub fn calculate_pot_odds(pot_size: u32, bet_size: u32, call_amount: Option<u32>) -> PotOdds {
    let call_amount = call_amount.unwrap_or(bet_size);
    let total = f64::from(pot_size) + f64::from(bet_size);
    let call = f64::from(call_amount);
    let (odds, required_equity_percent) = if call_amount == 0 {
        (f64::INFINITY, 0.0)
    } else {
        (total / call, call / (total + call) * 100.0)
    };
    PotOdds {
        pot_size,
        bet_size,
        call_amount,
        odds,
        required_equity_percent,
    }
}

pub fn calculate_implied_odds(pot_odds: PotOdds, implied_winnings: u32) -> ImpliedOdds {
    let total = f64::from(pot_odds.pot_size)
        + f64::from(pot_odds.bet_size)
        + f64::from(implied_winnings);
    let effective_odds = if pot_odds.call_amount == 0 {
        f64::INFINITY
    } else {
        total / f64::from(pot_odds.call_amount)
    };
    ImpliedOdds {
        pot_odds,
        implied_winnings,
        effective_odds,
    }
}

/// Equity percent needed to break even at `odds`-to-one.
pub fn calculate_required_equity(odds: f64) -> f64 {
    if odds.is_infinite() {
        return 0.0;
    }
    100.0 / (odds + 1.0)
}

pub fn is_profitable_call(equity: f64, pot_odds: &PotOdds, implied: Option<&ImpliedOdds>) -> bool {
    let odds = implied.map_or(pot_odds.odds, |i| i.effective_odds);
    equity >= calculate_required_equity(odds)
}

/// Hit probabilities for `outs` with 47 unseen cards after the flop.
pub fn calculate_hand_odds(outs: usize, cards_to_come: usize) -> OddsCalculation {
    let o = (outs.min(46)) as f64;
    let two_card_odds = (1.0 - (47.0 - o) / 47.0 * (46.0 - o) / 46.0) * 100.0;
    let one_card_odds = o / 47.0 * 100.0;
    OddsCalculation {
        outs,
        equity: if cards_to_come == 2 {
            two_card_odds
        } else {
            one_card_odds
        },
        one_card_odds,
        two_card_odds,
    }
}

/// Unseen cards that would strictly improve the current best hand on the
/// next street. Zero before the flop and once the board is complete.
pub fn calculate_outs(hole: &[Card], board: &[Card]) -> Result<usize, GameError> {
    if !(3..5).contains(&board.len()) {
        return Ok(0);
    }
    let mut known = hole.to_vec();
    known.extend_from_slice(board);
    let current = evaluate_hand(&known)?;

    let mut outs = 0;
    for card in available_cards(&known) {
        known.push(card);
        let improved = evaluate_hand(&known)?;
        known.pop();
        if compare_hands(&improved, &current).is_gt() {
            outs += 1;
        }
    }
    Ok(outs)
}

/// Win percentage for `hole` against `opponents`, using a thread-local RNG.
///
/// See [`calculate_equity_with_rng`].
pub fn calculate_equity(
    hole: &[Card],
    board: &[Card],
    opponents: &[[Card; 2]],
    simulations: u32,
) -> Result<f64, GameError> {
    calculate_equity_with_rng(hole, board, opponents, simulations, &mut rand::rng())
}

/// Win percentage for `hole`, ties counting half.
///
/// With a full board the result is exact against the given opponents (100
/// with none). Otherwise each of `simulations` trials completes the board at
/// random and fills in random opponents until three are seated.
///
/// # Errors
///
/// [`GameError::InvalidCardCount`] for a bad hole or board size,
/// [`GameError::DuplicateCard`] when a card appears twice across hole, board
/// and opponents, [`GameError::DeckExhausted`] when too few unseen cards are
/// left to complete the board.
pub fn calculate_equity_with_rng<R: Rng + ?Sized>(
    hole: &[Card],
    board: &[Card],
    opponents: &[[Card; 2]],
    simulations: u32,
    rng: &mut R,
) -> Result<f64, GameError> {
    if hole.len() != 2 {
        return Err(GameError::InvalidCardCount(hole.len()));
    }
    if board.len() > 5 {
        return Err(GameError::InvalidCardCount(board.len()));
    }

    let mut used: Vec<Card> = hole.iter().chain(board).copied().collect();
    used.extend(opponents.iter().flatten());
    for (i, card) in used.iter().enumerate() {
        if used[..i].contains(card) {
            return Err(GameError::DuplicateCard(*card));
        }
    }
    if board.len() == 5 {
        return exact_equity(hole, board, opponents);
    }

    let unseen = available_cards(&used);
    let needed = 5 - board.len();
    if unseen.len() < needed {
        return Err(GameError::DeckExhausted);
    }

    let trials = simulations.max(1);
    let mut score = 0.0;
    for _ in 0..trials {
        let mut deck = unseen.clone();
        deck.shuffle(rng);

        let mut full_board = board.to_vec();
        full_board.extend_from_slice(&deck[..needed]);

        let mut hands: Vec<[Card; 2]> = opponents.to_vec();
        let mut rest = deck[needed..].chunks_exact(2);
        while hands.len() < SIMULATED_OPPONENTS {
            match rest.next() {
                Some(pair) => hands.push([pair[0], pair[1]]),
                None => break,
            }
        }

        let mine = evaluate_hand(&[hole, &full_board[..]].concat())?;
        let mut tied = false;
        let mut lost = false;
        for opp in &hands {
            let theirs = evaluate_hand(&[&opp[..], &full_board[..]].concat())?;
            match compare_hands(&mine, &theirs) {
                std::cmp::Ordering::Less => {
                    lost = true;
                    break;
                }
                std::cmp::Ordering::Equal => tied = true,
                std::cmp::Ordering::Greater => {}
            }
        }
        if !lost {
            score += if tied { 0.5 } else { 1.0 };
        }
    }
    Ok(score / f64::from(trials) * 100.0)
}

fn exact_equity(hole: &[Card], board: &[Card], opponents: &[[Card; 2]]) -> Result<f64, GameError> {
    if opponents.is_empty() {
        return Ok(100.0);
    }
    let mine = evaluate_hand(&[hole, board].concat())?;
    let mut score = 0.0;
    for opp in opponents {
        let theirs = evaluate_hand(&[&opp[..], board].concat())?;
        score += match compare_hands(&mine, &theirs) {
            std::cmp::Ordering::Greater => 1.0,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.0,
        };
    }
    Ok(score / opponents.len() as f64 * 100.0)
}

/// Rough all-in equity of a starting hand, in percent (15..=95).
pub fn preflop_equity(c1: Card, c2: Card) -> f64 {
    let (r1, r2) = (c1.rank.value() as i32, c2.rank.value() as i32);
    let suited = c1.suit == c2.suit;
    let pair = r1 == r2;
    let connected = !pair && (r1 - r2).abs() <= 1;
    let high = r1.max(r2);
    let low = r1.min(r2);
    let pick = |s: i32, o: i32| if suited { s } else { o };

    let equity = if pair {
        if high >= 10 {
            70 + (high - 10) * 3
        } else if high >= 6 {
            55 + (high - 6) * 3
        } else {
            45 + (high - 2) * 2
        }
    } else if high == Rank::Ace.value() as i32 {
        if low >= 10 {
            pick(67, 63)
        } else if low >= 7 {
            pick(58, 52)
        } else {
            pick(52, 45)
        }
    } else if high == Rank::King.value() as i32 {
        if low >= 11 {
            pick(61, 57)
        } else if low >= 9 {
            pick(54, 48)
        } else {
            pick(48, 42)
        }
    } else if high >= 11 {
        if connected {
            pick(57, 52)
        } else if low >= 9 {
            pick(52, 46)
        } else {
            pick(46, 40)
        }
    } else if connected {
        pick(47, 42) + (high - 6) * 2
    } else {
        pick(40, 35) + (high - 6)
    };
    f64::from(equity.clamp(15, 95))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn zero_call_reports_infinite_odds() {
        let odds = calculate_pot_odds(100, 0, None);
        assert!(odds.odds.is_infinite());
        assert_eq!(odds.required_equity_percent, 0.0);
        assert!(is_profitable_call(0.0, &odds, None));
    }

    #[test]
    fn implied_winnings_lower_required_equity() {
        let odds = calculate_pot_odds(100, 50, None);
        let implied = calculate_implied_odds(odds, 150);
        assert_eq!(implied.effective_odds, 6.0);
        assert!(!is_profitable_call(20.0, &odds, None));
        assert!(is_profitable_call(20.0, &odds, Some(&implied)));
    }

    #[test]
    fn flush_draw_has_nine_outs() {
        let hole = parse_cards("Ah Kh").unwrap();
        let board = parse_cards("2h 7h Qc").unwrap();
        let outs = calculate_outs(&hole, &board).unwrap();
        // 9 hearts plus the pairing ranks improve the hand
        assert!(outs >= 9);
        let full = parse_cards("2h 7h Qc 3d 9s").unwrap();
        assert_eq!(calculate_outs(&hole, &full).unwrap(), 0);
    }

    #[test]
    fn nine_outs_two_cards_to_come() {
        let odds = calculate_hand_odds(9, 2);
        assert!((odds.two_card_odds - 34.97).abs() < 0.01);
        assert!((odds.one_card_odds - 19.15).abs() < 0.01);
        assert_eq!(odds.equity, odds.two_card_odds);
    }

    #[test]
    fn preflop_table_orders_hands() {
        let aa = parse_cards("As Ah").unwrap();
        let seven_two = parse_cards("7s 2h").unwrap();
        assert_eq!(preflop_equity(aa[0], aa[1]), 82.0);
        assert!(preflop_equity(seven_two[0], seven_two[1]) < 40.0);
    }
}
