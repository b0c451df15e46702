//! Short-stack push/fold charts and the hand-range notation they are written in.
//!
//! Range items use the usual shorthand:
//!
//! - `77` one pair, `22+` that pair or any higher pair
//! - `KQ` one unpaired hand, suited or not; `KQs` / `KQo` restrict the suits
//! - `A9+` the high card fixed, the low card at least the given rank
//!   (`A9`, `AT`, ..., `AK`); suffixes work here too (`ATs+`)

use std::fmt;
use std::str::FromStr;

use coach_engine::cards::{Card, Rank};
use coach_engine::player::Position;

use crate::DecisionError;

/// Hole cards reduced to their range class: ranks high first and suitedness.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HandClass {
    pub high: Rank,
    pub low: Rank,
    pub suited: bool,
}

impl HandClass {
    pub fn from_hole(hole: &[Card]) -> Option<HandClass> {
        let [a, b] = hole else {
            return None;
        };
        let (high, low) = if a.rank >= b.rank {
            (a.rank, b.rank)
        } else {
            (b.rank, a.rank)
        };
        Some(HandClass {
            high,
            low,
            suited: a.suit == b.suit,
        })
    }

    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high.symbol(), self.low.symbol())?;
        if !self.is_pair() {
            f.write_str(if self.suited { "s" } else { "o" })?;
        }
        Ok(())
    }
}

/// One entry of a range chart.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RangeItem {
    Pair {
        rank: Rank,
        plus: bool,
    },
    Unpaired {
        high: Rank,
        low: Rank,
        plus: bool,
        /// `None` matches both suited and offsuit
        suited: Option<bool>,
    },
}

impl RangeItem {
    pub fn matches(&self, hand: &HandClass) -> bool {
        match *self {
            RangeItem::Pair { rank, plus } => {
                hand.is_pair() && (hand.high == rank || (plus && hand.high > rank))
            }
            RangeItem::Unpaired {
                high,
                low,
                plus,
                suited,
            } => {
                !hand.is_pair()
                    && hand.high == high
                    && (hand.low == low || (plus && hand.low > low))
                    && suited.is_none_or(|s| s == hand.suited)
            }
        }
    }
}

impl FromStr for RangeItem {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DecisionError::InvalidRange(s.to_string());
        let (body, plus) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        let mut chars = body.chars();
        let first = chars.next().and_then(Rank::from_symbol).ok_or_else(bad)?;
        let second = chars.next().and_then(Rank::from_symbol).ok_or_else(bad)?;
        let suited = match chars.next() {
            None => None,
            Some('s') => Some(true),
            Some('o') => Some(false),
            Some(_) => return Err(bad()),
        };
        if chars.next().is_some() {
            return Err(bad());
        }
        if first == second {
            if suited.is_some() {
                return Err(bad());
            }
            return Ok(RangeItem::Pair { rank: first, plus });
        }
        if first < second {
            return Err(bad());
        }
        Ok(RangeItem::Unpaired {
            high: first,
            low: second,
            plus,
            suited,
        })
    }
}

/// A parsed range chart.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HandRange {
    items: Vec<RangeItem>,
}

impl HandRange {
    pub fn parse(items: &[&str]) -> Result<HandRange, DecisionError> {
        let items = items
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HandRange { items })
    }

    pub fn contains(&self, hand: &HandClass) -> bool {
        self.items.iter().any(|item| item.matches(hand))
    }

    pub fn contains_hole(&self, hole: &[Card]) -> bool {
        HandClass::from_hole(hole).is_some_and(|h| self.contains(&h))
    }
}

/// Shoving chart for an unopened pot.
pub fn push_range(csi: f64, position: Position, opponents: usize) -> &'static [&'static str] {
    let late = matches!(position, Position::Late | Position::Button);
    if csi <= 2.0 {
        if position == Position::Button && opponents == 1 {
            &[
                "22+", "A2+", "K2+", "Q2+", "J2+", "T2+", "92+", "82+", "72+", "62+", "52+", "42+",
                "32+",
            ]
        } else if position == Position::SmallBlind {
            &[
                "22+", "A2+", "K2+", "Q2+", "J4+", "T6+", "96+", "86+", "76", "65",
            ]
        } else {
            &["22+", "A5+", "K8+", "Q9+", "JT+"]
        }
    } else if csi <= 5.0 {
        if late {
            &[
                "22+", "A2+", "K4+", "Q8+", "J9+", "T9+", "98+", "87+", "76+", "65+", "54+",
            ]
        } else if position == Position::Middle {
            &["33+", "A7+", "K9+", "QT+", "JT+"]
        } else {
            &["66+", "AT+", "KQ"]
        }
    } else if csi <= 10.0 {
        if late {
            &["22+", "A5+", "K7+", "Q9+", "JT+", "T9+", "98+", "87+"]
        } else if position == Position::Middle {
            &["55+", "A9+", "KT+", "QJ+"]
        } else {
            &["77+", "AJ+", "KQ"]
        }
    } else if late {
        &[
            "22+", "A2+", "K5+", "Q8+", "J9+", "T9+", "98+", "87+", "76+", "65+",
        ]
    } else if position == Position::Middle {
        &["44+", "A9+", "KT+", "QJ+", "JT+"]
    } else {
        &["88+", "AQ+", "KQ"]
    }
}

/// Calling chart against a shove; tighter than the shoving charts.
pub fn calling_range(csi: f64, position: Position, pusher_csi: f64) -> &'static [&'static str] {
    let effective = csi.max(pusher_csi) * 0.8;
    let big_blind = position == Position::BigBlind;
    if effective <= 3.0 {
        if big_blind {
            &["66+", "AT+", "KJ+"]
        } else {
            &["77+", "AJ+", "KQ"]
        }
    } else if effective <= 7.0 {
        if big_blind {
            &["44+", "A9+", "KT+", "QJ+"]
        } else {
            &["55+", "AT+", "KJ+"]
        }
    } else if big_blind {
        &["33+", "A8+", "K9+", "QT+", "JT+"]
    } else {
        &["44+", "A9+", "KT+", "QJ+"]
    }
}

pub fn should_push(
    hole: &[Card],
    csi: f64,
    position: Position,
    opponents: usize,
) -> Result<bool, DecisionError> {
    Ok(HandRange::parse(push_range(csi, position, opponents))?.contains_hole(hole))
}

pub fn should_call_push(
    hole: &[Card],
    csi: f64,
    position: Position,
    pusher_csi: f64,
) -> Result<bool, DecisionError> {
    Ok(HandRange::parse(calling_range(csi, position, pusher_csi))?.contains_hole(hole))
}

/// The action the player is facing when asking for advice.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Facing {
    Nothing,
    Call,
    Raise,
    AllIn,
}

/// Coaching advice for a stack depth and situation.
pub fn recommended_action(
    hole: &[Card],
    csi: f64,
    position: Position,
    facing: Facing,
) -> Result<&'static str, DecisionError> {
    if csi <= 2.0 {
        return Ok(match facing {
            Facing::Nothing => {
                "Push any two cards from late position, fold marginal hands from early position"
            }
            _ => "Call very tight - only premium hands",
        });
    }
    if csi <= 7.0 {
        match facing {
            Facing::Nothing => {
                let push = should_push(hole, csi, position, 1)?;
                return Ok(if push { "Push (all-in)" } else { "Fold" });
            }
            Facing::AllIn => {
                let call = should_call_push(hole, csi, position, csi)?;
                return Ok(if call { "Call" } else { "Fold" });
            }
            Facing::Call | Facing::Raise => {}
        }
    }
    if csi <= 12.0 {
        return Ok("Mixed strategy - can play some post-flop poker with strong hands");
    }
    Ok("Standard tournament play - use position and post-flop skills")
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_engine::cards::parse_cards;

    fn class(s: &str) -> HandClass {
        HandClass::from_hole(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn notation_of_hole_cards() {
        assert_eq!(class("Kd As").to_string(), "AKo");
        assert_eq!(class("7h 7c").to_string(), "77");
        assert_eq!(class("Tc 9c").to_string(), "T9s");
    }

    #[test]
    fn pair_plus_covers_higher_pairs_only() {
        let item: RangeItem = "77+".parse().unwrap();
        assert!(item.matches(&class("7h 7c")));
        assert!(item.matches(&class("Ah Ac")));
        assert!(!item.matches(&class("6h 6c")));
        assert!(!item.matches(&class("Ah 7c")));
    }

    #[test]
    fn unpaired_plus_keeps_high_card() {
        let item: RangeItem = "A9+".parse().unwrap();
        assert!(item.matches(&class("Ah 9c")));
        assert!(item.matches(&class("Ah Ks")));
        assert!(!item.matches(&class("Ah 8c")));
        assert!(!item.matches(&class("Kh Qs")));
        assert!(!item.matches(&class("Ah Ac")));
    }

    #[test]
    fn suit_suffixes_restrict() {
        let suited: RangeItem = "ATs+".parse().unwrap();
        assert!(suited.matches(&class("Ah Jh")));
        assert!(!suited.matches(&class("Ah Jd")));
        let offsuit: RangeItem = "K9o".parse().unwrap();
        assert!(offsuit.matches(&class("Kd 9c")));
        assert!(!offsuit.matches(&class("Kd 9d")));
        assert!(!offsuit.matches(&class("Kd Tc")));
    }

    #[test]
    fn bad_notation_is_rejected() {
        for s in ["", "A", "AXs", "9A", "77s", "AKx", "AKs++"] {
            assert!(s.parse::<RangeItem>().is_err(), "{s:?} parsed");
        }
    }

    #[test]
    fn every_chart_parses() {
        let positions = [
            Position::Early,
            Position::Middle,
            Position::Late,
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
        ];
        for csi in [1.0, 4.0, 8.0, 15.0] {
            for pos in positions {
                for opponents in [1, 3] {
                    HandRange::parse(push_range(csi, pos, opponents)).unwrap();
                }
                HandRange::parse(calling_range(csi, pos, csi)).unwrap();
            }
        }
    }

    #[test]
    fn short_button_shoves_any_two_heads_up() {
        let hole = parse_cards("7c 2d").unwrap();
        assert!(should_push(&hole, 1.5, Position::Button, 1).unwrap());
        assert!(!should_push(&hole, 1.5, Position::Early, 5).unwrap());
    }

    #[test]
    fn early_position_needs_premium_at_five_csi() {
        let aces = parse_cards("As Ad").unwrap();
        let ace_nine = parse_cards("As 9d").unwrap();
        assert!(should_push(&aces, 5.0, Position::Early, 5).unwrap());
        assert!(!should_push(&ace_nine, 5.0, Position::Early, 5).unwrap());
        assert!(should_push(&ace_nine, 5.0, Position::Late, 2).unwrap());
    }

    #[test]
    fn big_blind_calls_wider_than_small_blind() {
        let hole = parse_cards("Ah Tc").unwrap();
        assert!(should_call_push(&hole, 3.0, Position::BigBlind, 3.0).unwrap());
        assert!(!should_call_push(&hole, 3.0, Position::SmallBlind, 3.0).unwrap());
    }

    #[test]
    fn advice_by_depth() {
        let hole = parse_cards("Ks Qs").unwrap();
        assert_eq!(
            recommended_action(&hole, 6.0, Position::Button, Facing::Nothing).unwrap(),
            "Push (all-in)"
        );
        assert!(recommended_action(&hole, 20.0, Position::Button, Facing::Nothing)
            .unwrap()
            .starts_with("Standard"));
    }
}
