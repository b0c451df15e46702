use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

/// Hand categories, numbered 1 (High Card) through 10 (Royal Flush).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// Best five-card hand found in a set of cards.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub category: Category,
    /// The five cards, ordered the way they are compared (the wheel ends with its Ace).
    pub cards: Vec<Card>,
    /// Unpaired cards that only matter for tie-breaks.
    pub kickers: Vec<Card>,
    // comparison key, high -> low; the wheel Ace counts as 1
    ranks: [u8; 5],
}

impl HandEvaluation {
    pub fn name(&self) -> &'static str {
        self.category.name()
    }

    pub fn ranks(&self) -> [u8; 5] {
        self.ranks
    }
}

/// Evaluates 5 to 7 cards and returns the best five-card hand.
///
/// Every 5-card combination is ranked and the maximum under [`compare_hands`] wins.
///
/// # Errors
///
/// [`GameError::InvalidCardCount`] when fewer than 5 or more than 7 cards are given.
///
/// # Examples
///
/// ```
/// use coach_engine::cards::parse_cards;
/// use coach_engine::hand::{evaluate_hand, Category};
///
/// let cards = parse_cards("As 2h 3d 4c 5s Kd Kc").unwrap();
/// let eval = evaluate_hand(&cards).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<HandEvaluation, GameError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(GameError::InvalidCardCount(n));
    }

    let mut best: Option<HandEvaluation> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let mut five = [cards[0]; 5];
        let mut k = 0;
        for (i, &c) in cards.iter().enumerate() {
            if mask & (1 << i) != 0 {
                five[k] = c;
                k += 1;
            }
        }
        let eval = evaluate_five(five);
        best = match best {
            Some(b) if compare_hands(&b, &eval).is_ge() => Some(b),
            _ => Some(eval),
        };
    }
    best.ok_or(GameError::InvalidCardCount(n))
}

pub fn compare_hands(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.ranks.cmp(&b.ranks),
        ord => ord,
    }
}

fn evaluate_five(mut cards: [Card; 5]) -> HandEvaluation {
    cards.sort_unstable_by(|a, b| b.rank.cmp(&a.rank));

    let mut rank_counts = [0u8; 15];
    for c in &cards {
        rank_counts[c.rank.value() as usize] += 1;
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = detect_straight_high(&cards, &rank_counts);

    if let Some(high) = straight_high {
        if high == 5 {
            // wheel: 5-4-3-2-A
            cards.rotate_left(1);
        }
        let category = match (is_flush, high) {
            (true, 14) => Category::RoyalFlush,
            (true, _) => Category::StraightFlush,
            (false, _) => Category::Straight,
        };
        let mut ranks = rank_key(&cards);
        if high == 5 {
            ranks[4] = 1;
        }
        return HandEvaluation {
            category,
            cards: cards.to_vec(),
            kickers: Vec::new(),
            ranks,
        };
    }

    // Group by multiplicity first, then by rank.
    cards.sort_unstable_by(|a, b| {
        let ca = rank_counts[a.rank.value() as usize];
        let cb = rank_counts[b.rank.value() as usize];
        cb.cmp(&ca).then(b.rank.cmp(&a.rank))
    });

    let mut counts: Vec<u8> = rank_counts.iter().copied().filter(|&c| c > 0).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let category = match (counts[0], counts.get(1).copied().unwrap_or(0)) {
        (4, _) => Category::FourOfAKind,
        (3, 2) => Category::FullHouse,
        _ if is_flush => Category::Flush,
        (3, _) => Category::ThreeOfAKind,
        (2, 2) => Category::TwoPair,
        (2, _) => Category::Pair,
        _ => Category::HighCard,
    };

    let kickers = match category {
        Category::HighCard => cards[1..].to_vec(),
        Category::Flush | Category::FullHouse => Vec::new(),
        _ => cards
            .iter()
            .copied()
            .filter(|c| rank_counts[c.rank.value() as usize] == 1)
            .collect(),
    };

    HandEvaluation {
        category,
        cards: cards.to_vec(),
        kickers,
        ranks: rank_key(&cards),
    }
}

fn rank_key(cards: &[Card; 5]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, c) in k.iter_mut().zip(cards.iter()) {
        *slot = c.rank.value();
    }
    k
}

fn has_multiples(rank_counts: &[u8; 15]) -> bool {
    rank_counts.iter().any(|&c| c > 1)
}

// `sorted` is high -> low. Ace plays low only in A-2-3-4-5.
fn detect_straight_high(sorted: &[Card; 5], rank_counts: &[u8; 15]) -> Option<u8> {
    if has_multiples(rank_counts) {
        return None;
    }
    let high = sorted[0].rank.value();
    let low = sorted[4].rank.value();
    if high - low == 4 {
        return Some(high);
    }
    let wheel = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];
    if sorted.iter().map(|c| c.rank).eq(wheel) {
        return Some(5);
    }
    None
}
