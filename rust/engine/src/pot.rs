use serde::{Deserialize, Serialize};

/// A pot only some seats are eligible for.
///
/// Declared for the state snapshot; the engine plays a single main pot and
/// never populates side pots.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u32,
    pub eligible_seats: Vec<usize>,
}

/// Splits `pot` evenly between `winners`, which must already be in payout order.
///
/// Each winner gets the floor share; leftover chips go one at a time to the
/// first winners in the given order, so no chip is lost.
///
/// ```
/// use coach_engine::pot::split_pot;
///
/// assert_eq!(split_pot(100, &[4, 1, 2]), vec![(4, 34), (1, 33), (2, 33)]);
/// ```
pub fn split_pot(pot: u32, winners: &[usize]) -> Vec<(usize, u32)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u32;
    let share = pot / n;
    let remainder = (pot % n) as usize;
    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| (seat, share + u32::from(i < remainder)))
        .collect()
}

/// Orders `seats` clockwise starting with the first seat left of `dealer`.
pub fn order_from_dealer(seats: &mut [usize], dealer: usize, num_seats: usize) {
    let n = num_seats.max(1);
    seats.sort_by_key(|&s| (s + n - dealer % n - 1) % n);
}
