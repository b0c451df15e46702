use crate::errors::GameError;
use crate::player::{ActionKind, PlayerAction as A};

/// An action that passed validation, carrying the chips it moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips moved; less than owed means the caller is all-in.
    Call(u32),
    /// `chips` moved; `raise_by` becomes the new minimum raise.
    Bet { chips: u32, raise_by: u32 },
    Raise { chips: u32, raise_by: u32 },
    AllIn(u32),
}

impl ValidatedAction {
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(c) | ValidatedAction::AllIn(c) => c,
            ValidatedAction::Bet { chips, .. } | ValidatedAction::Raise { chips, .. } => chips,
        }
    }
}

/// Validates a player action according to betting rules and stack size.
///
/// Bet and raise amounts are the increment over the table's current max bet,
/// so a raise of `amount` costs `to_call + amount` chips.
///
/// # Arguments
///
/// * `stack` - Player's remaining chip stack
/// * `to_call` - Amount needed to match the table's max bet
/// * `min_raise` - Minimum allowed bet/raise increment
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - check while chips are owed
/// - [`GameError::NothingToCall`] - call with nothing owed
/// - [`GameError::InvalidBetAmount`] - bet/raise increment below `min_raise`
/// - [`GameError::InsufficientChips`] - bet/raise costs more than the stack, or all-in with no chips
///
/// # Examples
///
/// ```
/// use coach_engine::rules::{validate_action, ValidatedAction};
/// use coach_engine::player::PlayerAction;
///
/// // Short call moves the whole stack
/// let result = validate_action(30, 50, 50, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::Call(30)));
///
/// // Raise by 100 over a 50 chip call costs 150
/// let result = validate_action(1000, 50, 100, PlayerAction::Raise(100));
/// assert_eq!(result, Ok(ValidatedAction::Raise { chips: 150, raise_by: 100 }));
/// ```
///
/// ```
/// use coach_engine::rules::validate_action;
/// use coach_engine::player::PlayerAction;
/// use coach_engine::errors::GameError;
///
/// let result = validate_action(1000, 50, 100, PlayerAction::Raise(50));
/// assert!(matches!(result, Err(GameError::InvalidBetAmount { .. })));
/// ```
pub fn validate_action(
    stack: u32,
    to_call: u32,
    min_raise: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { owed: to_call })
            }
        }
        A::Call => {
            if to_call == 0 {
                Err(GameError::NothingToCall)
            } else {
                Ok(ValidatedAction::Call(to_call.min(stack)))
            }
        }
        A::Bet(amount) | A::Raise(amount) => {
            if amount < min_raise || amount == 0 {
                return Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: min_raise.max(1),
                });
            }
            let chips = to_call.saturating_add(amount);
            if chips > stack {
                return Err(GameError::InsufficientChips);
            }
            Ok(match action {
                A::Bet(_) => ValidatedAction::Bet {
                    chips,
                    raise_by: amount,
                },
                _ => ValidatedAction::Raise {
                    chips,
                    raise_by: amount,
                },
            })
        }
        A::AllIn => {
            if stack == 0 {
                Err(GameError::InsufficientChips)
            } else {
                Ok(ValidatedAction::AllIn(stack))
            }
        }
    }
}

/// Legal action kinds for a seat, in display order.
///
/// Fold is always offered; check when nothing is owed, call otherwise; bet
/// (nobody has bet this round) or raise when the stack covers the minimum
/// raise; all-in always, even below the minimum raise.
pub fn legal_actions(stack: u32, to_call: u32, table_max: u32, min_raise: u32) -> Vec<ActionKind> {
    let mut v = vec![ActionKind::Fold];
    if to_call == 0 {
        v.push(ActionKind::Check);
    } else {
        v.push(ActionKind::Call);
    }
    if stack >= min_raise {
        if table_max == 0 {
            v.push(ActionKind::Bet);
        } else {
            v.push(ActionKind::Raise);
        }
    }
    v.push(ActionKind::AllIn);
    v
}

/// Safest legal fallback: check, then fold, then whatever is offered first.
pub fn safe_fallback(legal: &[ActionKind]) -> Option<ActionKind> {
    [ActionKind::Check, ActionKind::Fold]
        .into_iter()
        .find(|k| legal.contains(k))
        .or_else(|| legal.first().copied())
}
