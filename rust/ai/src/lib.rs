//! # coach-ai: AI Opponents for the Hold'em Trainer
//!
//! Heuristic opponents with personalities. Short stacks follow push/fold
//! charts keyed by Chip Stack Index and position; deeper stacks score hand
//! strength, draws, position and bluffing, shaded by personality traits.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait defining the interface for AI decision-making
//! - [`personality`] - Archetypes and the six personality traits
//! - [`push_fold`] - Range notation and short-stack charts
//! - [`strength`] - Hand-strength heuristics
//! - [`personality_ai`] - The personality-driven decision model
//! - [`create_ai`] - Factory function for creating AI opponents
//!
//! ## Quick Start
//!
//! ```rust
//! use coach_ai::personality::Archetype;
//! use coach_ai::{create_ai, AIOpponent};
//! use coach_engine::engine::Engine;
//! use coach_engine::game::TableConfig;
//!
//! let mut engine = Engine::new(TableConfig { seed: Some(42), ..TableConfig::default() }).unwrap();
//! engine.start_new_hand().unwrap();
//!
//! let mut ai = create_ai(Archetype::TightAggressive, 7);
//! let state = engine.game_state();
//! let player = state.current_player().unwrap();
//! let decision = ai.decide(player, &state, &engine.valid_actions()).unwrap();
//! assert!(engine.player_action(decision.action));
//! ```

use coach_engine::errors::GameError;
use coach_engine::game::GameState;
use coach_engine::player::{ActionKind, Player, PlayerAction};
use thiserror::Error;

pub mod personality;
pub mod personality_ai;
pub mod push_fold;
pub mod strength;

use personality::{AIPersonality, Archetype};
use personality_ai::{AiStats, PersonalityAI};

/// An action chosen by an AI together with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: PlayerAction,
    pub rationale: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    #[error("player has no hole cards")]
    NoHoleCards,
    #[error("no legal actions offered")]
    NoLegalActions,
    #[error("invalid range notation: {0:?}")]
    InvalidRange(String),
    #[error("unknown archetype: {0:?}")]
    UnknownArchetype(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Trait defining the interface for AI opponents in poker games.
///
/// # Required Methods
///
/// - [`decide`](AIOpponent::decide) - Choose an action for the seat to act
/// - [`name`](AIOpponent::name) - Return the AI's identifier/name
///
/// # Example Implementation
///
/// ```rust
/// use coach_ai::{AIOpponent, Decision, DecisionError};
/// use coach_engine::game::GameState;
/// use coach_engine::player::{ActionKind, Player, PlayerAction};
///
/// struct CallingStation;
///
/// impl AIOpponent for CallingStation {
///     fn decide(
///         &mut self,
///         _player: &Player,
///         _state: &GameState,
///         legal: &[ActionKind],
///     ) -> Result<Decision, DecisionError> {
///         let action = if legal.contains(&ActionKind::Check) {
///             PlayerAction::Check
///         } else {
///             PlayerAction::Call
///         };
///         Ok(Decision { action, rationale: "always calls".into() })
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait AIOpponent: Send {
    /// Choose an action for `player`, the seat to act in `state`.
    ///
    /// `legal` is the engine's legal action set. Implementations should
    /// return one of those kinds; the caller falls back to a safe action
    /// otherwise.
    fn decide(
        &mut self,
        player: &Player,
        state: &GameState,
        legal: &[ActionKind],
    ) -> Result<Decision, DecisionError>;

    fn name(&self) -> &str;

    fn personality(&self) -> Option<&AIPersonality> {
        None
    }

    fn stats(&self) -> Option<AiStats> {
        None
    }
}

/// Factory for a personality opponent of the given archetype.
///
/// `seed` fixes both the trait jitter and later bluff draws.
///
/// # Example
///
/// ```rust
/// use coach_ai::create_ai;
/// use coach_ai::personality::Archetype;
///
/// let ai = create_ai(Archetype::Rock, 1);
/// assert_eq!(ai.name(), "PersonalityAI (Rock)");
/// ```
pub fn create_ai(archetype: Archetype, seed: u64) -> Box<dyn AIOpponent> {
    Box::new(PersonalityAI::new(archetype, seed))
}
