//! Personality-driven opponent combining push/fold charts with heuristic scoring.

use coach_engine::csi::calculate_csi;
use coach_engine::game::{GameState, Stage};
use coach_engine::player::{ActionKind, Player, PlayerAction, Position};
use coach_engine::rules::safe_fallback;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::personality::{AIPersonality, Archetype, Intent};
use crate::push_fold::{should_call_push, should_push, HandClass};
use crate::strength::{evaluate_strength, position_value, HandStrength};
use crate::{AIOpponent, Decision, DecisionError};

/// Stacks at or below this many orbits play push/fold.
pub const SHORT_STACK_CSI: f64 = 7.0;

/// Running counters for one AI seat.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AiStats {
    /// Distinct hands this seat was asked to act in
    pub hands_played: u32,
    pub decisions: u32,
    /// Hands where chips went in voluntarily preflop
    pub vpip_hands: u32,
    /// Hands with a preflop bet, raise or shove
    pub pfr_hands: u32,
    #[serde(skip)]
    last_hand: Option<u64>,
    #[serde(skip)]
    vpip_hand: Option<u64>,
    #[serde(skip)]
    pfr_hand: Option<u64>,
}

impl AiStats {
    pub fn vpip(&self) -> f64 {
        percent(self.vpip_hands, self.hands_played)
    }

    pub fn pfr(&self) -> f64 {
        percent(self.pfr_hands, self.hands_played)
    }

    fn record(&mut self, hand: u64, stage: Stage, action: &PlayerAction) {
        if self.last_hand != Some(hand) {
            self.last_hand = Some(hand);
            self.hands_played += 1;
        }
        self.decisions += 1;
        if stage != Stage::Preflop {
            return;
        }
        let kind = action.kind();
        if !matches!(kind, ActionKind::Fold | ActionKind::Check) && self.vpip_hand != Some(hand) {
            self.vpip_hand = Some(hand);
            self.vpip_hands += 1;
        }
        if matches!(kind, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn)
            && self.pfr_hand != Some(hand)
        {
            self.pfr_hand = Some(hand);
            self.pfr_hands += 1;
        }
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole) * 100.0
    }
}

/// Everything one decision looks at, gathered once from the state.
struct Spot<'a> {
    player: &'a Player,
    state: &'a GameState,
    legal: &'a [ActionKind],
    csi: f64,
    position: Position,
    strength: HandStrength,
    to_call: u32,
    max_bet: u32,
    contesting: usize,
}

impl Spot<'_> {
    fn can(&self, kind: ActionKind) -> bool {
        self.legal.contains(&kind)
    }

    fn hand(&self) -> String {
        HandClass::from_hole(&self.player.hole_cards)
            .map(|h| h.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Check when free, otherwise fold.
    fn give_up(&self) -> PlayerAction {
        if self.can(ActionKind::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Fold
        }
    }

    /// A bet or raise of `amount` over the table max, shoving instead when
    /// the stack cannot cover it.
    fn aggressive(&self, amount: u32) -> Option<PlayerAction> {
        let amount = amount.max(self.state.min_raise);
        let cost = self.to_call.saturating_add(amount);
        if cost >= self.player.chips {
            return self.can(ActionKind::AllIn).then_some(PlayerAction::AllIn);
        }
        if self.can(ActionKind::Bet) {
            Some(PlayerAction::Bet(amount))
        } else if self.can(ActionKind::Raise) {
            Some(PlayerAction::Raise(amount))
        } else {
            None
        }
    }
}

/// Opponent whose choices are shaded by an [`AIPersonality`].
#[derive(Debug)]
pub struct PersonalityAI {
    name: String,
    personality: AIPersonality,
    rng: ChaCha20Rng,
    stats: AiStats,
}

impl PersonalityAI {
    /// Draws the jittered personality and the bluff RNG from `seed`.
    pub fn new(archetype: Archetype, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let personality = AIPersonality::from_archetype(archetype, &mut rng);
        Self::with_personality(personality, rng)
    }

    pub fn with_personality(personality: AIPersonality, rng: ChaCha20Rng) -> Self {
        Self {
            name: format!("PersonalityAI ({})", personality.archetype),
            personality,
            rng,
            stats: AiStats::default(),
        }
    }

    fn short_stack(&self, spot: &Spot<'_>) -> Result<Decision, DecisionError> {
        let hole = &spot.player.hole_cards;
        let unopened = spot.max_bet <= spot.state.big_blind;
        let (in_range, intent) = if unopened {
            let opponents = spot.contesting.saturating_sub(1);
            (should_push(hole, spot.csi, spot.position, opponents)?, Intent::Push)
        } else {
            (should_call_push(hole, spot.csi, spot.position, spot.csi)?, Intent::Call)
        };
        let verdict = if in_range { 0.5 } else { -0.5 };
        let score = verdict + self.personality.adjustment(spot.strength.raw, intent);

        let (action, what) = match (score > 0.0, unopened) {
            (true, true) if spot.can(ActionKind::AllIn) => (PlayerAction::AllIn, "push"),
            (true, false) if spot.can(ActionKind::Call) => (PlayerAction::Call, "call"),
            _ => {
                let a = spot.give_up();
                (a, if a == PlayerAction::Check { "check" } else { "fold" })
            }
        };
        Ok(Decision {
            action,
            rationale: format!("Short stack {what} with {} (CSI: {:.1})", spot.hand(), spot.csi),
        })
    }

    fn deep_stack(&mut self, spot: &Spot<'_>) -> Decision {
        let p = &self.personality;
        let s = spot.strength;
        let hand_value = s.hand_value(spot.state.stage);
        let general = p.adjustment(s.raw, Intent::General);

        let position_factor = if spot.position.is_late() { 1.5 } else { 1.0 };
        let table_factor = match spot.contesting {
            0..=3 => 1.5,
            4 => 1.2,
            _ => 0.8,
        };
        let bluffing =
            self.rng.random::<f64>() < p.bluff_frequency * position_factor * table_factor;
        let bluff = if bluffing { p.bluff_frequency * 0.3 } else { 0.0 };

        let score = hand_value + position_value(spot.position) * 0.2 + general * 0.3 + bluff;
        let pot = f64::from(spot.state.pot);

        if spot.to_call > 0 {
            let pot_odds = pot / f64::from(spot.to_call);
            let required = (1.0 / (1.0 + pot_odds) - s.draw * 0.1).max(0.1);
            if score > 0.8 {
                let size = (f64::from(spot.max_bet) * 2.0).max(pot * 0.5)
                    * (0.5 + 1.5 * p.aggression);
                if let Some(action) = spot.aggressive(size.round() as u32) {
                    return Decision {
                        action,
                        rationale: format!(
                            "Strong hand raise with {} ({:.2} strength)",
                            spot.hand(),
                            s.raw
                        ),
                    };
                }
            }
            if score > 0.4 || s.raw > required {
                return Decision {
                    action: PlayerAction::Call,
                    rationale: format!(
                        "Call with decent hand/pot odds ({required:.2} needed, {:.2} have)",
                        s.raw
                    ),
                };
            }
            return Decision {
                action: PlayerAction::Fold,
                rationale: format!("Fold weak hand against bet ({:.2} strength)", s.raw),
            };
        }

        if score > 0.7 {
            let size = (pot * (0.3 + 0.4 * p.aggression)).max(10.0);
            if let Some(action) = spot.aggressive(size.round() as u32) {
                let why = if bluffing {
                    "Bluff bet with position"
                } else {
                    "Value bet with strong hand"
                };
                return Decision {
                    action,
                    rationale: why.to_string(),
                };
            }
        }
        Decision {
            action: spot.give_up(),
            rationale: format!("Check with marginal hand ({:.2} strength)", s.relative),
        }
    }
}

impl AIOpponent for PersonalityAI {
    fn decide(
        &mut self,
        player: &Player,
        state: &GameState,
        legal: &[ActionKind],
    ) -> Result<Decision, DecisionError> {
        if legal.is_empty() {
            return Err(DecisionError::NoLegalActions);
        }
        if player.hole_cards.len() != 2 {
            return Err(DecisionError::NoHoleCards);
        }

        let max_bet = state.table_max_bet();
        let spot = Spot {
            player,
            state,
            legal,
            csi: calculate_csi(player.chips, state.small_blind, state.big_blind, 0),
            position: Position::from_seat(player.seat, state.players.len(), state.dealer),
            strength: evaluate_strength(&player.hole_cards, &state.community_cards)?,
            to_call: max_bet.saturating_sub(player.current_bet_this_round),
            max_bet,
            contesting: state.contesting_count(),
        };

        let mut decision = if spot.csi <= SHORT_STACK_CSI {
            self.short_stack(&spot)?
        } else {
            self.deep_stack(&spot)
        };

        if !legal.contains(&decision.action.kind()) {
            let fallback = safe_fallback(legal).ok_or(DecisionError::NoLegalActions)?;
            decision.action = fallback.with_amount(state.min_raise);
            decision.rationale.push_str(" (adjusted to a legal action)");
        }

        debug!(
            seat = player.seat,
            hand = state.hand_number,
            archetype = %self.personality.archetype,
            action = ?decision.action,
            rationale = %decision.rationale,
            "ai decision"
        );
        self.stats.record(state.hand_number, state.stage, &decision.action);
        Ok(decision)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn personality(&self) -> Option<&AIPersonality> {
        Some(&self.personality)
    }

    fn stats(&self) -> Option<AiStats> {
        Some(self.stats)
    }
}
