//! Table facade: one engine, AI opponents in every non-human seat, and a
//! cancellable timer that plays AI turns after a simulated thinking pause.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use coach_ai::personality::{AIPersonality, Archetype};
use coach_ai::personality_ai::AiStats;
use coach_ai::{create_ai, AIOpponent};
use coach_engine::engine::Engine;
use coach_engine::game::GameState;
use coach_engine::player::{ActionKind, Player, PlayerAction};
use coach_engine::rules::safe_fallback;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::TableError;
use crate::settings::{AiThinkTime, GameSettings};

/// Identifies the exact turn a timer was armed for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Ticket {
    hand: u64,
    version: u64,
    seat: usize,
}

struct PendingTurn {
    ticket: Ticket,
    handle: JoinHandle<()>,
}

struct GameCore {
    game_id: String,
    engine: Engine,
    /// Indexed by seat; `None` for the human.
    ais: Vec<Option<Box<dyn AIOpponent>>>,
    think_time: AiThinkTime,
    rng: ChaCha20Rng,
    ai_enabled: bool,
    pending: Option<PendingTurn>,
}

impl GameCore {
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            debug!(
                game_id = %self.game_id,
                seat = pending.ticket.seat,
                "cancelled pending ai turn"
            );
        }
    }

    /// Seat of the AI to act, if any.
    fn ai_to_act(&self) -> Option<usize> {
        let state = self.engine.state();
        if !state.hand_in_progress() {
            return None;
        }
        let seat = state.current_player_index;
        let player = state.players.get(seat)?;
        (player.can_act() && self.ais.get(seat).is_some_and(Option::is_some)).then_some(seat)
    }

    fn ticket(&self, seat: usize) -> Ticket {
        Ticket {
            hand: self.engine.hand_number(),
            version: self.engine.version(),
            seat,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.ai_to_act() == Some(ticket.seat) && self.ticket(ticket.seat) == ticket
    }

    /// Plays one turn for the AI to act. Rejected or failed decisions fall
    /// back to check, then fold, then the first legal action.
    fn apply_ai_turn(&mut self) -> bool {
        let Some(seat) = self.ai_to_act() else {
            return false;
        };
        let state = self.engine.game_state();
        let legal = self.engine.valid_actions();
        let Some(ai) = self.ais.get_mut(seat).and_then(Option::as_mut) else {
            return false;
        };

        let chosen = match ai.decide(&state.players[seat], &state, &legal) {
            Ok(decision) => Some(decision.action),
            Err(err) => {
                warn!(game_id = %self.game_id, seat, error = %err, "ai decision failed");
                None
            }
        };
        if let Some(action) = chosen {
            if self.engine.player_action(action) {
                self.after_action();
                return true;
            }
            warn!(game_id = %self.game_id, seat, ?action, "engine rejected ai action");
        }

        let Some(kind) = safe_fallback(&legal) else {
            return false;
        };
        let fallback = kind.with_amount(state.min_raise);
        warn!(game_id = %self.game_id, seat, action = ?fallback, "ai falling back");
        let applied = self.engine.player_action(fallback);
        if applied {
            self.after_action();
        }
        applied
    }

    fn after_action(&self) {
        if self.engine.is_hand_complete() {
            let state = self.engine.state();
            info!(
                game_id = %self.game_id,
                hand = state.hand_number,
                winners = ?state.last_result.as_ref().map(|r| r.winners.clone()),
                "hand complete"
            );
        }
    }

    fn think_delay(&mut self) -> Duration {
        let AiThinkTime { min, max } = self.think_time;
        Duration::from_millis(self.rng.random_range(min..=max))
    }
}

/// Arms a timer for the AI to act, replacing any pending one.
fn schedule_ai_turn(shared: &Arc<Mutex<GameCore>>, core: &mut GameCore) {
    core.cancel_pending();
    if !core.ai_enabled {
        return;
    }
    let Some(seat) = core.ai_to_act() else {
        return;
    };
    let Ok(runtime) = Handle::try_current() else {
        warn!(
            game_id = %core.game_id,
            seat,
            "no tokio runtime; ai turns must be driven with play_ai_turn"
        );
        return;
    };

    let ticket = core.ticket(seat);
    let delay = core.think_delay();
    let weak = Arc::downgrade(shared);
    let handle = runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        fire(&weak, ticket);
    });
    debug!(
        game_id = %core.game_id,
        hand = ticket.hand,
        seat,
        delay_ms = delay.as_millis() as u64,
        "scheduled ai turn"
    );
    core.pending = Some(PendingTurn { ticket, handle });
}

/// Timer callback: plays the turn only if the table still matches `ticket`.
fn fire(weak: &Weak<Mutex<GameCore>>, ticket: Ticket) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut core) = shared.lock() else {
        return;
    };
    if core.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
        core.pending = None;
    }
    if !core.ai_enabled || !core.is_current(ticket) {
        debug!(game_id = %core.game_id, seat = ticket.seat, "stale ai timer ignored");
        return;
    }
    if core.apply_ai_turn() {
        schedule_ai_turn(&shared, &mut core);
    }
}

/// A single-table game: the human in seat 0 and AI opponents elsewhere.
///
/// ```rust
/// use coach_table::game::PokerGame;
/// use coach_table::settings::GameSettings;
///
/// let game = PokerGame::new(GameSettings { seed: Some(9), ..GameSettings::default() }).unwrap();
/// game.start_new_hand().unwrap();
/// while game.play_ai_turn() {}
/// assert!(game.is_hand_complete() || game.current_player().unwrap().unwrap().is_human);
/// ```
pub struct PokerGame {
    game_id: String,
    core: Arc<Mutex<GameCore>>,
}

impl PokerGame {
    pub fn new(settings: GameSettings) -> Result<Self, TableError> {
        settings.validate()?;
        let mut engine = Engine::new(settings.table_config())?;
        let mut rng = match settings.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed.wrapping_add(2)),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        };

        let game_id = Uuid::new_v4().to_string();
        let mut ais: Vec<Option<Box<dyn AIOpponent>>> = Vec::with_capacity(settings.num_players);
        for seat in 0..settings.num_players {
            if engine.state().players[seat].is_human {
                ais.push(None);
                continue;
            }
            let archetype = Archetype::random(&mut rng);
            engine.rename_player(seat, format!("Player {} ({archetype})", seat + 1));
            ais.push(Some(create_ai(archetype, rng.random())));
        }
        info!(
            game_id = %game_id,
            players = settings.num_players,
            starting_chips = settings.starting_chips,
            "created game"
        );

        let core = GameCore {
            game_id: game_id.clone(),
            engine,
            ais,
            think_time: settings.ai_think_time_ms,
            rng,
            ai_enabled: false,
            pending: None,
        };
        Ok(Self {
            game_id,
            core: Arc::new(Mutex::new(core)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, GameCore>, TableError> {
        self.core.lock().map_err(|_| TableError::StatePoisoned)
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Snapshot of the table.
    pub fn game_state(&self) -> Result<GameState, TableError> {
        Ok(self.lock()?.engine.game_state())
    }

    pub fn current_player(&self) -> Result<Option<Player>, TableError> {
        Ok(self.lock()?.engine.current_player().cloned())
    }

    pub fn human_player(&self) -> Result<Option<Player>, TableError> {
        Ok(self.lock()?.engine.human_player().cloned())
    }

    pub fn valid_actions(&self) -> Result<Vec<ActionKind>, TableError> {
        Ok(self.lock()?.engine.valid_actions())
    }

    pub fn is_hand_complete(&self) -> bool {
        self.lock()
            .map(|core| core.engine.is_hand_complete())
            .unwrap_or(false)
    }

    /// Applies the human's action. Returns `false` when it is not the human's
    /// turn or the engine rejects the action.
    pub fn player_action(&self, action: PlayerAction) -> bool {
        let Ok(mut core) = self.lock() else {
            return false;
        };
        let human_turn = core
            .engine
            .current_player()
            .is_some_and(|p| p.is_human && p.can_act());
        if !human_turn || !core.engine.player_action(action) {
            return false;
        }
        core.after_action();
        schedule_ai_turn(&self.core, &mut core);
        true
    }

    /// Deals the next hand, cancelling any timer left from the previous one.
    pub fn start_new_hand(&self) -> Result<(), TableError> {
        let mut core = self.lock()?;
        core.cancel_pending();
        core.engine.start_new_hand()?;
        let state = core.engine.state();
        info!(
            game_id = %core.game_id,
            hand = state.hand_number,
            dealer = state.dealer,
            "new hand"
        );
        schedule_ai_turn(&self.core, &mut core);
        Ok(())
    }

    /// Lets AI seats play on timers. Needs a running tokio runtime.
    pub fn start_ai_actions(&self) {
        let Ok(mut core) = self.lock() else {
            return;
        };
        core.ai_enabled = true;
        if core.pending.is_none() {
            schedule_ai_turn(&self.core, &mut core);
        }
    }

    pub fn stop_ai_actions(&self) {
        let Ok(mut core) = self.lock() else {
            return;
        };
        core.ai_enabled = false;
        core.cancel_pending();
    }

    /// Whether a timer is armed for an AI turn.
    pub fn ai_turn_pending(&self) -> bool {
        self.lock()
            .map(|core| core.pending.is_some())
            .unwrap_or(false)
    }

    /// Plays the current AI turn immediately. Returns `false` when the seat
    /// to act is not an AI or nothing could be applied.
    pub fn play_ai_turn(&self) -> bool {
        let Ok(mut core) = self.lock() else {
            return false;
        };
        core.cancel_pending();
        let applied = core.apply_ai_turn();
        schedule_ai_turn(&self.core, &mut core);
        applied
    }

    pub fn ai_stats(&self, seat: usize) -> Option<AiStats> {
        let core = self.lock().ok()?;
        core.ais.get(seat)?.as_ref()?.stats()
    }

    /// Traits the seat's opponent plays with; `None` for the human.
    pub fn ai_personality(&self, seat: usize) -> Option<AIPersonality> {
        let core = self.lock().ok()?;
        core.ais.get(seat)?.as_ref()?.personality().cloned()
    }

    pub fn ai_name(&self, seat: usize) -> Option<String> {
        let core = self.lock().ok()?;
        let ai = core.ais.get(seat)?.as_ref()?;
        Some(ai.name().to_string())
    }
}

impl Drop for PokerGame {
    fn drop(&mut self) {
        let mut core = self.core.lock().unwrap_or_else(PoisonError::into_inner);
        core.ai_enabled = false;
        core.cancel_pending();
    }
}
