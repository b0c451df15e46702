use chrono::Utc;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, error, info};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{GameState, ShowOpponentCards, Stage, TableConfig};
use crate::hand::{compare_hands, evaluate_hand, HandEvaluation};
use crate::logger::{ActionRecord, Payout, ShowdownInfo};
use crate::player::{ActionKind, Player, PlayerAction, Position};
use crate::pot::{order_from_dealer, split_pot};
use crate::rules::{legal_actions, validate_action, ValidatedAction};

/// Hold'em hand state machine for a single table.
///
/// Owns the authoritative [`GameState`] and the deck. A hand runs from
/// [`start_new_hand`](Engine::start_new_hand) through betting rounds driven by
/// [`player_action`](Engine::player_action) until the stage reaches
/// [`Stage::Showdown`], at which point the pot has been paid out.
///
/// # Examples
///
/// ```
/// use coach_engine::engine::Engine;
/// use coach_engine::game::{Stage, TableConfig};
///
/// let config = TableConfig { seed: Some(7), ..TableConfig::default() };
/// let mut engine = Engine::new(config).expect("valid config");
/// engine.start_new_hand().expect("enough players");
///
/// let state = engine.game_state();
/// assert_eq!(state.stage, Stage::Preflop);
/// assert_eq!(state.pot, 75);
/// assert!(state.players.iter().all(|p| p.hole_cards.len() == 2));
/// ```
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    deck: Deck,
    /// Drives the learning-mode card reveals
    rng: ChaCha20Rng,
    show_opponent_cards: ShowOpponentCards,
}

impl Engine {
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let players = (0..config.num_players)
            .map(|seat| {
                let human = config.human_seat == Some(seat);
                let name = if human {
                    "You".to_string()
                } else {
                    format!("Player {}", seat + 1)
                };
                Player::new(seat, name, config.starting_chips, human)
            })
            .collect();
        Ok(Self {
            state: GameState::new(players, &config),
            deck: Deck::new_with_seed(seed),
            rng: ChaCha20Rng::seed_from_u64(seed.wrapping_add(1)),
            show_opponent_cards: config.show_opponent_cards,
        })
    }

    /// Read-only view of the authoritative state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Detached copy of the state for collaborators.
    pub fn game_state(&self) -> GameState {
        self.state.clone()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    pub fn human_player(&self) -> Option<&Player> {
        self.state.human_player()
    }

    pub fn hand_number(&self) -> u64 {
        self.state.hand_number
    }

    pub fn version(&self) -> u64 {
        self.state.version
    }

    pub fn is_hand_complete(&self) -> bool {
        self.state.stage == Stage::Showdown
    }

    pub fn call_amount(&self, seat: usize) -> u32 {
        self.state.call_amount(seat)
    }

    pub fn table_max_bet(&self) -> u32 {
        self.state.table_max_bet()
    }

    pub fn position_of(&self, seat: usize) -> Position {
        Position::from_seat(seat, self.state.players.len(), self.state.dealer)
    }

    pub fn rename_player(&mut self, seat: usize, name: impl Into<String>) {
        if let Some(p) = self.state.players.get_mut(seat) {
            p.display_name = name.into();
            self.state.version += 1;
        }
    }

    /// Deals a new hand: moves the button, posts blinds and deals hole cards.
    ///
    /// # Errors
    ///
    /// [`GameError::NotEnoughPlayers`] (state untouched) when fewer than two
    /// seats have chips; [`GameError::DeckExhausted`] is an invariant violation.
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if self.state.players.iter().filter(|p| p.chips > 0).count() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        self.deck.reset();
        let n = self.state.players.len();
        let st = &mut self.state;
        st.stage = Stage::Preflop;
        st.pot = 0;
        st.community_cards.clear();
        st.action_log.clear();
        st.side_pots.clear();
        st.min_raise = st.big_blind;
        st.hand_number += 1;
        st.version += 1;
        for p in &mut st.players {
            p.reset_for_hand();
        }
        st.dealer = (st.dealer + 1) % n;

        let sb_seat = self.next_active_seat(self.state.dealer);
        let bb_seat = self.next_active_seat(sb_seat);
        let (sb, bb) = (self.state.small_blind, self.state.big_blind);
        self.post_blind(sb_seat, sb);
        self.post_blind(bb_seat, bb);

        // one card at a time, starting left of the button
        let mut order: Vec<usize> = (0..n).filter(|&s| self.state.players[s].is_active).collect();
        order_from_dealer(&mut order, self.state.dealer, n);
        for _ in 0..2 {
            for &seat in &order {
                let card = self.draw()?;
                self.state.players[seat].hole_cards.push(card);
            }
        }

        self.state.current_player_index = self.next_player_index(bb_seat);
        info!(
            hand = self.state.hand_number,
            dealer = self.state.dealer,
            sb_seat,
            bb_seat,
            pot = self.state.pot,
            "hand started"
        );

        if self.needs_no_action() {
            self.advance_stage()?;
        }
        Ok(())
    }

    /// Applies `action` for the current seat. Returns `false`, leaving the
    /// state untouched, when the action is not legal.
    ///
    /// # Panics
    ///
    /// When dealing or evaluating fails mid-hand ([`GameError::DeckExhausted`],
    /// [`GameError::InvalidCardCount`]). Chips have already moved by then, so
    /// the hand cannot be reported as rejected.
    pub fn player_action(&mut self, action: PlayerAction) -> bool {
        match self.try_action(action) {
            Ok(()) => true,
            Err(err @ (GameError::DeckExhausted | GameError::InvalidCardCount(_))) => {
                error!(hand = self.state.hand_number, %err, "engine invariant violated");
                panic!("engine invariant violated in hand {}: {err}", self.state.hand_number);
            }
            Err(err) => {
                debug!(
                    hand = self.state.hand_number,
                    seat = self.state.current_player_index,
                    ?action,
                    %err,
                    "action rejected"
                );
                false
            }
        }
    }

    /// Same as [`player_action`](Engine::player_action) but reports why an action was refused.
    ///
    /// [`GameError::DeckExhausted`] and [`GameError::InvalidCardCount`] are the
    /// exception: they surface after the action was applied.
    pub fn try_action(&mut self, action: PlayerAction) -> Result<(), GameError> {
        if self.state.hand_number == 0 {
            return Err(GameError::NoHandInProgress);
        }
        if self.state.stage == Stage::Showdown {
            return Err(GameError::HandAlreadyComplete);
        }
        let seat = self.state.current_player_index;
        let to_call = self.state.call_amount(seat);
        let min_raise = self.state.min_raise;
        let player = self
            .state
            .players
            .get(seat)
            .ok_or(GameError::PlayerInactive(seat))?;
        if !player.is_active {
            return Err(GameError::PlayerInactive(seat));
        }
        if player.is_folded {
            return Err(GameError::PlayerAlreadyFolded);
        }
        if player.is_all_in {
            return Err(GameError::PlayerAllIn);
        }

        let validated = validate_action(player.chips, to_call, min_raise, action)?;
        let stage = self.state.stage;
        if let ValidatedAction::Bet { raise_by, .. } | ValidatedAction::Raise { raise_by, .. } =
            validated
        {
            self.state.min_raise = raise_by;
        }
        let player = &mut self.state.players[seat];
        let moved = match validated {
            ValidatedAction::Fold => {
                player.is_folded = true;
                0
            }
            ValidatedAction::Check => 0,
            other => player.commit(other.chips()),
        };
        player.has_acted_this_round = true;
        let player_id = player.id.clone();
        self.state.pot += moved;
        self.state.action_log.push(ActionRecord {
            seat,
            player_id,
            stage,
            action,
            amount: moved,
            timestamp: Utc::now(),
        });
        self.state.version += 1;
        debug!(
            hand = self.state.hand_number,
            seat,
            ?action,
            amount = moved,
            pot = self.state.pot,
            "action applied"
        );

        if self.state.contesting_count() <= 1 {
            self.finish_uncontested();
        } else if self.is_betting_round_complete() {
            self.advance_stage()?;
        } else {
            self.state.current_player_index = self.next_player_index(seat);
        }
        Ok(())
    }

    /// Legal action kinds for the current seat; empty when nobody can act.
    pub fn valid_actions(&self) -> Vec<ActionKind> {
        if !self.state.hand_in_progress() {
            return Vec::new();
        }
        let seat = self.state.current_player_index;
        match self.state.players.get(seat) {
            Some(p) if p.can_act() => legal_actions(
                p.chips,
                self.state.call_amount(seat),
                self.state.table_max_bet(),
                self.state.min_raise,
            ),
            _ => Vec::new(),
        }
    }

    /// First seat after `start` (wrapping) that is active, not folded and not
    /// all-in. Returns `start` when no other seat qualifies.
    pub fn next_player_index(&self, start: usize) -> usize {
        let n = self.state.players.len();
        let mut i = (start + 1) % n;
        while i != start {
            if self.state.players[i].can_act() {
                return i;
            }
            i = (i + 1) % n;
        }
        start
    }

    /// The round is over when at most one player is still contesting, or every
    /// contesting player who is not all-in has acted and matched the max bet.
    pub fn is_betting_round_complete(&self) -> bool {
        if self.state.contesting_count() <= 1 {
            return true;
        }
        let max_bet = self.state.table_max_bet();
        self.state
            .players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.has_acted_this_round && p.current_bet_this_round == max_bet)
    }

    // Nobody left who could respond to a bet: at most one seat can act and it owes nothing.
    fn needs_no_action(&self) -> bool {
        if self.is_betting_round_complete() {
            return true;
        }
        let max_bet = self.state.table_max_bet();
        let mut actors = self.state.players.iter().filter(|p| p.can_act());
        match (actors.next(), actors.next()) {
            (None, _) => true,
            (Some(p), None) => p.current_bet_this_round >= max_bet,
            _ => false,
        }
    }

    fn next_active_seat(&self, from: usize) -> usize {
        let n = self.state.players.len();
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|&s| self.state.players[s].is_active)
            .unwrap_or(from)
    }

    fn post_blind(&mut self, seat: usize, amount: u32) {
        let posted = self.state.players[seat].commit(amount);
        self.state.pot += posted;
        debug!(hand = self.state.hand_number, seat, posted, "blind posted");
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck.deal().ok_or(GameError::DeckExhausted)
    }

    fn advance_stage(&mut self) -> Result<(), GameError> {
        loop {
            for p in &mut self.state.players {
                p.reset_for_round();
            }
            self.state.min_raise = self.state.big_blind;

            if self.state.stage == Stage::River {
                self.state.stage = Stage::Showdown;
                return self.showdown();
            }

            let next = self.state.stage.next();
            self.deck.burn();
            for _ in 0..next.cards_dealt() {
                let card = self.draw()?;
                self.state.community_cards.push(card);
            }
            self.state.stage = next;
            self.state.version += 1;
            debug!(
                hand = self.state.hand_number,
                stage = ?next,
                board = %crate::cards::cards_to_string(&self.state.community_cards),
                "stage advanced"
            );
            if next == Stage::Flop {
                self.reveal_opponent_cards();
            }

            self.state.current_player_index = self.next_player_index(self.state.dealer);
            if !self.needs_no_action() {
                return Ok(());
            }
        }
    }

    fn finish_uncontested(&mut self) {
        let pot = self.state.pot;
        let winner = self
            .state
            .players
            .iter()
            .position(|p| p.is_contesting());
        self.state.stage = Stage::Showdown;
        self.state.version += 1;
        let Some(seat) = winner else {
            return;
        };
        self.state.players[seat].chips += pot;
        self.state.pot = 0;
        info!(hand = self.state.hand_number, seat, pot, "pot won uncontested");
        self.state.last_result = Some(ShowdownInfo {
            hand_number: self.state.hand_number,
            winners: vec![seat],
            payouts: vec![Payout {
                seat,
                amount: pot,
                category: None,
            }],
            pot,
            uncontested: true,
            hands: Vec::new(),
            notes: None,
        });
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        let board = self.state.community_cards.clone();
        let mut evals: Vec<(usize, HandEvaluation)> = Vec::new();
        for p in self.state.players.iter().filter(|p| p.is_contesting()) {
            let mut cards = p.hole_cards.clone();
            cards.extend_from_slice(&board);
            evals.push((p.seat, evaluate_hand(&cards)?));
        }
        evals.sort_by(|a, b| compare_hands(&b.1, &a.1));

        let Some((_, best)) = evals.first().cloned() else {
            return Ok(());
        };
        let mut winners: Vec<usize> = evals
            .iter()
            .take_while(|(_, e)| compare_hands(e, &best).is_eq())
            .map(|(seat, _)| *seat)
            .collect();
        let n = self.state.players.len();
        order_from_dealer(&mut winners, self.state.dealer, n);

        let pot = self.state.pot;
        let payouts: Vec<Payout> = split_pot(pot, &winners)
            .into_iter()
            .map(|(seat, amount)| {
                self.state.players[seat].chips += amount;
                Payout {
                    seat,
                    amount,
                    category: Some(best.category),
                }
            })
            .collect();
        self.state.pot = 0;
        self.state.version += 1;

        info!(
            hand = self.state.hand_number,
            ?winners,
            pot,
            hand_name = best.name(),
            "showdown"
        );
        self.state.last_result = Some(ShowdownInfo {
            hand_number: self.state.hand_number,
            notes: (winners.len() > 1).then(|| "split pot".to_string()),
            winners,
            payouts,
            pot,
            uncontested: false,
            hands: evals,
        });
        Ok(())
    }

    fn reveal_opponent_cards(&mut self) {
        let mut opponents: Vec<usize> = self
            .state
            .players
            .iter()
            .filter(|p| !p.is_human && p.is_contesting())
            .map(|p| p.seat)
            .collect();
        if opponents.is_empty() {
            return;
        }
        let count = match self.show_opponent_cards {
            ShowOpponentCards::Never => 0,
            ShowOpponentCards::Sometimes => {
                opponents.shuffle(&mut self.rng);
                self.rng.random_range(1..=opponents.len()).min(2)
            }
            ShowOpponentCards::Always => opponents.len(),
        };
        for &seat in opponents.iter().take(count) {
            self.state.players[seat].reveal_cards_to_observer = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(num_players: usize) -> Engine {
        let config = TableConfig {
            num_players,
            seed: Some(11),
            ..TableConfig::default()
        };
        Engine::new(config).expect("valid config")
    }

    #[test]
    fn turn_order_skips_folded_and_all_in() {
        let mut e = engine(6);
        e.start_new_hand().unwrap();
        e.state.players[3].is_folded = true;
        e.state.players[4].is_all_in = true;
        assert_eq!(e.next_player_index(2), 5);
        assert_eq!(e.next_player_index(5), 0);
    }

    #[test]
    fn single_eligible_seat_is_returned_from_anywhere() {
        let mut e = engine(4);
        e.start_new_hand().unwrap();
        for seat in [0, 1, 3] {
            e.state.players[seat].is_folded = true;
        }
        assert_eq!(e.next_player_index(2), 2);
        assert_eq!(e.next_player_index(0), 2);
    }

    #[test]
    fn no_eligible_seat_returns_start() {
        let mut e = engine(4);
        e.start_new_hand().unwrap();
        for p in &mut e.state.players {
            p.is_all_in = true;
        }
        assert_eq!(e.next_player_index(3), 3);
    }

    #[test]
    fn short_small_blind_posts_everything() {
        let mut e = engine(6);
        e.state.players[1].chips = 15;
        e.start_new_hand().unwrap();
        let sb = &e.state.players[1];
        assert_eq!(sb.chips, 0);
        assert_eq!(sb.current_bet_this_round, 15);
        assert!(sb.is_all_in);
        assert_eq!(e.state.pot, 65);
        assert_eq!(e.state.total_chips(), 1500 * 5 + 15);
    }

    #[test]
    fn busted_table_refuses_new_hand() {
        let mut e = engine(3);
        e.state.players[1].chips = 0;
        e.state.players[2].chips = 0;
        let before = e.game_state();
        assert_eq!(e.start_new_hand(), Err(GameError::NotEnoughPlayers));
        assert_eq!(e.game_state(), before);
    }

    #[test]
    fn busted_seat_is_skipped_for_blinds() {
        let mut e = engine(4);
        e.state.players[1].chips = 0;
        e.start_new_hand().unwrap();
        // dealer 0, seat 1 sits out: SB 2, BB 3
        assert!(!e.state.players[1].is_active);
        assert!(e.state.players[1].hole_cards.is_empty());
        assert_eq!(e.state.players[2].current_bet_this_round, 25);
        assert_eq!(e.state.players[3].current_bet_this_round, 50);
        assert_eq!(e.state.current_player_index, 0);
    }

    #[test]
    fn board_that_plays_splits_from_dealers_left() {
        use crate::cards::parse_cards;
        use crate::hand::Category;

        let mut e = engine(3);
        e.start_new_hand().unwrap();
        assert_eq!(e.state.dealer, 0);
        e.state.community_cards = parse_cards("Ah Kh Qh Jh Th").unwrap();
        for (seat, hole) in ["2c 3d", "4c 5d", "6c 7d"].into_iter().enumerate() {
            e.state.players[seat].hole_cards = parse_cards(hole).unwrap();
        }
        e.state.pot = 151;
        let chips: Vec<u32> = e.state.players.iter().map(|p| p.chips).collect();

        e.showdown().unwrap();

        let result = e.state.last_result.clone().unwrap();
        assert_eq!(result.winners, vec![1, 2, 0]);
        let paid: Vec<(usize, u32)> = result.payouts.iter().map(|p| (p.seat, p.amount)).collect();
        assert_eq!(paid, vec![(1, 51), (2, 50), (0, 50)]);
        for (seat, amount) in paid {
            assert_eq!(e.state.players[seat].chips, chips[seat] + amount);
        }
        assert_eq!(e.state.pot, 0);
        assert_eq!(result.notes.as_deref(), Some("split pot"));
        assert_eq!(result.hands.len(), 3);
        assert!(result
            .hands
            .iter()
            .all(|(_, eval)| eval.category == Category::RoyalFlush));
    }

    #[test]
    #[should_panic(expected = "engine invariant violated")]
    fn running_out_of_cards_mid_hand_is_fatal() {
        let mut e = engine(2);
        e.start_new_hand().unwrap();
        let left = e.deck.remaining();
        e.deck.deal_many(left);
        // small blind completes, big blind checks, flop cannot be dealt
        assert!(e.player_action(PlayerAction::Call));
        e.player_action(PlayerAction::Check);
    }
}
