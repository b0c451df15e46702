use coach_ai::personality::{AIPersonality, Archetype};
use coach_ai::personality_ai::PersonalityAI;
use coach_ai::{create_ai, AIOpponent, DecisionError};
use coach_engine::cards::parse_cards;
use coach_engine::engine::Engine;
use coach_engine::game::{GameState, TableConfig};
use coach_engine::player::{ActionKind, PlayerAction};
use coach_engine::rules::{legal_actions, safe_fallback};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn exact(archetype: Archetype) -> PersonalityAI {
    PersonalityAI::with_personality(AIPersonality::base(archetype), ChaCha20Rng::seed_from_u64(1))
}

/// Fresh six-handed preflop state; seat 3 (early position) is to act.
fn preflop(chips: u32, hole: &str) -> GameState {
    let mut engine = Engine::new(TableConfig {
        seed: Some(5),
        ..TableConfig::default()
    })
    .unwrap();
    engine.start_new_hand().unwrap();
    let mut state = engine.game_state();
    assert_eq!(state.current_player_index, 3);
    let p = &mut state.players[3];
    p.chips = chips;
    p.hole_cards = parse_cards(hole).unwrap();
    state
}

fn legal(state: &GameState) -> Vec<ActionKind> {
    let seat = state.current_player_index;
    legal_actions(
        state.players[seat].chips,
        state.call_amount(seat),
        state.table_max_bet(),
        state.min_raise,
    )
}

fn decide(ai: &mut PersonalityAI, state: &GameState) -> PlayerAction {
    let player = &state.players[state.current_player_index];
    ai.decide(player, state, &legal(state)).unwrap().action
}

#[test]
fn short_stack_rock_shoves_aces() {
    let state = preflop(300, "As Ad");
    assert_eq!(decide(&mut exact(Archetype::Rock), &state), PlayerAction::AllIn);
}

#[test]
fn short_stack_rock_folds_trash() {
    let state = preflop(300, "7c 2d");
    assert_eq!(decide(&mut exact(Archetype::Rock), &state), PlayerAction::Fold);
}

#[test]
fn short_stack_maniac_shoves_outside_the_chart() {
    let state = preflop(300, "7c 2d");
    assert_eq!(decide(&mut exact(Archetype::Maniac), &state), PlayerAction::AllIn);
}

#[test]
fn short_stack_calls_a_shove_with_big_ace() {
    let mut state = preflop(300, "Ah Kd");
    state.players[2].current_bet_this_round = 400;
    state.pot += 350;
    assert_eq!(decide(&mut exact(Archetype::Rock), &state), PlayerAction::Call);
}

#[test]
fn deep_stack_raises_aces() {
    let state = preflop(1500, "As Ad");
    let action = decide(&mut exact(Archetype::TightAggressive), &state);
    // max(2 * 50, 75 / 2) * (0.5 + 1.5 * 0.7)
    assert_eq!(action, PlayerAction::Raise(155));
}

#[test]
fn deep_stack_folds_trash_to_a_big_bet() {
    let mut state = preflop(1500, "7c 2d");
    state.players[2].current_bet_this_round = 1000;
    state.pot += 950;
    assert_eq!(decide(&mut exact(Archetype::Rock), &state), PlayerAction::Fold);
}

#[test]
fn raise_larger_than_stack_becomes_all_in() {
    let mut state = preflop(1500, "As Ad");
    state.players[2].current_bet_this_round = 1200;
    state.pot += 1150;
    assert_eq!(
        decide(&mut exact(Archetype::Maniac), &state),
        PlayerAction::AllIn
    );
}

#[test]
fn off_menu_choice_is_replaced_by_safe_fallback() {
    let state = preflop(1500, "As Ad");
    let player = &state.players[3];
    let mut ai = exact(Archetype::TightAggressive);
    let decision = ai.decide(player, &state, &[ActionKind::Fold]).unwrap();
    assert_eq!(decision.action, PlayerAction::Fold);
    assert!(decision.rationale.contains("adjusted"));
}

#[test]
fn missing_inputs_are_errors() {
    let mut state = preflop(1500, "As Ad");
    let mut ai = exact(Archetype::Rock);
    let player = state.players[3].clone();
    assert_eq!(
        ai.decide(&player, &state, &[]).unwrap_err(),
        DecisionError::NoLegalActions
    );
    state.players[3].hole_cards.clear();
    let player = state.players[3].clone();
    assert_eq!(
        ai.decide(&player, &state, &legal(&state)).unwrap_err(),
        DecisionError::NoHoleCards
    );
}

#[test]
fn stats_count_hands_once() {
    let state = preflop(1500, "As Ad");
    let mut ai = exact(Archetype::TightAggressive);
    decide(&mut ai, &state);
    decide(&mut ai, &state);
    let stats = ai.stats().unwrap();
    assert_eq!(stats.hands_played, 1);
    assert_eq!(stats.decisions, 2);
    assert_eq!(stats.vpip_hands, 1);
    assert_eq!(stats.pfr_hands, 1);
    assert_eq!(stats.vpip(), 100.0);
}

#[test]
fn ai_table_plays_many_hands_without_stalling() {
    let mut engine = Engine::new(TableConfig {
        num_players: 6,
        human_seat: None,
        seed: Some(77),
        ..TableConfig::default()
    })
    .unwrap();
    let mut ais: Vec<Box<dyn AIOpponent>> = (0..6)
        .map(|seat| create_ai(Archetype::ALL[seat % Archetype::ALL.len()], seat as u64))
        .collect();

    for _ in 0..25 {
        if engine.start_new_hand().is_err() {
            break;
        }
        let mut steps = 0;
        while !engine.is_hand_complete() {
            steps += 1;
            assert!(steps < 500, "hand did not finish");
            let state = engine.game_state();
            let seat = state.current_player_index;
            let legal = engine.valid_actions();
            let decision = ais[seat].decide(&state.players[seat], &state, &legal).unwrap();
            if !engine.player_action(decision.action) {
                let fallback = safe_fallback(&legal).unwrap();
                assert!(engine.player_action(fallback.with_amount(state.min_raise)));
            }
            assert_eq!(engine.state().total_chips(), 9000);
        }
    }
    assert!(engine.hand_number() > 0);
}
