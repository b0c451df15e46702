use coach_engine::engine::Engine;
use coach_engine::errors::GameError;
use coach_engine::game::{ShowOpponentCards, Stage, TableConfig};
use coach_engine::hand::compare_hands;
use coach_engine::player::{ActionKind, PlayerAction, Position};

fn table(num_players: usize) -> TableConfig {
    TableConfig {
        num_players,
        seed: Some(2024),
        ..TableConfig::default()
    }
}

fn started(num_players: usize) -> Engine {
    let mut engine = Engine::new(table(num_players)).expect("valid config");
    engine.start_new_hand().expect("hand starts");
    engine
}

// Calls or checks until the hand is over, asserting chip conservation after every action.
fn call_down(engine: &mut Engine, total: u32) {
    for _ in 0..200 {
        if engine.is_hand_complete() {
            return;
        }
        let legal = engine.valid_actions();
        let action = if legal.contains(&ActionKind::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        assert!(engine.player_action(action), "{action:?} rejected");
        assert_eq!(engine.state().total_chips(), total);
    }
    panic!("hand did not finish");
}

#[test]
fn six_player_hand_starts_with_blinds_posted() {
    let engine = started(6);
    let state = engine.game_state();
    assert_eq!(state.stage, Stage::Preflop);
    assert_eq!(state.pot, 75);
    assert!(state.community_cards.is_empty());
    assert_eq!(state.dealer, 0);
    assert_eq!(state.players[1].chips, 1475);
    assert_eq!(state.players[2].chips, 1450);
    assert!(state.players.iter().all(|p| p.hole_cards.len() == 2));
    assert_eq!(state.current_player_index, 3);
    assert_eq!(state.hand_number, 1);
    assert_eq!(state.players[0].display_name, "You");
    assert!(state.players[0].is_human);
    assert_eq!(state.players[4].display_name, "Player 5");
}

#[test]
fn hole_cards_are_unique_across_the_table() {
    let engine = started(10);
    let mut seen = std::collections::HashSet::new();
    for p in &engine.state().players {
        for c in &p.hole_cards {
            assert!(seen.insert(*c), "duplicate {c}");
        }
    }
    assert_eq!(seen.len(), 20);
}

#[test]
fn invalid_tables_are_rejected() {
    for config in [
        table(1),
        table(11),
        TableConfig {
            small_blind: 50,
            big_blind: 25,
            ..table(6)
        },
        TableConfig {
            starting_chips: 0,
            ..table(6)
        },
    ] {
        assert!(matches!(Engine::new(config), Err(GameError::InvalidConfig(_))));
    }
}

#[test]
fn actions_before_first_hand_are_refused() {
    let mut engine = Engine::new(table(4)).unwrap();
    assert_eq!(engine.try_action(PlayerAction::Fold), Err(GameError::NoHandInProgress));
    assert!(engine.valid_actions().is_empty());
}

#[test]
fn everyone_folds_to_big_blind() {
    let mut engine = started(6);
    for _ in 0..5 {
        assert!(engine.player_action(PlayerAction::Fold));
    }
    let state = engine.game_state();
    assert!(engine.is_hand_complete());
    assert_eq!(state.pot, 0);
    assert_eq!(state.players[2].chips, 1525);
    let result = state.last_result.expect("result recorded");
    assert!(result.uncontested);
    assert!(result.hands.is_empty());
    assert_eq!(result.winners, vec![2]);
    assert_eq!(result.payout_for(2), 75);
    assert_eq!(
        engine.try_action(PlayerAction::Check),
        Err(GameError::HandAlreadyComplete)
    );
    assert!(engine.valid_actions().is_empty());
}

#[test]
fn call_down_reaches_showdown_and_conserves_chips() {
    let mut engine = started(6);
    call_down(&mut engine, 9000);
    let state = engine.game_state();
    assert_eq!(state.stage, Stage::Showdown);
    assert_eq!(state.community_cards.len(), 5);
    assert_eq!(state.pot, 0);
    assert_eq!(state.total_chips(), 9000);
    let result = state.last_result.expect("showdown result");
    assert!(!result.uncontested);
    assert_eq!(result.pot, 300);
    let paid: u32 = result.payouts.iter().map(|p| p.amount).sum();
    assert_eq!(paid, 300);

    // every caller shows down, strongest first, winners hold the best hand
    assert_eq!(result.hands.len(), 6);
    let mut seats: Vec<usize> = result.hands.iter().map(|(seat, _)| *seat).collect();
    seats.sort_unstable();
    assert_eq!(seats, vec![0, 1, 2, 3, 4, 5]);
    for pair in result.hands.windows(2) {
        assert!(compare_hands(&pair[0].1, &pair[1].1).is_ge());
    }
    let best = &result.hands[0].1;
    for (seat, eval) in &result.hands {
        assert_eq!(result.winners.contains(seat), compare_hands(eval, best).is_eq());
        assert_eq!(eval.cards.len(), 5);
    }
    assert!(result.payouts.iter().all(|p| p.category == Some(best.category)));
}

#[test]
fn raise_sets_minimum_for_next_raiser() {
    let mut engine = started(6);
    let before = engine.version();
    assert!(!engine.player_action(PlayerAction::Check));
    assert_eq!(engine.version(), before);

    assert!(engine.player_action(PlayerAction::Raise(100)));
    let state = engine.game_state();
    assert_eq!(state.players[3].current_bet_this_round, 150);
    assert_eq!(state.min_raise, 100);
    assert_eq!(state.pot, 225);
    assert_eq!(engine.call_amount(4), 150);

    assert_eq!(
        engine.try_action(PlayerAction::Raise(99)),
        Err(GameError::InvalidBetAmount {
            amount: 99,
            minimum: 100
        })
    );
    assert!(engine.player_action(PlayerAction::Raise(200)));
    assert_eq!(engine.state().min_raise, 200);
    assert_eq!(engine.state().table_max_bet(), 350);
}

#[test]
fn round_completes_once_everyone_matches() {
    let mut engine = started(3);
    // dealer 0, SB 1, BB 2: seat 0 is first to act
    assert_eq!(engine.state().current_player_index, 0);
    assert!(engine.player_action(PlayerAction::Call));
    assert!(!engine.is_betting_round_complete());
    assert!(engine.player_action(PlayerAction::Call));
    assert!(!engine.is_betting_round_complete());
    assert!(engine.player_action(PlayerAction::Check));

    let state = engine.game_state();
    assert_eq!(state.stage, Stage::Flop);
    assert_eq!(state.community_cards.len(), 3);
    assert_eq!(state.pot, 150);
    assert_eq!(state.min_raise, 50);
    assert_eq!(state.current_player_index, 1);
    assert!(state.players.iter().all(|p| p.current_bet_this_round == 0));
    assert_eq!(
        engine.valid_actions(),
        vec![ActionKind::Fold, ActionKind::Check, ActionKind::Bet, ActionKind::AllIn]
    );
}

#[test]
fn heads_up_all_in_runs_out_the_board() {
    let mut engine = started(2);
    // dealer 0, SB 1, BB 0
    assert_eq!(engine.state().current_player_index, 1);
    assert!(engine.player_action(PlayerAction::AllIn));
    assert!(engine.player_action(PlayerAction::Call));

    let state = engine.game_state();
    assert_eq!(state.stage, Stage::Showdown);
    assert_eq!(state.community_cards.len(), 5);
    assert_eq!(state.pot, 0);
    assert_eq!(state.total_chips(), 3000);
    let result = state.last_result.unwrap();
    match result.winners.len() {
        1 => assert_eq!(state.players[result.winners[0]].chips, 3000),
        _ => assert!(state.players.iter().all(|p| p.chips == 1500)),
    }
}

#[test]
fn button_moves_each_hand() {
    let mut engine = started(4);
    for _ in 0..3 {
        assert!(engine.player_action(PlayerAction::Fold));
    }
    engine.start_new_hand().unwrap();
    let state = engine.game_state();
    assert_eq!(state.hand_number, 2);
    assert_eq!(state.dealer, 1);
    assert_eq!(state.players[2].current_bet_this_round, 25);
    assert_eq!(state.players[3].current_bet_this_round, 50);
    assert_eq!(state.current_player_index, 0);
    assert!(state.action_log.is_empty());
}

#[test]
fn positions_follow_the_button() {
    let engine = started(6);
    let positions: Vec<Position> = (0..6).map(|s| engine.position_of(s)).collect();
    assert_eq!(
        positions,
        vec![
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::Early,
            Position::Middle,
            Position::Middle,
        ]
    );
}

#[test]
fn action_log_records_chips_moved() {
    let mut engine = started(3);
    assert!(engine.player_action(PlayerAction::Raise(50)));
    assert!(engine.player_action(PlayerAction::Fold));
    let log = &engine.state().action_log;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].seat, 0);
    assert_eq!(log[0].amount, 100);
    assert_eq!(log[0].stage, Stage::Preflop);
    assert_eq!(log[1].seat, 1);
    assert_eq!(log[1].action, PlayerAction::Fold);
    assert_eq!(log[1].player_id, "player_1");
}

fn flop_with(mode: ShowOpponentCards) -> Engine {
    let config = TableConfig {
        show_opponent_cards: mode,
        ..table(3)
    };
    let mut engine = Engine::new(config).unwrap();
    engine.start_new_hand().unwrap();
    for action in [PlayerAction::Call, PlayerAction::Call, PlayerAction::Check] {
        assert!(engine.player_action(action));
    }
    assert_eq!(engine.state().stage, Stage::Flop);
    engine
}

#[test]
fn reveal_hook_respects_mode() {
    let revealed = |e: &Engine| {
        e.state()
            .players
            .iter()
            .filter(|p| p.reveal_cards_to_observer)
            .count()
    };

    let always = flop_with(ShowOpponentCards::Always);
    assert_eq!(revealed(&always), 2);
    assert!(!always.state().players[0].reveal_cards_to_observer);

    assert_eq!(revealed(&flop_with(ShowOpponentCards::Never)), 0);

    let sometimes = revealed(&flop_with(ShowOpponentCards::Sometimes));
    assert!((1..=2).contains(&sometimes));
}

#[test]
fn state_serializes_to_json() {
    let engine = started(2);
    let json = engine.state().to_json().unwrap();
    assert!(json.contains("\"stage\":\"preflop\""));
    assert!(json.contains("\"pot\":75"));
}
