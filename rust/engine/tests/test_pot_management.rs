use coach_engine::engine::Engine;
use coach_engine::game::{Stage, TableConfig};
use coach_engine::player::{ActionKind, PlayerAction};
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn random_play_never_creates_or_destroys_chips() {
    let config = TableConfig {
        num_players: 5,
        starting_chips: 500,
        seed: Some(99),
        ..TableConfig::default()
    };
    let total = 2500;
    let mut engine = Engine::new(config).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(99);

    for _ in 0..30 {
        if engine.start_new_hand().is_err() {
            break;
        }
        let mut steps = 0;
        while !engine.is_hand_complete() {
            steps += 1;
            assert!(steps < 500, "hand stuck at {:?}", engine.state().stage);

            let legal = engine.valid_actions();
            let kind = *legal.choose(&mut rng).expect("current seat has actions");
            let action = kind.with_amount(engine.state().min_raise);
            // a minimum raise can still cost more than a short stack
            if !engine.player_action(action) {
                assert_eq!(kind, ActionKind::Raise);
                assert!(engine.player_action(PlayerAction::AllIn));
            }
            assert_eq!(engine.state().total_chips(), total);
        }
        let state = engine.state();
        assert_eq!(state.stage, Stage::Showdown);
        assert_eq!(state.pot, 0);
        assert!(state.last_result.is_some());
    }
}

#[test]
fn legal_set_is_never_empty_for_the_seat_to_act() {
    let mut engine = Engine::new(TableConfig {
        seed: Some(3),
        ..TableConfig::default()
    })
    .unwrap();
    engine.start_new_hand().unwrap();
    let legal = engine.valid_actions();
    assert!(legal.contains(&ActionKind::Fold));
    assert!(legal.contains(&ActionKind::AllIn));
}
