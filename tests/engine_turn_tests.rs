// tests/engine_turn_tests.rs
//
// Ход игрока и политика дилера по отдельности:
//  1) stand сразу: карты не тратятся
//  2) hit до stand: по одной карте за hit
//  3) перебор закрывает ход без запроса решения
//  4) некорректный ввод переспрашивается, карта не тратится
//  5) forfeit: stand / bust
//  6) пустая колода на hit: фатальная ошибка, рука не меняется, статус DeckExhausted
//  7) дилер: < 17 добирает, на 17 (мягких и жёстких) стоит, повторный вызов ничего не тянет

use blackjack_engine::domain::{
    Card, Dealer, Deck, DeckError, ForfeitPolicy, Player, PlayerStatus, Rank,
};
use blackjack_engine::engine::{
    dealer_should_hit, play_dealer, play_turn, Decision, EngineError, NullObserver,
    RoundEventKind, RoundHistory, TurnResult,
};
use blackjack_engine::infra::ScriptedDecisions;

fn c(token: &str) -> Card {
    token.parse().expect("valid card token")
}

fn deck(tokens: &[&str]) -> Deck {
    Deck::from_top(tokens.iter().map(|t| c(t)))
}

fn player_with(name: &str, tokens: &[&str]) -> Player {
    let mut p = Player::new(name);
    for t in tokens {
        p.hand.push(c(t));
    }
    p
}

fn run_turn(
    player: &mut Player,
    deck: &mut Deck,
    replies: &[&str],
    forfeit: ForfeitPolicy,
) -> (Result<TurnResult, EngineError>, ScriptedDecisions, RoundHistory) {
    let mut provider = ScriptedDecisions::new(replies.iter().copied());
    let mut history = RoundHistory::new();
    let result = play_turn(
        player,
        deck,
        Some(c("9")),
        forfeit,
        &mut provider,
        &mut history,
        &mut NullObserver,
    );
    (result, provider, history)
}

#[test]
fn decision_parsing_is_case_insensitive() {
    assert_eq!("hit".parse::<Decision>().unwrap(), Decision::Hit);
    assert_eq!(" STAND ".parse::<Decision>().unwrap(), Decision::Stand);
    assert_eq!("H".parse::<Decision>().unwrap(), Decision::Hit);
    assert_eq!("p".parse::<Decision>().unwrap(), Decision::Hit);
    assert_eq!("r".parse::<Decision>().unwrap(), Decision::Stand);
    assert_eq!(
        "double".parse::<Decision>(),
        Err(EngineError::InvalidDecision("double".to_string()))
    );
    assert!("".parse::<Decision>().is_err());
}

#[test]
fn stand_immediately_keeps_deck_intact() {
    let mut player = player_with("Ana", &["10", "7"]);
    let mut d = deck(&["5", "6"]);

    let (result, provider, _) = run_turn(&mut player, &mut d, &["stand"], ForfeitPolicy::Stand);

    assert_eq!(
        result.unwrap(),
        TurnResult {
            status: PlayerStatus::Stood,
            score: 17
        }
    );
    assert_eq!(d.len(), 2);
    assert_eq!(provider.asked(), 1);
    assert_eq!(player.final_score, Some(17));
    assert_eq!(player.status, PlayerStatus::Stood);
}

#[test]
fn each_hit_draws_exactly_one_card() {
    let mut player = player_with("Ana", &["2", "3"]);
    let mut d = deck(&["4", "5", "K"]);

    let (result, _, history) =
        run_turn(&mut player, &mut d, &["hit", "hit", "stand"], ForfeitPolicy::Stand);

    let result = result.unwrap();
    assert_eq!(result.score, 14);
    assert_eq!(player.hand.len(), 4);
    assert_eq!(d.len(), 1);

    let hits = history
        .kinds()
        .filter(|k| matches!(k, RoundEventKind::PlayerHit { .. }))
        .count();
    assert_eq!(hits, 2);
}

#[test]
fn bust_ends_turn_without_asking_again() {
    let mut player = player_with("Ana", &["10", "6"]);
    let mut d = deck(&["K", "2"]);

    let (result, provider, history) =
        run_turn(&mut player, &mut d, &["hit", "hit"], ForfeitPolicy::Stand);

    assert_eq!(
        result.unwrap(),
        TurnResult {
            status: PlayerStatus::Busted,
            score: 26
        }
    );
    assert_eq!(provider.asked(), 1, "no decision is requested after a bust");
    assert_eq!(provider.remaining(), 1);
    assert_eq!(d.len(), 1);
    assert!(matches!(
        history.events.last().map(|e| &e.kind),
        Some(RoundEventKind::PlayerBusted { score: 26, .. })
    ));
}

#[test]
fn already_busted_hand_never_requests_a_decision() {
    let mut player = player_with("Ana", &["K", "9", "5"]);
    let mut d = deck(&["2"]);

    let (result, provider, _) = run_turn(&mut player, &mut d, &["hit"], ForfeitPolicy::Stand);

    assert_eq!(result.unwrap().status, PlayerStatus::Busted);
    assert_eq!(provider.asked(), 0);
    assert_eq!(d.len(), 1);
}

#[test]
fn twenty_one_still_asks_for_a_decision() {
    let mut player = player_with("Ana", &["A", "K"]);
    let mut d = deck(&["5"]);

    let (result, provider, _) = run_turn(&mut player, &mut d, &["stand"], ForfeitPolicy::Stand);

    assert_eq!(result.unwrap().score, 21);
    assert_eq!(provider.asked(), 1);
}

#[test]
fn invalid_input_is_reprompted_without_consuming_cards() {
    let mut player = player_with("Ana", &["10", "2"]);
    let mut d = deck(&["5", "9"]);

    let (result, provider, history) = run_turn(
        &mut player,
        &mut d,
        &["double", "", "HIT", "split", " Stand "],
        ForfeitPolicy::Stand,
    );

    let result = result.unwrap();
    assert_eq!(result.status, PlayerStatus::Stood);
    assert_eq!(result.score, 17);
    assert_eq!(provider.asked(), 5);
    assert_eq!(d.len(), 1, "only the single valid hit draws a card");

    let invalid: Vec<&str> = history
        .kinds()
        .filter_map(|k| match k {
            RoundEventKind::InvalidDecision { input, .. } => Some(input.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(invalid, vec!["double", "", "split"]);
}

#[test]
fn forfeit_with_stand_policy_keeps_score() {
    let mut player = player_with("Ana", &["10", "8"]);
    let mut d = deck(&["5"]);

    let (result, _, _) = run_turn(&mut player, &mut d, &[], ForfeitPolicy::Stand);

    assert_eq!(
        result.unwrap(),
        TurnResult {
            status: PlayerStatus::ForcedStand,
            score: 18
        }
    );
    assert_eq!(d.len(), 1);
}

#[test]
fn forfeit_with_bust_policy_marks_player_forfeited() {
    let mut player = player_with("Ana", &["10", "8"]);
    let mut d = deck(&["2"]);

    // один hit, потом провайдер замолчал
    let (result, _, history) = run_turn(&mut player, &mut d, &["hit"], ForfeitPolicy::Bust);

    let result = result.unwrap();
    assert_eq!(result.status, PlayerStatus::Forfeited);
    assert_eq!(result.score, 20);
    assert!(history
        .kinds()
        .any(|k| matches!(k, RoundEventKind::PlayerForfeited { status: PlayerStatus::Forfeited, .. })));
}

#[test]
fn hit_on_empty_deck_is_fatal_and_leaves_hand_untouched() {
    let mut player = player_with("Ana", &["10", "2"]);
    let mut d = deck(&[]);

    let (result, _, _) = run_turn(&mut player, &mut d, &["hit"], ForfeitPolicy::Stand);

    assert_eq!(result, Err(EngineError::Deck(DeckError::Exhausted)));
    assert_eq!(player.hand.len(), 2);
    assert_eq!(player.status, PlayerStatus::DeckExhausted);
    assert!(player.status.is_finished());
    assert_eq!(player.final_score, Some(12));
}

//
// dealer_policy.rs
//
fn dealer_with(tokens: &[&str]) -> Dealer {
    let mut dealer = Dealer::new();
    for t in tokens {
        dealer.hand.push(c(t));
    }
    dealer
}

#[test]
fn dealer_threshold() {
    assert!(dealer_should_hit(16));
    assert!(!dealer_should_hit(17));
    assert!(!dealer_should_hit(21));
}

#[test]
fn dealer_draws_while_below_seventeen() {
    let mut dealer = dealer_with(&["10", "2"]);
    let mut d = deck(&["3", "4", "K"]);
    let mut history = RoundHistory::new();

    let score = play_dealer(&mut dealer, &mut d, &mut history, &mut NullObserver).unwrap();

    assert_eq!(score, 19);
    assert_eq!(dealer.hand.len(), 4);
    assert_eq!(d.len(), 1);
    assert!(dealer.revealed);
}

#[test]
fn dealer_stands_on_soft_and_hard_seventeen() {
    for hand in [["A", "6"], ["10", "7"]] {
        let mut dealer = dealer_with(&hand);
        let mut d = deck(&["5"]);
        let score =
            play_dealer(&mut dealer, &mut d, &mut RoundHistory::new(), &mut NullObserver).unwrap();
        assert_eq!(score, 17);
        assert_eq!(d.len(), 1, "dealer must not hit on 17: {hand:?}");
    }
}

#[test]
fn dealer_hits_soft_sixteen() {
    let mut dealer = dealer_with(&["A", "5"]);
    let mut d = deck(&["K", "2"]);

    let score =
        play_dealer(&mut dealer, &mut d, &mut RoundHistory::new(), &mut NullObserver).unwrap();

    // A+5+K = 16 (туз по 1), ещё 2 → 18
    assert_eq!(score, 18);
    assert!(d.is_empty());
}

#[test]
fn dealer_policy_is_idempotent_once_standing() {
    let mut dealer = dealer_with(&["10", "4"]);
    let mut d = deck(&["5", "9", "9"]);
    let mut history = RoundHistory::new();

    let first = play_dealer(&mut dealer, &mut d, &mut history, &mut NullObserver).unwrap();
    let left = d.len();
    let second = play_dealer(&mut dealer, &mut d, &mut history, &mut NullObserver).unwrap();

    assert_eq!(first, 19);
    assert_eq!(second, first);
    assert_eq!(d.len(), left);
    assert_eq!(left, 2);
}

#[test]
fn dealer_takes_deferred_hole_card_first() {
    let mut dealer = dealer_with(&["9"]);
    let mut d = deck(&["8", "K"]);

    let score =
        play_dealer(&mut dealer, &mut d, &mut RoundHistory::new(), &mut NullObserver).unwrap();

    assert_eq!(score, 17);
    assert_eq!(dealer.hand.cards(), &[Card::plain(Rank::Nine), Card::plain(Rank::Eight)]);
    assert_eq!(d.len(), 1);
}

#[test]
fn dealer_on_empty_deck_is_fatal() {
    let mut dealer = dealer_with(&["10", "3"]);
    let mut d = deck(&[]);

    let err = play_dealer(&mut dealer, &mut d, &mut RoundHistory::new(), &mut NullObserver)
        .unwrap_err();

    assert!(err.is_deck_exhausted());
    assert_eq!(dealer.hand.len(), 2);
}
