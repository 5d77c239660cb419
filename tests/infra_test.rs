// tests/infra_test.rs

use std::thread;
use std::time::Duration;

use blackjack_engine::{
    domain::{Card, Deck, Hand, PlayerStatus, TableConfig},
    engine::{
        Decision, DecisionProvider, DecisionReply, DecisionRequest, NullObserver, Outcome, Round,
        RoundEvent, RoundEventKind, RoundObserver,
    },
    infra::{
        render_event, ChannelDecisions, ConsoleReporter, ScriptedDecisions, SeatedDecisions,
        ThresholdBot,
    },
};

//
// ---------- helpers ----------
//

fn c(token: &str) -> Card {
    token.parse().expect("valid card token")
}

fn deck(tokens: &[&str]) -> Deck {
    Deck::from_top(tokens.iter().map(|t| c(t)))
}

fn ask<P: DecisionProvider>(provider: &mut P, player: &str, score: u32) -> DecisionReply {
    let hand = Hand::new();
    let request = DecisionRequest {
        player,
        hand: &hand,
        score,
        dealer_up: None,
        rejected: 0,
    };
    provider.request_decision(&request)
}

fn input(s: &str) -> DecisionReply {
    DecisionReply::Input(s.to_string())
}

fn plain_config() -> TableConfig {
    TableConfig {
        suited: false,
        ..TableConfig::default()
    }
}

//
// ---------- ScriptedDecisions ----------
//

#[test]
fn scripted_decisions_replay_then_forfeit() {
    let mut p = ScriptedDecisions::new(["hit", "stand"]);
    assert_eq!(p.remaining(), 2);

    assert_eq!(ask(&mut p, "Ana", 12), input("hit"));
    assert_eq!(ask(&mut p, "Ana", 15), input("stand"));
    assert_eq!(ask(&mut p, "Ana", 15), DecisionReply::Forfeit);

    assert_eq!(p.asked(), 3);
    assert_eq!(p.remaining(), 0);
}

//
// ---------- ThresholdBot ----------
//

#[test]
fn threshold_bot_hits_below_threshold() {
    let mut bot = ThresholdBot::new(15);
    assert_eq!(ask(&mut bot, "Bot", 14), DecisionReply::from(Decision::Hit));
    assert_eq!(ask(&mut bot, "Bot", 15), DecisionReply::from(Decision::Stand));
    assert_eq!(ask(&mut bot, "Bot", 20), DecisionReply::from(Decision::Stand));

    // по умолчанию: как дилер
    let mut bot = ThresholdBot::default();
    assert_eq!(ask(&mut bot, "Bot", 16), input("hit"));
    assert_eq!(ask(&mut bot, "Bot", 17), input("stand"));
}

//
// ---------- ChannelDecisions ----------
//

#[test]
fn channel_decisions_receive_messages_in_order() {
    let (tx, mut p) = ChannelDecisions::pair(Some(Duration::from_secs(5)));
    tx.send("hit".to_string()).unwrap();
    tx.send("stand".to_string()).unwrap();

    assert_eq!(ask(&mut p, "Ana", 10), input("hit"));
    assert_eq!(ask(&mut p, "Ana", 18), input("stand"));
}

#[test]
fn channel_decisions_forfeit_on_timeout() {
    let (_tx, mut p) = ChannelDecisions::pair(Some(Duration::from_millis(20)));
    assert_eq!(ask(&mut p, "Ana", 10), DecisionReply::Forfeit);
}

#[test]
fn channel_decisions_forfeit_when_sender_dropped() {
    let (tx, mut p) = ChannelDecisions::pair(None);
    tx.send("stand".to_string()).unwrap();
    drop(tx);

    // уже отправленное сообщение всё ещё доставляется
    assert_eq!(ask(&mut p, "Ana", 10), input("stand"));
    assert_eq!(ask(&mut p, "Ana", 10), DecisionReply::Forfeit);
}

#[test]
fn channel_decisions_timeout_from_config() {
    let config = TableConfig {
        decision_timeout_secs: Some(1),
        ..TableConfig::default()
    };
    let (tx, mut p) = ChannelDecisions::pair_for(&config);
    tx.send("h".to_string()).unwrap();
    assert_eq!(ask(&mut p, "Ana", 10), input("h"));
}

#[test]
fn full_round_driven_over_channel() {
    // Ana: 10 6 → hit 3 → 19 | дилер 10, hole 8
    let d = deck(&["10", "6", "10", "3", "8"]);
    let mut round = Round::with_deck(plain_config(), ["Ana"], d).unwrap();
    let (tx, mut provider) = ChannelDecisions::pair(Some(Duration::from_secs(5)));

    let sender = thread::spawn(move || {
        for msg in ["hit", "stand"] {
            tx.send(msg.to_string()).unwrap();
        }
    });

    let summary = round.play(&mut provider, &mut NullObserver).unwrap();
    sender.join().unwrap();

    assert_eq!(summary.players[0].score, 19);
    assert_eq!(summary.dealer.score, 18);
    assert_eq!(summary.players[0].outcome, Outcome::Win);
}

#[test]
fn silent_channel_forces_stand_in_a_round() {
    let d = deck(&["10", "7", "10", "9"]);
    let mut round = Round::with_deck(plain_config(), ["Ana"], d).unwrap();
    let (_tx, mut provider) = ChannelDecisions::pair(Some(Duration::from_millis(10)));

    let summary = round.play(&mut provider, &mut NullObserver).unwrap();

    assert_eq!(summary.players[0].status, PlayerStatus::ForcedStand);
    assert_eq!(summary.players[0].score, 17);
}

//
// ---------- SeatedDecisions ----------
//

#[test]
fn seated_decisions_route_by_player_name() {
    let mut p = SeatedDecisions::new()
        .seat("Ana", ScriptedDecisions::new(["stand"]))
        .seat("Bo", ThresholdBot::new(21));

    assert_eq!(ask(&mut p, "Bo", 20), input("hit"));
    assert_eq!(ask(&mut p, "Ana", 20), input("stand"));
    assert_eq!(ask(&mut p, "Cy", 20), DecisionReply::Forfeit);
}

#[test]
fn seated_decisions_use_fallback_for_unseated_players() {
    let mut p = SeatedDecisions::new()
        .seat("Ana", ScriptedDecisions::new(["hit"]))
        .with_fallback(ThresholdBot::default());

    assert_eq!(ask(&mut p, "Ana", 5), input("hit"));
    assert_eq!(ask(&mut p, "Zed", 12), input("hit"));
    assert_eq!(ask(&mut p, "Zed", 18), input("stand"));
}

//
// ---------- ConsoleReporter ----------
//

#[test]
fn console_reporter_prints_round_transcript() {
    let d = deck(&["10", "8", "9", "8"]);
    let mut round = Round::with_deck(plain_config(), ["Ana"], d).unwrap();
    let mut reporter = ConsoleReporter::new(Vec::<u8>::new());

    round
        .play(&mut ScriptedDecisions::new(["maybe", "stand"]), &mut reporter)
        .unwrap();

    let text = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(text.contains("Dealer shows: 9"), "{text}");
    assert!(text.contains("Player Ana\nHand: [10, 8] -> 18 points"), "{text}");
    assert!(text.contains("Invalid option."), "{text}");
    assert!(text.contains("Ana stands with 18 points."), "{text}");
    assert!(text.contains("Dealer stands on 17."), "{text}");
    assert!(text.contains("FINAL RESULTS"), "{text}");
    assert!(text.contains("Ana: WIN"), "{text}");
}

#[test]
fn console_reporter_reports_aborted_round() {
    let d = deck(&["10", "8"]);
    let mut round = Round::with_deck(plain_config(), ["Ana"], d).unwrap();
    let mut reporter = ConsoleReporter::new(Vec::<u8>::new());

    assert!(round
        .play(&mut ScriptedDecisions::default(), &mut reporter)
        .is_err());

    let text = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(text.contains("ROUND ABORTED"), "{text}");
}

#[test]
fn hole_card_deal_is_not_rendered() {
    assert_eq!(render_event(&RoundEventKind::DealerHoleCardDealt), None);
    assert_eq!(
        render_event(&RoundEventKind::PlayerBusted {
            player: "Ana".to_string(),
            score: 24,
        }),
        Some("Ana went over 21 (24).".to_string())
    );
}

#[test]
fn custom_observer_sees_every_event_in_order() {
    struct Indices(Vec<u32>);
    impl RoundObserver for Indices {
        fn on_event(&mut self, event: &RoundEvent) {
            self.0.push(event.index);
        }
    }

    let d = deck(&["10", "8", "9", "7", "2"]);
    let mut round = Round::with_deck(plain_config(), ["Ana"], d).unwrap();
    let mut seen = Indices(Vec::new());
    round
        .play(&mut ScriptedDecisions::new(["stand"]), &mut seen)
        .unwrap();

    let expected: Vec<u32> = (0..round.history().len() as u32).collect();
    assert_eq!(seen.0, expected);
}
