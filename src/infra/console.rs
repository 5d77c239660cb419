//! Консольная обвязка: ввод решений через терминал и печать событий раунда.

use std::io::{self, Write};

use dialoguer::Input;
use log::warn;

use crate::engine::{
    DecisionProvider, DecisionReply, DecisionRequest, RoundEvent, RoundEventKind, RoundObserver,
};

/// Решения игрока с терминала.
/// Ошибка ввода (закрытый stdin, не терминал): `Forfeit`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleDecisions;

impl DecisionProvider for ConsoleDecisions {
    fn request_decision(&mut self, request: &DecisionRequest<'_>) -> DecisionReply {
        let prompt = format!("{}: hit (h) or stand (s)?", request.player);
        match Input::<String>::new()
            .with_prompt(prompt)
            .report(false)
            .interact_text()
        {
            Ok(input) => DecisionReply::Input(input),
            Err(e) => {
                warn!("{}: ввод недоступен: {}", request.player, e);
                DecisionReply::Forfeit
            }
        }
    }
}

/// Печать событий раунда в любой `Write` (по умолчанию stdout).
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Одна строка текста на событие; `None`: событие не печатается.
pub fn render_event(kind: &RoundEventKind) -> Option<String> {
    let line = match kind {
        RoundEventKind::RoundStarted { players, deck_size } => {
            format!("Round: {} player(s), {} cards in deck", players.len(), deck_size)
        }
        RoundEventKind::PlayerDealt { player, cards } => {
            let cards: Vec<String> = cards.iter().map(ToString::to_string).collect();
            format!("{player} is dealt {}", cards.join(" "))
        }
        RoundEventKind::DealerUpCard { card } => format!("\nDealer shows: {card}"),
        RoundEventKind::DealerHoleCardDealt => return None,
        RoundEventKind::TurnStarted {
            player,
            hand,
            score,
        } => format!("\nPlayer {player}\nHand: {hand} -> {score} points"),
        RoundEventKind::InvalidDecision { .. } => "Invalid option.".to_string(),
        RoundEventKind::PlayerHit {
            card, hand, score, ..
        } => format!("Card drawn: {card}\nHand: {hand} -> {score} points"),
        RoundEventKind::PlayerStood { player, score } => {
            format!("{player} stands with {score} points.")
        }
        RoundEventKind::PlayerBusted { player, score } => {
            format!("{player} went over 21 ({score}).")
        }
        RoundEventKind::PlayerForfeited {
            player,
            score,
            status,
        } => format!("{player} is unavailable: {status:?} with {score} points."),
        RoundEventKind::DealerRevealed { hand, score } => {
            format!("\nDealer's hand: {hand} -> {score} points")
        }
        RoundEventKind::DealerHit { card, score } => format!("Dealer draws {card} -> {score}"),
        RoundEventKind::DealerFinished { score, busted } => {
            if *busted {
                format!("Dealer busts with {score}.\n\nFINAL RESULTS")
            } else {
                format!("Dealer stands on {score}.\n\nFINAL RESULTS")
            }
        }
        RoundEventKind::OutcomeDecided {
            player, outcome, ..
        } => format!("{player}: {outcome}"),
        RoundEventKind::RoundAborted { reason } => format!("\nROUND ABORTED: {reason}"),
    };
    Some(line)
}

impl<W: Write> RoundObserver for ConsoleReporter<W> {
    fn on_event(&mut self, event: &RoundEvent) {
        if let Some(line) = render_event(&event.kind) {
            if let Err(e) = writeln!(self.out, "{line}") {
                warn!("не удалось вывести событие #{}: {}", event.index, e);
            }
        }
    }
}
