use serde::{Deserialize, Serialize};

use crate::domain::{Card, Hand, PlayerStatus, Score};
use crate::engine::outcome::Outcome;
use crate::engine::RoundObserver;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RoundEventKind {
    /// Новый раунд начался.
    RoundStarted {
        players: Vec<String>,
        deck_size: usize,
    },

    /// Игрок получил стартовые карты.
    PlayerDealt {
        player: String,
        cards: Vec<Card>,
    },

    /// Открытая карта дилера.
    DealerUpCard {
        card: Card,
    },

    /// Дилер получил закрытую карту (значение не раскрывается).
    DealerHoleCardDealt,

    /// Начался ход игрока.
    TurnStarted {
        player: String,
        hand: Hand,
        score: Score,
    },

    /// Ввод отклонён, игрока переспросят. Карта не тратится.
    InvalidDecision {
        player: String,
        input: String,
    },

    /// Игрок взял карту.
    PlayerHit {
        player: String,
        card: Card,
        hand: Hand,
        score: Score,
    },

    PlayerStood {
        player: String,
        score: Score,
    },

    PlayerBusted {
        player: String,
        score: Score,
    },

    /// Провайдер решений отвалился, ход закрыт принудительно.
    PlayerForfeited {
        player: String,
        score: Score,
        status: PlayerStatus,
    },

    /// Дилер открыл руку.
    DealerRevealed {
        hand: Hand,
        score: Score,
    },

    /// Дилер добрал карту.
    DealerHit {
        card: Card,
        score: Score,
    },

    /// Ход дилера завершён.
    DealerFinished {
        score: Score,
        busted: bool,
    },

    /// Итог игрока против дилера.
    OutcomeDecided {
        player: String,
        score: Score,
        dealer_score: Score,
        outcome: Outcome,
    },

    /// Раунд прерван фатальной ошибкой, итогов нет.
    RoundAborted {
        reason: String,
    },
}

/// Событие в раунде с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) -> &RoundEvent {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
        &self.events[idx as usize]
    }

    /// Записать событие и сразу отдать его наблюдателю (вывод на консоль и т.п.).
    pub fn record<O>(&mut self, observer: &mut O, kind: RoundEventKind)
    where
        O: RoundObserver + ?Sized,
    {
        let event = self.push(kind);
        observer.on_event(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &RoundEventKind> {
        self.events.iter().map(|e| &e.kind)
    }
}
