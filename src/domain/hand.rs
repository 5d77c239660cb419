use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Очки руки.
pub type Score = u32;

/// Порог перебора.
pub const BLACKJACK: Score = 21;

/// Подсчёт лучшей суммы руки.
///
/// Тузы сначала считаются по 11; пока сумма больше 21 и остаётся туз,
/// посчитанный как 11, понижаем его до 1 (минус 10).
pub fn score(cards: &[Card]) -> Score {
    best_total(cards).0
}

/// Перебор: сумма больше 21 даже со всеми тузами по 1.
pub fn is_bust(cards: &[Card]) -> bool {
    score(cards) > BLACKJACK
}

/// Мягкая рука: в лучшей сумме хотя бы один туз всё ещё идёт за 11.
pub fn is_soft(cards: &[Card]) -> bool {
    best_total(cards).1 > 0
}

/// (сумма, сколько тузов осталось по 11)
fn best_total(cards: &[Card]) -> (Score, u32) {
    let mut total: Score = 0;
    let mut high_aces = 0;

    for card in cards {
        total += card.value();
        if card.rank.is_ace() {
            high_aces += 1;
        }
    }

    while total > BLACKJACK && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }

    (total, high_aces)
}

/// Рука участника. Только растёт: карты добавляются в конец.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> Score {
        score(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl fmt::Display for Hand {
    /// Формат вида `[Ah, 10d]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}
