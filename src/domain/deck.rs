use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Ошибки колоды.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Колода пуста: взять карту невозможно")]
    Exhausted,
}

/// Колода карт. В домене: просто упорядоченный список карт.
/// Верх колоды: конец вектора.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub(crate) cards: Vec<Card>,
}

impl Deck {
    /// Колода из `copies` комплектов по 13 рангов.
    ///
    /// `suited = true`: каждый комплект в 4 мастях (Clubs, Diamonds, Hearts, Spades),
    /// иначе одна неявная масть (карты без масти).
    /// Порядок внутри комплекта: масть за мастью, A..K.
    pub fn build(suited: bool, copies: u32) -> Self {
        let suits: Vec<Option<Suit>> = if suited {
            Suit::ALL.iter().copied().map(Some).collect()
        } else {
            vec![None]
        };

        let mut cards = Vec::with_capacity(13 * suits.len() * copies as usize);
        for _ in 0..copies {
            for &suit in &suits {
                for rank in Rank::ALL {
                    cards.push(Card { rank, suit });
                }
            }
        }
        Deck { cards }
    }

    /// Стандартная 52-карточная колода.
    pub fn standard_52() -> Self {
        Self::build(true, 1)
    }

    /// "Подтасованная" колода: первая карта списка будет взята первой.
    pub fn from_top<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.reverse();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Карты в порядке хранения (последняя: верхняя).
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Верхняя карта без извлечения.
    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Взять одну карту сверху колоды.
    /// На пустой колоде: `DeckError::Exhausted`, состояние не меняется.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }
}
