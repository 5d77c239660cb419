use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки разбора карт.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Неизвестный ранг карты: {0:?}")]
    InvalidRank(String),

    #[error("Неизвестная масть карты: {0:?}")]
    InvalidSuit(char),
}

/// Масть карты. На очки не влияет, только для отображения.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// Ранг карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Все 13 рангов в порядке колоды.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Номинал карты в блэкджеке.
    ///
    /// Картинки (J, Q, K) = 10, туз = 11 (понижение до 1 делает подсчёт руки),
    /// числовые карты = своему номиналу.
    pub const fn value(self) -> u32 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r as u32,
        }
    }

    pub const fn is_ace(self) -> bool {
        matches!(self, Rank::Ace)
    }
}

/// Карта: ранг + необязательная масть.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    /// Карта без масти (вариант колоды "только ранги").
    pub const fn plain(rank: Rank) -> Self {
        Self { rank, suit: None }
    }

    pub const fn value(&self) -> u32 {
        self.rank.value()
    }
}

impl From<Rank> for Card {
    fn from(rank: Rank) -> Self {
        Card::plain(rank)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ace => write!(f, "A"),
            Rank::Jack => write!(f, "J"),
            Rank::Queen => write!(f, "Q"),
            Rank::King => write!(f, "K"),
            r => write!(f, "{}", *r as u32),
        }
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `10d`, `7` (без масти).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank, suit),
            None => write!(f, "{}", self.rank),
        }
    }
}

/// Парсинг ранга: "A", "2".."10", "J", "Q", "K" (регистр не важен, "T" = 10).
impl FromStr for Rank {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "A" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return Err(CardError::InvalidRank(s.to_string())),
        };
        Ok(rank)
    }
}

impl TryFrom<char> for Suit {
    type Error = CardError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'c' | 'C' => Ok(Suit::Clubs),
            'd' | 'D' => Ok(Suit::Diamonds),
            'h' | 'H' => Ok(Suit::Hearts),
            's' | 'S' => Ok(Suit::Spades),
            _ => Err(CardError::InvalidSuit(ch)),
        }
    }
}

/// Парсинг строки вида "Ah", "10d", "K".
///
/// Ни один токен ранга не заканчивается буквой масти, поэтому
/// последняя буква c/d/h/s однозначно считается мастью.
impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.char_indices().last() {
            Some((idx, ch)) if idx > 0 && "cdhsCDHS".contains(ch) => {
                let rank = s[..idx].parse::<Rank>()?;
                let suit = Suit::try_from(ch)?;
                Ok(Card::new(rank, suit))
            }
            _ => Ok(Card::plain(s.parse::<Rank>()?)),
        }
    }
}
