use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Hand, Score};
use crate::engine::errors::EngineError;

/// Решение игрока на своём ходу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision {
    /// Взять ещё карту.
    Hit,
    /// Остановиться.
    Stand,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Hit => write!(f, "hit"),
            Decision::Stand => write!(f, "stand"),
        }
    }
}

/// Разбор ввода игрока. Регистр и пробелы по краям не важны.
///
/// Кроме `hit` / `stand` принимаются короткие формы `h` / `s`
/// и `p` / `r` (pedir / retirarse).
impl FromStr for Decision {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hit" | "h" | "p" => Ok(Decision::Hit),
            "stand" | "s" | "r" => Ok(Decision::Stand),
            _ => Err(EngineError::InvalidDecision(s.to_string())),
        }
    }
}

/// Что видит провайдер решений в момент запроса.
#[derive(Clone, Debug)]
pub struct DecisionRequest<'a> {
    pub player: &'a str,
    pub hand: &'a Hand,
    pub score: Score,
    /// Открытая карта дилера.
    pub dealer_up: Option<Card>,
    /// Сколько подряд было отклонено некорректных ответов на этом шаге.
    pub rejected: u32,
}

/// Ответ провайдера решений.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionReply {
    /// Сырой ввод игрока, движок сам его разбирает.
    Input(String),
    /// Игрок недоступен (таймаут, дисконнект, закрытый ввод).
    Forfeit,
}

impl From<Decision> for DecisionReply {
    fn from(decision: Decision) -> Self {
        DecisionReply::Input(decision.to_string())
    }
}
