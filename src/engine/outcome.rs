use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerStatus, Score, BLACKJACK};

/// Почему игрок проиграл.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LossReason {
    /// Перебор.
    Bust,
    /// Меньше, чем у дилера.
    Comparison,
    /// Неявка (провайдер решений отвалился, политика `bust`).
    Forfeit,
}

/// Результат игрока против дилера.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Push,
    Lose(LossReason),
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Push => write!(f, "PUSH"),
            Outcome::Lose(LossReason::Bust) => write!(f, "lose (bust)"),
            Outcome::Lose(LossReason::Comparison) => write!(f, "lose"),
            Outcome::Lose(LossReason::Forfeit) => write!(f, "lose (forfeit)"),
        }
    }
}

/// Сравнение очков игрока `p` и дилера `d`.
///
/// Перебор игрока проигрывает всегда, даже если дилер тоже перебрал.
pub fn decide_outcome(p: Score, d: Score) -> Outcome {
    if p > BLACKJACK {
        Outcome::Lose(LossReason::Bust)
    } else if d > BLACKJACK || p > d {
        Outcome::Win
    } else if p == d {
        Outcome::Push
    } else {
        Outcome::Lose(LossReason::Comparison)
    }
}

/// Итог с учётом статуса хода: неявка с политикой `bust`: проигрыш без сравнения.
pub fn player_outcome(status: PlayerStatus, p: Score, d: Score) -> Outcome {
    match status {
        PlayerStatus::Forfeited => Outcome::Lose(LossReason::Forfeit),
        _ => decide_outcome(p, d),
    }
}
