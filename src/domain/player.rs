use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::hand::{Hand, Score};

/// Статус игрока в контексте раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Ход ещё не начался или идёт прямо сейчас.
    Waiting,
    /// Игрок сам остановился.
    Stood,
    /// Перебор (больше 21).
    Busted,
    /// Провайдер решений отвалился, ход закрыт принудительным stand.
    ForcedStand,
    /// Провайдер решений отвалился, засчитан проигрыш (перебор по неявке).
    Forfeited,
    /// Hit на пустой колоде; раунд после этого прерван.
    DeckExhausted,
}

impl PlayerStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, PlayerStatus::Waiting)
    }
}

/// Игрок за столом. Имя уникально в пределах раунда и служит ключом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub hand: Hand,
    pub status: PlayerStatus,
    /// Итоговые очки, фиксируются один раз в конце хода.
    pub final_score: Option<Score>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            status: PlayerStatus::Waiting,
            final_score: None,
        }
    }

    pub fn score(&self) -> Score {
        self.hand.score()
    }

    /// Закрыть ход: записать статус и очки.
    pub fn finish(&mut self, status: PlayerStatus) -> Score {
        let score = self.hand.score();
        self.status = status;
        self.final_score = Some(score);
        score
    }
}

/// Дилер. Первая карта открыта, остальные скрыты до хода дилера.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dealer {
    pub hand: Hand,
    pub revealed: bool,
}

impl Dealer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Открытая карта, которую видят игроки.
    pub fn up_card(&self) -> Option<&Card> {
        self.hand.cards().first()
    }

    /// Что видно снаружи: вся рука после раскрытия, иначе только первая карта.
    pub fn visible_cards(&self) -> &[Card] {
        if self.revealed {
            self.hand.cards()
        } else {
            &self.hand.cards()[..self.hand.len().min(1)]
        }
    }

    pub fn score(&self) -> Score {
        self.hand.score()
    }
}
