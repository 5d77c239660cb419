use thiserror::Error;

use crate::domain::{CardError, ConfigError, DeckError};

/// Ошибки движка блэкджека.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Некорректная карта: {0}")]
    Card(#[from] CardError),

    #[error("Раунд прерван: {0}")]
    Deck(#[from] DeckError),

    #[error("Некорректная конфигурация: {0}")]
    Config(#[from] ConfigError),

    #[error("Недопустимое решение {0:?}: ожидается hit или stand")]
    InvalidDecision(String),

    #[error("Раунд уже сыгран")]
    RoundAlreadyPlayed,
}

impl EngineError {
    /// Можно ли продолжить после ошибки (переспросить игрока / поправить конфиг).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::InvalidDecision(_) | EngineError::Config(_))
    }

    pub fn is_deck_exhausted(&self) -> bool {
        matches!(self, EngineError::Deck(DeckError::Exhausted))
    }
}
