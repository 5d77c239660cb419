use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки конфигурации стола и состава игроков.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Нужен хотя бы один игрок")]
    NoPlayers,

    #[error("Имя игрока №{0} пустое")]
    EmptyName(usize),

    #[error("Имя игрока {0:?} повторяется")]
    DuplicateName(String),

    #[error("Ожидалось {expected} игрок(ов), передано имён: {got}")]
    PlayerCountMismatch { expected: usize, got: usize },

    #[error("Количество колод должно быть положительным")]
    ZeroDeckCopies,

    #[error("Слишком много колод: {got} (максимум {max})")]
    TooManyDeckCopies { max: u32, got: u32 },

    #[error("Таймаут решения должен быть положительным")]
    ZeroTimeout,

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(String),
}

/// Верхняя граница `deck_copies`.
pub const MAX_DECK_COPIES: u32 = 8;

/// Когда дилер получает вторую (закрытую) карту.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HoleCardTiming {
    /// Обе карты при раздаче, вторая закрыта.
    Immediate,
    /// Одна карта при раздаче, вторая: в начале хода дилера.
    #[default]
    Deferred,
}

/// Что делать с игроком, чей провайдер решений отвалился (таймаут, дисконнект).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ForfeitPolicy {
    /// Принудительный stand с текущими очками.
    #[default]
    Stand,
    /// Автоматический проигрыш.
    Bust,
}

/// Конфиг стола: состав колоды и правила раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    /// Колода в 4 мастях (иначе только ранги).
    pub suited: bool,
    /// Сколько комплектов в колоде.
    pub deck_copies: u32,
    pub dealer_hole_card: HoleCardTiming,
    pub forfeit: ForfeitPolicy,
    /// Сколько ждать решения игрока (для провайдеров с таймаутом).
    pub decision_timeout_secs: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            suited: true,
            deck_copies: 1,
            dealer_hole_card: HoleCardTiming::Deferred,
            forfeit: ForfeitPolicy::Stand,
            decision_timeout_secs: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck_copies == 0 {
            return Err(ConfigError::ZeroDeckCopies);
        }
        if self.deck_copies > MAX_DECK_COPIES {
            return Err(ConfigError::TooManyDeckCopies {
                max: MAX_DECK_COPIES,
                got: self.deck_copies,
            });
        }
        if self.decision_timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Разбор TOML-конфига. Отсутствующие поля берутся из `Default`.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: TableConfig =
            toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Сколько карт в полной колоде при этом конфиге.
    /// Для непроверенного конфига с переполнением: `None`.
    pub fn deck_size(&self) -> Option<usize> {
        let suits: usize = if self.suited { 4 } else { 1 };
        usize::try_from(self.deck_copies)
            .ok()?
            .checked_mul(13 * suits)
    }
}

/// Проверка состава: хотя бы один игрок, имена непустые и уникальные.
/// Порядок сохраняется: это и есть порядок ходов.
pub fn validate_roster<I, S>(names: I) -> Result<Vec<String>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut roster = Vec::new();

    for (idx, name) in names.into_iter().enumerate() {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyName(idx + 1));
        }
        if !seen.insert(name.clone()) {
            return Err(ConfigError::DuplicateName(name));
        }
        roster.push(name);
    }

    if roster.is_empty() {
        return Err(ConfigError::NoPlayers);
    }
    Ok(roster)
}
