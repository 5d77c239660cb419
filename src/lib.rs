//! Движок блэкджека: один дилер против одного или нескольких игроков.
//!
//! Слои:
//! - `domain`: карты, колода, руки, игроки, конфиг стола;
//! - `engine`: ход игрока, политика дилера, раунд, итоги;
//! - `infra`: RNG, провайдеры решений, консоль.

pub mod domain;
pub mod engine;
pub mod infra;

pub use domain::{Card, Deck, Hand, Rank, Suit, TableConfig};
pub use engine::{EngineError, Outcome, Round, RoundSummary};
