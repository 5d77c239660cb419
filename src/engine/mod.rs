//! Движок блэкджека: ход игрока, политика дилера, раунд, сравнение итогов.
//!
//! Высокоуровневый объект: `Round`
//! Основные операции:
//!   - `Round::new` – собрать и перемешать колоду, проверить состав
//!   - `Round::play` – раздача, ходы игроков, ход дилера, итоги
//!   - `play_turn` / `play_dealer` – отдельные фазы раунда

pub mod actions;
pub mod dealer_policy;
pub mod errors;
pub mod outcome;
pub mod round;
pub mod round_history;
pub mod turn;

pub use actions::{Decision, DecisionReply, DecisionRequest};
pub use dealer_policy::{dealer_should_hit, play_dealer, DEALER_STANDS_ON};
pub use errors::EngineError;
pub use outcome::{decide_outcome, player_outcome, LossReason, Outcome};
pub use round::{DealerResult, PlayerResult, Round, RoundPhase, RoundSummary};
pub use round_history::{RoundEvent, RoundEventKind, RoundHistory};
pub use turn::{play_turn, TurnResult};

use crate::domain::Deck;

/// RNG интерфейс для engine.
/// Реализации: в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Перемешать колоду на месте: меняется порядок, не состав.
pub fn shuffle_deck<R: RandomSource>(deck: &mut Deck, rng: &mut R) {
    rng.shuffle(&mut deck.cards);
}

/// Источник решений игрока (консоль, сеть, бот).
pub trait DecisionProvider {
    fn request_decision(&mut self, request: &DecisionRequest<'_>) -> DecisionReply;
}

/// Потребитель событий раунда (вывод руки/очков, итоги).
pub trait RoundObserver {
    fn on_event(&mut self, event: &RoundEvent);
}

/// Наблюдатель, который ничего не делает.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl RoundObserver for NullObserver {
    fn on_event(&mut self, _event: &RoundEvent) {}
}
