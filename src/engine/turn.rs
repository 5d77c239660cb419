use log::{debug, warn};

use crate::domain::{Card, Deck, ForfeitPolicy, Player, PlayerStatus, Score, BLACKJACK};
use crate::engine::actions::{Decision, DecisionReply, DecisionRequest};
use crate::engine::errors::EngineError;
use crate::engine::round_history::{RoundEventKind, RoundHistory};
use crate::engine::{DecisionProvider, RoundObserver};

/// Итог хода одного игрока.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnResult {
    pub status: PlayerStatus,
    pub score: Score,
}

/// Полный ход игрока против общей колоды.
///
/// Цикл:
/// - считаем очки; перебор: ход окончен без запроса решения;
/// - иначе спрашиваем провайдера: `Hit`: тянем карту и повторяем,
///   `Stand`: фиксируем очки;
/// - некорректный ввод не тратит карту и не двигает состояние, переспрашиваем;
/// - `Forfeit` закрывает ход по `ForfeitPolicy`.
///
/// Пустая колода: фатальная ошибка. Игрок получает статус `DeckExhausted`,
/// ошибка пробрасывается наверх.
pub fn play_turn<P, O>(
    player: &mut Player,
    deck: &mut Deck,
    dealer_up: Option<Card>,
    forfeit: ForfeitPolicy,
    provider: &mut P,
    history: &mut RoundHistory,
    observer: &mut O,
) -> Result<TurnResult, EngineError>
where
    P: DecisionProvider + ?Sized,
    O: RoundObserver + ?Sized,
{
    history.record(
        observer,
        RoundEventKind::TurnStarted {
            player: player.name.clone(),
            hand: player.hand.clone(),
            score: player.score(),
        },
    );

    let mut rejected = 0;

    loop {
        let score = player.score();
        if score > BLACKJACK {
            debug!("{} перебрал: {}", player.name, score);
            player.finish(PlayerStatus::Busted);
            history.record(
                observer,
                RoundEventKind::PlayerBusted {
                    player: player.name.clone(),
                    score,
                },
            );
            return Ok(TurnResult {
                status: PlayerStatus::Busted,
                score,
            });
        }

        let reply = provider.request_decision(&DecisionRequest {
            player: &player.name,
            hand: &player.hand,
            score,
            dealer_up,
            rejected,
        });

        let input = match reply {
            DecisionReply::Input(input) => input,
            DecisionReply::Forfeit => return Ok(forfeit_turn(player, forfeit, history, observer)),
        };

        match input.parse::<Decision>() {
            Ok(Decision::Hit) => {
                rejected = 0;
                let card = match deck.draw() {
                    Ok(card) => card,
                    Err(e) => {
                        warn!("{}: колода пуста, ход прерван", player.name);
                        player.finish(PlayerStatus::DeckExhausted);
                        return Err(e.into());
                    }
                };
                player.hand.push(card);
                let score = player.score();
                debug!("{} берёт {} -> {}", player.name, card, score);
                history.record(
                    observer,
                    RoundEventKind::PlayerHit {
                        player: player.name.clone(),
                        card,
                        hand: player.hand.clone(),
                        score,
                    },
                );
            }
            Ok(Decision::Stand) => {
                debug!("{} остаётся с {}", player.name, score);
                player.finish(PlayerStatus::Stood);
                history.record(
                    observer,
                    RoundEventKind::PlayerStood {
                        player: player.name.clone(),
                        score,
                    },
                );
                return Ok(TurnResult {
                    status: PlayerStatus::Stood,
                    score,
                });
            }
            Err(_) => {
                rejected += 1;
                warn!("{}: недопустимый ввод {:?}", player.name, input);
                history.record(
                    observer,
                    RoundEventKind::InvalidDecision {
                        player: player.name.clone(),
                        input,
                    },
                );
            }
        }
    }
}

fn forfeit_turn<O>(
    player: &mut Player,
    policy: ForfeitPolicy,
    history: &mut RoundHistory,
    observer: &mut O,
) -> TurnResult
where
    O: RoundObserver + ?Sized,
{
    let status = match policy {
        ForfeitPolicy::Stand => PlayerStatus::ForcedStand,
        ForfeitPolicy::Bust => PlayerStatus::Forfeited,
    };
    let score = player.finish(status);
    warn!("{} недоступен, ход закрыт как {:?}", player.name, status);
    history.record(
        observer,
        RoundEventKind::PlayerForfeited {
            player: player.name.clone(),
            score,
            status,
        },
    );
    TurnResult { status, score }
}
