use log::debug;

use crate::domain::{Dealer, Deck, Score, BLACKJACK};
use crate::engine::errors::EngineError;
use crate::engine::round_history::{RoundEventKind, RoundHistory};
use crate::engine::RoundObserver;

/// Дилер добирает, пока у него меньше 17. На 17 (мягких и жёстких) стоит.
pub const DEALER_STANDS_ON: Score = 17;

pub fn dealer_should_hit(score: Score) -> bool {
    score < DEALER_STANDS_ON
}

/// Ход дилера: без внешнего ввода.
///
/// - если закрытая карта ещё не роздана (отложенный вариант): берём её;
/// - раскрываем руку;
/// - добираем, пока очки < 17.
///
/// Возвращает итоговые очки. Повторный вызов при очках ≥ 17 ничего не тянет.
pub fn play_dealer<O>(
    dealer: &mut Dealer,
    deck: &mut Deck,
    history: &mut RoundHistory,
    observer: &mut O,
) -> Result<Score, EngineError>
where
    O: RoundObserver + ?Sized,
{
    while dealer.hand.len() < 2 {
        dealer.hand.push(deck.draw()?);
    }

    dealer.revealed = true;
    let mut score = dealer.score();
    history.record(
        observer,
        RoundEventKind::DealerRevealed {
            hand: dealer.hand.clone(),
            score,
        },
    );

    while dealer_should_hit(score) {
        let card = deck.draw()?;
        dealer.hand.push(card);
        score = dealer.score();
        debug!("дилер берёт {} -> {}", card, score);
        history.record(observer, RoundEventKind::DealerHit { card, score });
    }

    history.record(
        observer,
        RoundEventKind::DealerFinished {
            score,
            busted: score > BLACKJACK,
        },
    );
    Ok(score)
}
