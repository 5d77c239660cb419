use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::{
    validate_roster, Dealer, Deck, Hand, HoleCardTiming, Player, PlayerStatus, Score, TableConfig,
    BLACKJACK,
};
use crate::engine::dealer_policy::play_dealer;
use crate::engine::errors::EngineError;
use crate::engine::outcome::{player_outcome, Outcome};
use crate::engine::round_history::{RoundEventKind, RoundHistory};
use crate::engine::turn::play_turn;
use crate::engine::{shuffle_deck, DecisionProvider, RandomSource, RoundObserver};

/// Фаза раунда.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    /// Колода готова, карты ещё не розданы.
    Ready,
    Finished,
    /// Прерван фатальной ошибкой.
    Aborted,
}

/// Итог игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerResult {
    pub name: String,
    pub hand: Hand,
    pub score: Score,
    pub status: PlayerStatus,
    pub outcome: Outcome,
}

/// Итог дилера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealerResult {
    pub hand: Hand,
    pub score: Score,
    pub busted: bool,
}

/// Краткое описание завершённого раунда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummary {
    pub dealer: DealerResult,
    /// В порядке ходов.
    pub players: Vec<PlayerResult>,
    pub cards_drawn: usize,
    pub cards_remaining: usize,
}

impl RoundSummary {
    pub fn player(&self, name: &str) -> Option<&PlayerResult> {
        self.players.iter().find(|p| p.name == name)
    }
}

/// Один раунд: колода, игроки и дилер живут ровно одну игру.
///
/// Порядок строго последовательный:
/// раздача → ходы игроков по порядку → ход дилера → сравнение.
#[derive(Clone, Debug)]
pub struct Round {
    config: TableConfig,
    deck: Deck,
    initial_deck_size: usize,
    players: Vec<Player>,
    dealer: Dealer,
    history: RoundHistory,
    phase: RoundPhase,
}

impl Round {
    /// Собрать колоду по конфигу и перемешать её переданным RNG.
    pub fn new<I, S, R>(config: TableConfig, names: I, rng: &mut R) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: RandomSource,
    {
        config.validate()?;
        let mut deck = Deck::build(config.suited, config.deck_copies);
        shuffle_deck(&mut deck, rng);
        Self::with_deck(config, names, deck)
    }

    /// Раунд с готовой колодой (без перемешивания).
    pub fn with_deck<I, S>(config: TableConfig, names: I, deck: Deck) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        let roster = validate_roster(names)?;

        Ok(Self {
            config,
            initial_deck_size: deck.len(),
            deck,
            players: roster.into_iter().map(Player::new).collect(),
            dealer: Dealer::new(),
            history: RoundHistory::new(),
            phase: RoundPhase::Ready,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Сыграть раунд целиком.
    ///
    /// Фатальная ошибка (пустая колода) прерывает раунд: в историю пишется
    /// `RoundAborted`, частичных итогов нет. Сыграть раунд второй раз нельзя.
    pub fn play<P, O>(&mut self, provider: &mut P, observer: &mut O) -> Result<RoundSummary, EngineError>
    where
        P: DecisionProvider + ?Sized,
        O: RoundObserver + ?Sized,
    {
        if self.phase != RoundPhase::Ready {
            return Err(EngineError::RoundAlreadyPlayed);
        }

        match self.run(provider, observer) {
            Ok(summary) => {
                self.phase = RoundPhase::Finished;
                Ok(summary)
            }
            Err(err) => {
                warn!("раунд прерван: {}", err);
                self.phase = RoundPhase::Aborted;
                self.history.record(
                    observer,
                    RoundEventKind::RoundAborted {
                        reason: err.to_string(),
                    },
                );
                Err(err)
            }
        }
    }

    fn run<P, O>(&mut self, provider: &mut P, observer: &mut O) -> Result<RoundSummary, EngineError>
    where
        P: DecisionProvider + ?Sized,
        O: RoundObserver + ?Sized,
    {
        info!(
            "новый раунд: {} игрок(ов), {} карт в колоде",
            self.players.len(),
            self.deck.len()
        );
        self.history.record(
            observer,
            RoundEventKind::RoundStarted {
                players: self.players.iter().map(|p| p.name.clone()).collect(),
                deck_size: self.deck.len(),
            },
        );

        self.deal_initial(observer)?;

        let dealer_up = self.dealer.up_card().copied();
        for player in self.players.iter_mut() {
            play_turn(
                player,
                &mut self.deck,
                dealer_up,
                self.config.forfeit,
                provider,
                &mut self.history,
                observer,
            )?;
        }

        let dealer_score = play_dealer(&mut self.dealer, &mut self.deck, &mut self.history, observer)?;

        let mut results = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let score = player.final_score.unwrap_or_else(|| player.score());
            let outcome = player_outcome(player.status, score, dealer_score);
            info!("{}: {} ({} против {})", player.name, outcome, score, dealer_score);
            self.history.record(
                observer,
                RoundEventKind::OutcomeDecided {
                    player: player.name.clone(),
                    score,
                    dealer_score,
                    outcome,
                },
            );
            results.push(PlayerResult {
                name: player.name.clone(),
                hand: player.hand.clone(),
                score,
                status: player.status,
                outcome,
            });
        }

        Ok(RoundSummary {
            dealer: DealerResult {
                hand: self.dealer.hand.clone(),
                score: dealer_score,
                busted: dealer_score > BLACKJACK,
            },
            players: results,
            cards_drawn: self.initial_deck_size - self.deck.len(),
            cards_remaining: self.deck.len(),
        })
    }

    /// Стартовая раздача: каждому игроку по две карты подряд, по порядку,
    /// затем дилеру одна открытая (и закрытая при `Immediate`).
    fn deal_initial<O>(&mut self, observer: &mut O) -> Result<(), EngineError>
    where
        O: RoundObserver + ?Sized,
    {
        for player in self.players.iter_mut() {
            for _ in 0..2 {
                player.hand.push(self.deck.draw()?);
            }
            debug!("{} получает {}", player.name, player.hand);
            self.history.record(
                observer,
                RoundEventKind::PlayerDealt {
                    player: player.name.clone(),
                    cards: player.hand.cards().to_vec(),
                },
            );
        }

        let up = self.deck.draw()?;
        self.dealer.hand.push(up);
        self.history
            .record(observer, RoundEventKind::DealerUpCard { card: up });

        if self.config.dealer_hole_card == HoleCardTiming::Immediate {
            self.dealer.hand.push(self.deck.draw()?);
            self.history
                .record(observer, RoundEventKind::DealerHoleCardDealt);
        }
        Ok(())
    }
}
