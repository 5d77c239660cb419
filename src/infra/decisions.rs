//! Реализации `DecisionProvider`: сценарий, бот, канал с таймаутом, маршрутизация по игрокам.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::warn;

use crate::domain::{Score, TableConfig};
use crate::engine::{Decision, DecisionProvider, DecisionReply, DecisionRequest, DEALER_STANDS_ON};

/// Заранее заданная последовательность ответов (тесты, демо).
/// Когда ответы кончились: `Forfeit`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    replies: VecDeque<String>,
    asked: usize,
}

impl ScriptedDecisions {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            asked: 0,
        }
    }

    /// Сколько раз провайдера спросили.
    pub fn asked(&self) -> usize {
        self.asked
    }

    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn request_decision(&mut self, _request: &DecisionRequest<'_>) -> DecisionReply {
        self.asked += 1;
        match self.replies.pop_front() {
            Some(input) => DecisionReply::Input(input),
            None => DecisionReply::Forfeit,
        }
    }
}

/// Простой бот: берёт карту, пока очки меньше порога.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdBot {
    pub stand_on: Score,
}

impl ThresholdBot {
    pub fn new(stand_on: Score) -> Self {
        Self { stand_on }
    }
}

impl Default for ThresholdBot {
    /// По умолчанию играет как дилер.
    fn default() -> Self {
        Self {
            stand_on: DEALER_STANDS_ON,
        }
    }
}

impl DecisionProvider for ThresholdBot {
    fn request_decision(&mut self, request: &DecisionRequest<'_>) -> DecisionReply {
        if request.score < self.stand_on {
            Decision::Hit.into()
        } else {
            Decision::Stand.into()
        }
    }
}

/// Решения приходят сообщениями по каналу (например, из сетевого обработчика).
///
/// Ожидание ограничено таймаутом; по таймауту или если отправитель закрыт: `Forfeit`.
#[derive(Clone, Debug)]
pub struct ChannelDecisions {
    rx: Receiver<String>,
    timeout: Option<Duration>,
}

impl ChannelDecisions {
    pub fn new(rx: Receiver<String>, timeout: Option<Duration>) -> Self {
        Self { rx, timeout }
    }

    /// Канал и провайдер на его приёмном конце.
    pub fn pair(timeout: Option<Duration>) -> (Sender<String>, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (tx, Self::new(rx, timeout))
    }

    /// То же, таймаут берётся из `TableConfig::decision_timeout_secs`.
    pub fn pair_for(config: &TableConfig) -> (Sender<String>, Self) {
        Self::pair(config.decision_timeout_secs.map(Duration::from_secs))
    }
}

impl DecisionProvider for ChannelDecisions {
    fn request_decision(&mut self, request: &DecisionRequest<'_>) -> DecisionReply {
        let received = match self.timeout {
            Some(timeout) => self.rx.recv_timeout(timeout),
            None => self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(input) => DecisionReply::Input(input),
            Err(RecvTimeoutError::Timeout) => {
                warn!("{}: истекло время ожидания решения", request.player);
                DecisionReply::Forfeit
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("{}: канал решений закрыт", request.player);
                DecisionReply::Forfeit
            }
        }
    }
}

/// Свой провайдер на каждого игрока (люди и боты за одним столом).
/// Игрок без провайдера: `fallback`, если он задан, иначе `Forfeit`.
#[derive(Default)]
pub struct SeatedDecisions {
    seats: HashMap<String, Box<dyn DecisionProvider>>,
    fallback: Option<Box<dyn DecisionProvider>>,
}

impl SeatedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(mut self, player: impl Into<String>, provider: impl DecisionProvider + 'static) -> Self {
        self.seats.insert(player.into(), Box::new(provider));
        self
    }

    pub fn with_fallback(mut self, provider: impl DecisionProvider + 'static) -> Self {
        self.fallback = Some(Box::new(provider));
        self
    }
}

impl DecisionProvider for SeatedDecisions {
    fn request_decision(&mut self, request: &DecisionRequest<'_>) -> DecisionReply {
        if let Some(provider) = self.seats.get_mut(request.player) {
            return provider.request_decision(request);
        }
        match self.fallback.as_mut() {
            Some(provider) => provider.request_decision(request),
            None => DecisionReply::Forfeit,
        }
    }
}
