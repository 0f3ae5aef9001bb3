use crate::{FullRosterStage, RevealStage, Role, SessionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    DrawStarted {
        session: SessionId,
        role: Role,
        card_id: String,
    },
    RevealStageEntered {
        session: SessionId,
        stage: RevealStage,
        at_ms: u64,
    },
    RevealSkipped {
        session: SessionId,
        from: RevealStage,
    },
    RevealCompleted {
        session: SessionId,
        role: Role,
        card_id: String,
    },
    FullRosterStarted {
        session: SessionId,
        team: String,
        year: String,
    },
    FullRosterStageEntered {
        session: SessionId,
        stage: FullRosterStage,
        at_ms: u64,
    },
    FullRosterSkipped {
        session: SessionId,
        from: FullRosterStage,
    },
    FullRosterCompleted {
        session: SessionId,
        upgraded: Vec<String>,
    },
    GameReset {
        abandoned_card: Option<String>,
    },
    UpgradesCleared {
        count: usize,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
