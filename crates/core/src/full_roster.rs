use crate::{
    Card, CardPose, FiredTimer, FullRosterLayout, Role, Sequencer, SessionId, Stage, Step,
    TimerQueue,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FullRosterStage {
    Initial,
    Merging,
    Flash,
    Champion,
    Splitting,
    Upgraded,
    Done,
}

impl Stage for FullRosterStage {
    const ORDER: &'static [Self] = &[
        FullRosterStage::Initial,
        FullRosterStage::Merging,
        FullRosterStage::Flash,
        FullRosterStage::Champion,
        FullRosterStage::Splitting,
        FullRosterStage::Upgraded,
        FullRosterStage::Done,
    ];

    fn dwell_ms(self) -> u64 {
        match self {
            FullRosterStage::Initial => 500,
            FullRosterStage::Merging => 1200,
            FullRosterStage::Flash => 400,
            FullRosterStage::Champion => 3000,
            FullRosterStage::Splitting => 1000,
            FullRosterStage::Upgraded => 2500,
            FullRosterStage::Done => 0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FullRosterStage::Initial => "initial",
            FullRosterStage::Merging => "merging",
            FullRosterStage::Flash => "flash",
            FullRosterStage::Champion => "champion",
            FullRosterStage::Splitting => "splitting",
            FullRosterStage::Upgraded => "upgraded",
            FullRosterStage::Done => "done",
        }
    }
}

impl FullRosterStage {
    pub fn previous(self) -> Option<Self> {
        let idx = self.position();
        idx.checked_sub(1).map(|prev| Self::ORDER[prev])
    }

    pub fn shows_flash(self) -> bool {
        self == FullRosterStage::Flash
    }

    pub fn shows_champion_frame(self) -> bool {
        self == FullRosterStage::Champion
    }

    pub fn cards_upgraded(self) -> bool {
        matches!(self, FullRosterStage::Splitting | FullRosterStage::Upgraded)
    }

    /// Background glow fades in once the effect leaves its opening stage.
    pub fn glow_visible(self) -> bool {
        self != FullRosterStage::Initial
    }
}

pub const CHAMPION_TAGLINE: &str = "WORLD CHAMPIONS";
pub const FULL_ROSTER_SKIP_HINT: &str = "Tap to skip";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FullRosterError {
    #[error("full roster needs 5 cards, got {0}")]
    WrongCardCount(usize),
    #[error("role {0} appears more than once")]
    DuplicateRole(Role),
}

/// One card in its layout slot at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCard<'a> {
    pub card: &'a Card,
    pub slot: usize,
    pub pose: CardPose,
    pub upgraded: bool,
}

#[derive(Debug)]
pub struct FullRosterSequencer {
    cards: Vec<Card>,
    team: String,
    year: String,
    seq: Sequencer<FullRosterStage>,
}

impl FullRosterSequencer {
    /// Takes exactly one card per role, in any order. The champion frame is
    /// branded after the first card given.
    pub fn start(
        cards: Vec<Card>,
        session: SessionId,
        timers: &mut TimerQueue,
    ) -> Result<Self, FullRosterError> {
        let cards = canonical_order(cards)?;
        let (team, year) = (cards.team, cards.year);
        Ok(Self {
            cards: cards.sorted,
            team,
            year,
            seq: Sequencer::start(session, timers),
        })
    }

    /// Cards in `Top, Jungle, Mid, ADC, Support` order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn stage(&self) -> FullRosterStage {
        self.seq.stage()
    }

    pub fn session(&self) -> SessionId {
        self.seq.session()
    }

    pub fn is_done(&self) -> bool {
        self.seq.is_done()
    }

    pub fn sequencer(&self) -> &Sequencer<FullRosterStage> {
        &self.seq
    }

    pub fn upgraded_ids(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.id.clone()).collect()
    }

    pub fn placements(&self, layout: &FullRosterLayout, now_ms: u64) -> Vec<PlacedCard<'_>> {
        let stage = self.stage();
        let elapsed = now_ms.saturating_sub(self.seq.entered_at_ms());
        self.cards
            .iter()
            .enumerate()
            .map(|(slot, card)| PlacedCard {
                card,
                slot,
                pose: layout.pose_at(stage, slot, elapsed),
                upgraded: stage.cards_upgraded(),
            })
            .collect()
    }

    pub fn on_timer(
        &mut self,
        fired: &FiredTimer,
        timers: &mut TimerQueue,
    ) -> Option<Step<FullRosterStage>> {
        self.seq.on_timer(fired, timers)
    }

    pub fn skip(&mut self, timers: &mut TimerQueue) -> Option<Step<FullRosterStage>> {
        self.seq.skip(timers)
    }

    pub fn cancel(&mut self, timers: &mut TimerQueue) {
        self.seq.cancel(timers);
    }
}

struct Ordered {
    sorted: Vec<Card>,
    team: String,
    year: String,
}

fn canonical_order(cards: Vec<Card>) -> Result<Ordered, FullRosterError> {
    if cards.len() != Role::ALL.len() {
        return Err(FullRosterError::WrongCardCount(cards.len()));
    }
    let mut seen = [false; 5];
    for card in &cards {
        let idx = card.role.index();
        if seen[idx] {
            return Err(FullRosterError::DuplicateRole(card.role));
        }
        seen[idx] = true;
    }
    let team = cards[0].team.clone();
    let year = cards[0].year.clone();
    let mut sorted = cards;
    sorted.sort_by_key(|card| card.role.index());
    Ok(Ordered { sorted, team, year })
}
