use crate::{Card, FiredTimer, Region, Role, Sequencer, SessionId, Stage, Step, TimerQueue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RevealStage {
    League,
    Position,
    Team,
    Card,
    Done,
}

impl Stage for RevealStage {
    const ORDER: &'static [Self] = &[
        RevealStage::League,
        RevealStage::Position,
        RevealStage::Team,
        RevealStage::Card,
        RevealStage::Done,
    ];

    fn dwell_ms(self) -> u64 {
        match self {
            RevealStage::League => 1200,
            RevealStage::Position => 1200,
            RevealStage::Team => 1200,
            RevealStage::Card => 2500,
            RevealStage::Done => 0,
        }
    }

    fn label(self) -> &'static str {
        match self {
            RevealStage::League => "league",
            RevealStage::Position => "position",
            RevealStage::Team => "team",
            RevealStage::Card => "card",
            RevealStage::Done => "done",
        }
    }
}

/// What the reveal surface shows for the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealFrame<'a> {
    League { code: &'static str, name: &'static str },
    Position { role: Role },
    Team { team: &'a str, year: &'a str },
    Card { card: &'a Card },
    Done,
}

pub const REVEAL_CONTINUE_HINT: &str = "Click anywhere to continue";

#[derive(Debug)]
pub struct RevealSequencer {
    card: Card,
    seq: Sequencer<RevealStage>,
}

impl RevealSequencer {
    pub fn start(card: Card, session: SessionId, timers: &mut TimerQueue) -> Self {
        Self {
            card,
            seq: Sequencer::start(session, timers),
        }
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn region(&self) -> Region {
        self.card.region
    }

    pub fn stage(&self) -> RevealStage {
        self.seq.stage()
    }

    pub fn session(&self) -> SessionId {
        self.seq.session()
    }

    pub fn is_done(&self) -> bool {
        self.seq.is_done()
    }

    pub fn sequencer(&self) -> &Sequencer<RevealStage> {
        &self.seq
    }

    pub fn frame(&self) -> RevealFrame<'_> {
        match self.stage() {
            RevealStage::League => RevealFrame::League {
                code: self.card.region.code(),
                name: self.card.region.full_name(),
            },
            RevealStage::Position => RevealFrame::Position {
                role: self.card.role,
            },
            RevealStage::Team => RevealFrame::Team {
                team: &self.card.team,
                year: &self.card.year,
            },
            RevealStage::Card => RevealFrame::Card { card: &self.card },
            RevealStage::Done => RevealFrame::Done,
        }
    }

    pub fn on_timer(
        &mut self,
        fired: &FiredTimer,
        timers: &mut TimerQueue,
    ) -> Option<Step<RevealStage>> {
        self.seq.on_timer(fired, timers)
    }

    pub fn skip(&mut self, timers: &mut TimerQueue) -> Option<Step<RevealStage>> {
        self.seq.skip(timers)
    }

    pub fn cancel(&mut self, timers: &mut TimerQueue) {
        self.seq.cancel(timers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::card;

    fn run_to(reveal: &mut RevealSequencer, timers: &mut TimerQueue, until: u64) -> usize {
        let mut completions = 0;
        while let Some(fired) = timers.pop_due(until) {
            if let Some(Step::Completed) = reveal.on_timer(&fired, timers) {
                completions += 1;
            }
        }
        timers.settle(until);
        completions
    }

    #[test]
    fn reaches_done_after_four_automatic_transitions() {
        let mut timers = TimerQueue::new(0);
        let mut reveal =
            RevealSequencer::start(card("zeus-t1-2024", "T1", Role::Top), SessionId(1), &mut timers);
        assert_eq!(reveal.stage(), RevealStage::League);
        assert_eq!(run_to(&mut reveal, &mut timers, RevealStage::total_ms()), 1);
        assert!(reveal.is_done());
        assert_eq!(reveal.sequencer().transitions(), 4);
        assert_eq!(
            reveal.sequencer().visited(),
            RevealStage::ORDER
        );
    }

    #[test]
    fn stage_boundaries_match_dwell_times() {
        let mut timers = TimerQueue::new(0);
        let mut reveal =
            RevealSequencer::start(card("faker-t1-2024", "T1", Role::Mid), SessionId(1), &mut timers);
        run_to(&mut reveal, &mut timers, 1_199);
        assert_eq!(reveal.stage(), RevealStage::League);
        run_to(&mut reveal, &mut timers, 1_200);
        assert_eq!(reveal.stage(), RevealStage::Position);
        run_to(&mut reveal, &mut timers, 3_600);
        assert_eq!(reveal.stage(), RevealStage::Card);
        run_to(&mut reveal, &mut timers, 6_099);
        assert_eq!(reveal.stage(), RevealStage::Card);
        assert_eq!(run_to(&mut reveal, &mut timers, 6_100), 1);
    }

    macro_rules! skip_from_case {
        ($name:ident, $elapsed:expr, $stage:expr) => {
            #[test]
            fn $name() {
                let mut timers = TimerQueue::new(0);
                let mut reveal = RevealSequencer::start(
                    card("keria-t1-2024", "T1", Role::Support),
                    SessionId(7),
                    &mut timers,
                );
                run_to(&mut reveal, &mut timers, $elapsed);
                assert_eq!(reveal.stage(), $stage);
                let before = reveal.sequencer().transitions();
                assert_eq!(reveal.skip(&mut timers), Some(Step::Completed));
                assert_eq!(reveal.sequencer().transitions(), before + 1);
                assert_eq!(timers.pending_len(), 0);
                assert_eq!(reveal.skip(&mut timers), None);
            }
        };
    }

    skip_from_case!(skip_from_league, 0, RevealStage::League);
    skip_from_case!(skip_from_position, 1_300, RevealStage::Position);
    skip_from_case!(skip_from_team, 2_500, RevealStage::Team);
    skip_from_case!(skip_from_card, 4_000, RevealStage::Card);

    #[test]
    fn frames_follow_the_stage() {
        let mut timers = TimerQueue::new(0);
        let mut reveal =
            RevealSequencer::start(card("oner-t1-2024", "T1", Role::Jungle), SessionId(1), &mut timers);
        assert_eq!(
            reveal.frame(),
            RevealFrame::League {
                code: "LCK",
                name: "Korea"
            }
        );
        run_to(&mut reveal, &mut timers, 1_200);
        assert_eq!(reveal.frame(), RevealFrame::Position { role: Role::Jungle });
        run_to(&mut reveal, &mut timers, 2_400);
        assert_eq!(
            reveal.frame(),
            RevealFrame::Team {
                team: "T1",
                year: "2024"
            }
        );
        run_to(&mut reveal, &mut timers, 3_600);
        assert!(matches!(reveal.frame(), RevealFrame::Card { card } if card.name == "oner"));
    }
}
