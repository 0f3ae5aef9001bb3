use crate::{
    Card, CardSource, Catalog, Event, EventBus, FiredTimer, FullRosterError, FullRosterSequencer,
    FullRosterStage, RevealSequencer, RevealStage, RngState, Role, RosterError, RosterStore,
    SessionId, Stage, Step, TimerQueue,
};
use thiserror::Error;
use tracing::{debug, info, trace};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    FullRoster(#[from] FullRosterError),
    #[error("full roster effect is playing")]
    EffectActive,
    #[error("roster is not complete ({0}/5)")]
    RosterIncomplete(usize),
}

/// Owns everything a play session needs: the catalog, the roster, the timer
/// queue and at most one sequencer of each kind.
#[derive(Debug)]
pub struct Game<C: CardSource = Catalog> {
    catalog: C,
    roster: RosterStore,
    rng: RngState,
    timers: TimerQueue,
    reveal: Option<RevealSequencer>,
    effect: Option<FullRosterSequencer>,
    next_session: u64,
}

impl<C: CardSource> Game<C> {
    pub fn new(catalog: C, seed: u64) -> Self {
        Self {
            catalog,
            roster: RosterStore::new(),
            rng: RngState::from_seed(seed),
            timers: TimerQueue::new(0),
            reveal: None,
            effect: None,
            next_session: 0,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn reveal(&self) -> Option<&RevealSequencer> {
        self.reveal.as_ref()
    }

    pub fn effect(&self) -> Option<&FullRosterSequencer> {
        self.effect.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_len()
    }

    pub fn overlay_active(&self) -> bool {
        self.reveal.is_some() || self.effect.is_some()
    }

    pub fn can_draw(&self, role: Role) -> bool {
        !self.overlay_active() && self.roster.slot(role).is_none()
    }

    pub fn draw_card(&mut self, role: Role, events: &mut EventBus) -> Result<(), GameError> {
        if self.effect.is_some() {
            return Err(GameError::EffectActive);
        }
        let card = self
            .roster
            .draw_card(role, &self.catalog, &mut self.rng)?
            .clone();
        let session = self.allocate_session();
        info!(%session, %role, card = %card.id, "draw started");
        events.push(Event::DrawStarted {
            session,
            role,
            card_id: card.id.clone(),
        });
        let reveal = RevealSequencer::start(card, session, &mut self.timers);
        events.push(Event::RevealStageEntered {
            session,
            stage: reveal.stage(),
            at_ms: self.timers.now_ms(),
        });
        self.reveal = Some(reveal);
        Ok(())
    }

    /// Plays the full-roster effect over the current, complete roster.
    pub fn start_full_roster(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        self.ensure_effect_allowed()?;
        let cards = self
            .roster
            .full_roster()
            .ok_or(GameError::RosterIncomplete(self.roster.filled_count()))?;
        self.begin_effect(cards, events)
    }

    /// Plays the full-roster effect over any five cards, one per role.
    pub fn play_showcase(&mut self, cards: Vec<Card>, events: &mut EventBus) -> Result<(), GameError> {
        self.ensure_effect_allowed()?;
        self.begin_effect(cards, events)
    }

    /// Forces whichever overlay is active straight to its terminal stage.
    /// Returns false when there was nothing to skip.
    pub fn skip(&mut self, events: &mut EventBus) -> bool {
        if let Some(reveal) = self.reveal.as_mut() {
            let from = reveal.stage();
            let session = reveal.session();
            if let Some(step) = reveal.skip(&mut self.timers) {
                debug!(%session, from = from.label(), "reveal skipped");
                events.push(Event::RevealSkipped { session, from });
                self.on_reveal_step(step, events);
                return true;
            }
        }
        if let Some(effect) = self.effect.as_mut() {
            let from = effect.stage();
            let session = effect.session();
            if let Some(step) = effect.skip(&mut self.timers) {
                debug!(%session, from = from.label(), "full roster effect skipped");
                events.push(Event::FullRosterSkipped { session, from });
                self.on_effect_step(step, events);
                return true;
            }
        }
        false
    }

    pub fn advance_to(&mut self, now_ms: u64, events: &mut EventBus) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            self.dispatch(fired, events);
        }
        self.timers.settle(now_ms);
    }

    pub fn advance_by(&mut self, delta_ms: u64, events: &mut EventBus) {
        let target = self.timers.now_ms().saturating_add(delta_ms);
        self.advance_to(target, events);
    }

    /// Clears the roster, the upgrade marks and any running overlay. An
    /// in-flight reveal is discarded without committing its card.
    pub fn reset_game(&mut self, events: &mut EventBus) {
        if let Some(mut reveal) = self.reveal.take() {
            reveal.cancel(&mut self.timers);
        }
        if let Some(mut effect) = self.effect.take() {
            effect.cancel(&mut self.timers);
        }
        let abandoned_card = self.roster.abandon_reveal().map(|pending| pending.card.id);
        self.roster.reset_game();
        info!(abandoned = ?abandoned_card, "game reset");
        events.push(Event::GameReset { abandoned_card });
    }

    pub fn clear_upgrades(&mut self, events: &mut EventBus) {
        let count = self.roster.upgraded_ids().len();
        self.roster.clear_upgrades();
        events.push(Event::UpgradesCleared { count });
    }

    fn ensure_effect_allowed(&self) -> Result<(), GameError> {
        if self.reveal.is_some() {
            return Err(RosterError::RevealActive.into());
        }
        if self.effect.is_some() {
            return Err(GameError::EffectActive);
        }
        Ok(())
    }

    fn begin_effect(&mut self, cards: Vec<Card>, events: &mut EventBus) -> Result<(), GameError> {
        let session = SessionId(self.next_session + 1);
        let effect = FullRosterSequencer::start(cards, session, &mut self.timers)?;
        self.next_session = session.0;
        info!(%session, team = effect.team(), year = effect.year(), "full roster effect started");
        events.push(Event::FullRosterStarted {
            session,
            team: effect.team().to_string(),
            year: effect.year().to_string(),
        });
        events.push(Event::FullRosterStageEntered {
            session,
            stage: effect.stage(),
            at_ms: self.timers.now_ms(),
        });
        self.effect = Some(effect);
        Ok(())
    }

    fn allocate_session(&mut self) -> SessionId {
        self.next_session += 1;
        SessionId(self.next_session)
    }

    fn dispatch(&mut self, fired: FiredTimer, events: &mut EventBus) {
        let reveal_step = match self.reveal.as_mut() {
            Some(reveal) => reveal.on_timer(&fired, &mut self.timers),
            None => None,
        };
        if let Some(step) = reveal_step {
            self.on_reveal_step(step, events);
            return;
        }
        let effect_step = match self.effect.as_mut() {
            Some(effect) => effect.on_timer(&fired, &mut self.timers),
            None => None,
        };
        if let Some(step) = effect_step {
            self.on_effect_step(step, events);
            return;
        }
        trace!(session = %fired.token.session, "timer fired with no live owner");
    }

    fn on_reveal_step(&mut self, step: Step<RevealStage>, events: &mut EventBus) {
        let at_ms = self.timers.now_ms();
        match step {
            Step::Entered(stage) => {
                if let Some(reveal) = self.reveal.as_ref() {
                    debug!(session = %reveal.session(), stage = stage.label(), "reveal stage");
                    events.push(Event::RevealStageEntered {
                        session: reveal.session(),
                        stage,
                        at_ms,
                    });
                }
            }
            Step::Completed => {
                let Some(reveal) = self.reveal.take() else {
                    return;
                };
                let session = reveal.session();
                events.push(Event::RevealStageEntered {
                    session,
                    stage: RevealStage::Done,
                    at_ms,
                });
                if let Some(role) = self.roster.complete_reveal() {
                    info!(%session, %role, card = %reveal.card().id, "reveal committed");
                    events.push(Event::RevealCompleted {
                        session,
                        role,
                        card_id: reveal.card().id.clone(),
                    });
                }
            }
        }
    }

    fn on_effect_step(&mut self, step: Step<FullRosterStage>, events: &mut EventBus) {
        let at_ms = self.timers.now_ms();
        match step {
            Step::Entered(stage) => {
                if let Some(effect) = self.effect.as_ref() {
                    debug!(session = %effect.session(), stage = stage.label(), "full roster stage");
                    events.push(Event::FullRosterStageEntered {
                        session: effect.session(),
                        stage,
                        at_ms,
                    });
                }
            }
            Step::Completed => {
                let Some(effect) = self.effect.take() else {
                    return;
                };
                let session = effect.session();
                let upgraded = effect.upgraded_ids();
                self.roster.mark_upgraded(upgraded.iter().cloned());
                info!(%session, count = upgraded.len(), "roster upgraded");
                events.push(Event::FullRosterStageEntered {
                    session,
                    stage: FullRosterStage::Done,
                    at_ms,
                });
                events.push(Event::FullRosterCompleted { session, upgraded });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{small_catalog, t1_2024};

    #[test]
    fn draw_is_rejected_while_the_effect_plays() {
        let mut game = Game::new(small_catalog(), 1);
        let mut events = EventBus::default();
        game.play_showcase(t1_2024(), &mut events).expect("showcase");
        assert_eq!(
            game.draw_card(Role::Top, &mut events),
            Err(GameError::EffectActive)
        );
        assert!(game.roster().revealing().is_none());
    }

    #[test]
    fn effect_needs_a_complete_roster() {
        let mut game = Game::new(small_catalog(), 1);
        let mut events = EventBus::default();
        assert_eq!(
            game.start_full_roster(&mut events),
            Err(GameError::RosterIncomplete(0))
        );
        game.draw_card(Role::Top, &mut events).expect("draw");
        assert_eq!(
            game.start_full_roster(&mut events),
            Err(GameError::Roster(RosterError::RevealActive))
        );
    }

    #[test]
    fn invalid_showcase_leaves_no_session_behind() {
        let mut game = Game::new(small_catalog(), 1);
        let mut events = EventBus::default();
        let mut cards = t1_2024();
        cards.truncate(3);
        assert_eq!(
            game.play_showcase(cards, &mut events),
            Err(GameError::FullRoster(FullRosterError::WrongCardCount(3)))
        );
        assert!(game.effect().is_none());
        assert_eq!(game.pending_timers(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn skip_with_nothing_running_is_ignored() {
        let mut game = Game::new(small_catalog(), 1);
        let mut events = EventBus::default();
        assert!(!game.skip(&mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn sessions_are_unique_across_sequencer_kinds() {
        let mut game = Game::new(small_catalog(), 9);
        let mut events = EventBus::default();
        game.draw_card(Role::Mid, &mut events).expect("draw");
        let first = game.reveal().map(|reveal| reveal.session());
        game.skip(&mut events);
        game.play_showcase(t1_2024(), &mut events).expect("showcase");
        let second = game.effect().map(|effect| effect.session());
        assert_ne!(first, second);
    }
}
