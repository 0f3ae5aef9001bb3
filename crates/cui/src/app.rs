use anyhow::{Context, Result};
use dreamroster_core::{
    AssetSubject, Card, CardSource, Event, EventBus, Game, ResolvedAsset, Role, Stage,
    ViewportClass, FULL_ROSTER_SKIP_HINT,
};
use crate::view;
use dreamroster_data::{load_game_data, AssetResolver, FsAssetResolver, GameData};
use ratatui::layout::Rect;
use std::collections::VecDeque;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_SEED: u64 = 0xC0FFEE;
const MAX_EVENT_LOG: usize = 200;
const IMAGES_DIR: &str = "images";

pub struct App {
    pub seed: u64,
    pub data: GameData,
    pub game: Game,
    pub events: EventBus,
    pub resolver: FsAssetResolver,
    pub viewport: ViewportClass,
    pub screen: Rect,
    pub showcase_cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(assets: &Path, seed: u64) -> Result<Self> {
        let data = load_game_data(assets)
            .with_context(|| format!("load game data from {}", assets.display()))?;
        info!(
            cards = data.catalog.cards().len(),
            showcases = data.showcases.len(),
            seed,
            "game data ready"
        );
        let game = Game::new(data.catalog.clone(), seed);
        let viewport = data.config.viewport_for(u16::MAX);
        let mut app = Self {
            seed,
            resolver: FsAssetResolver::new(assets.join(IMAGES_DIR)),
            data,
            game,
            events: EventBus::default(),
            viewport,
            screen: Rect::default(),
            showcase_cursor: 0,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.push_event_line(format!(
            "catalog: {} cards, {} showcase rosters",
            app.data.catalog.cards().len(),
            app.data.showcases.len()
        ));
        Ok(app)
    }

    pub fn tick_ms(&self) -> u64 {
        self.data.config.tick_ms.max(1)
    }

    /// Moves game time to `now_ms`, firing every stage timer that came due.
    pub fn on_tick(&mut self, now_ms: u64) {
        if now_ms <= self.game.now_ms() {
            return;
        }
        self.game.advance_to(now_ms, &mut self.events);
        self.flush_events();
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        let viewport = self.data.config.viewport_for(width);
        if viewport != self.viewport {
            debug!(width, ?viewport, "viewport changed");
            self.viewport = viewport;
        }
    }

    pub fn next_hint(&self) -> String {
        if self.game.reveal().is_some() {
            return "space / click to skip".to_string();
        }
        if self.game.effect().is_some() {
            return FULL_ROSTER_SKIP_HINT.to_string();
        }
        if self.game.roster().is_complete() {
            return "e play full roster | r reset".to_string();
        }
        let keys: Vec<String> = Role::ALL
            .iter()
            .filter(|role| self.game.can_draw(**role))
            .map(|role| format!("{} {}", role.draw_key(), role))
            .collect();
        format!("draw: {}", keys.join(" | "))
    }

    pub fn draw(&mut self, role: Role) {
        // Draw keys do nothing while an animation is on screen.
        if self.game.overlay_active() {
            return;
        }
        match self.game.draw_card(role, &mut self.events) {
            Ok(()) => self.push_status(format!("drawing {role}...")),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    /// Clicks skip a running animation; otherwise an empty slot under the cursor is drawn.
    pub fn click(&mut self, column: u16, row: u16) {
        if self.game.overlay_active() {
            self.skip();
            return;
        }
        let size = view::roster_card_size(self.viewport);
        match view::role_at(self.screen, size, column, row) {
            Some(role) if self.game.can_draw(role) => self.draw(role),
            _ => {}
        }
    }

    pub fn skip(&mut self) {
        if self.game.skip(&mut self.events) {
            self.flush_events();
        }
    }

    pub fn reset(&mut self) {
        if self.game.overlay_active() {
            self.push_status("finish or skip the animation first");
            return;
        }
        self.game.reset_game(&mut self.events);
        self.showcase_cursor = 0;
        self.push_status("roster cleared");
        self.flush_events();
    }

    pub fn play_full_roster(&mut self) {
        match self.game.start_full_roster(&mut self.events) {
            Ok(()) => self.push_status("full roster!"),
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    /// Plays the next predefined roster, wrapping around the list.
    pub fn play_next_showcase(&mut self) {
        if self.data.showcases.is_empty() {
            self.push_status("no showcase rosters loaded");
            return;
        }
        let index = self.showcase_cursor % self.data.showcases.len();
        let roster = self.data.showcases[index].clone();
        match self.game.play_showcase(roster.cards, &mut self.events) {
            Ok(()) => {
                self.showcase_cursor = index + 1;
                self.push_status(format!("showcase: {}", roster.name));
            }
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn clear_upgrades(&mut self) {
        if self.game.roster().upgraded_ids().is_empty() {
            self.push_status("nothing upgraded");
            return;
        }
        self.game.clear_upgrades(&mut self.events);
        self.push_status("upgrades cleared");
        self.flush_events();
    }

    pub fn portrait(&self, card: &Card) -> ResolvedAsset {
        self.resolver.resolve(AssetSubject::PlayerPhoto(card))
    }

    pub fn resolve(&self, subject: AssetSubject<'_>) -> ResolvedAsset {
        self.resolver.resolve(subject)
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    pub fn push_error(&mut self, err: impl Display) {
        self.status_line = format!("error: {err}");
    }

    fn flush_events(&mut self) {
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            let line = format_event(&self.game, &event);
            self.push_event_line(line);
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn card_label(game: &Game, id: &str) -> String {
    game.catalog()
        .find_by_id(id)
        .map(|card| format!("{} ({} {})", card.name, card.team, card.year))
        .unwrap_or_else(|| id.to_string())
}

pub fn format_event(game: &Game, event: &Event) -> String {
    match event {
        Event::DrawStarted { session, role, .. } => format!("{session} draw {role}"),
        Event::RevealStageEntered {
            session,
            stage,
            at_ms,
        } => format!("{session} reveal {} @{at_ms}ms", stage.label()),
        Event::RevealSkipped { session, from } => {
            format!("{session} reveal skipped from {}", from.label())
        }
        Event::RevealCompleted {
            session,
            role,
            card_id,
        } => format!("{session} {role}: {}", card_label(game, card_id)),
        Event::FullRosterStarted {
            session,
            team,
            year,
        } => format!("{session} full roster {team} {year}"),
        Event::FullRosterStageEntered {
            session,
            stage,
            at_ms,
        } => format!("{session} full roster {} @{at_ms}ms", stage.label()),
        Event::FullRosterSkipped { session, from } => {
            format!("{session} full roster skipped from {}", from.label())
        }
        Event::FullRosterCompleted { session, upgraded } => {
            format!("{session} upgraded {} cards", upgraded.len())
        }
        Event::GameReset { abandoned_card } => match abandoned_card {
            Some(id) => format!("reset (discarded {})", card_label(game, id)),
            None => "reset".to_string(),
        },
        Event::UpgradesCleared { count } => format!("cleared {count} upgrades"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamroster_core::{FullRosterStage, RevealStage};
    use std::path::PathBuf;

    fn assets() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
    }

    fn app() -> App {
        App::bootstrap(&assets(), 7).expect("bootstrap")
    }

    fn fill(app: &mut App) {
        for role in Role::ALL {
            app.draw(role);
            app.skip();
        }
    }

    #[test]
    fn draw_then_ticks_commit_the_card() {
        let mut app = app();
        app.draw(Role::Top);
        assert!(app.game.reveal().is_some());
        app.on_tick(RevealStage::total_ms());
        assert!(app.game.reveal().is_none());
        assert!(app.game.roster().slot(Role::Top).is_some());
        assert!(app
            .event_log
            .iter()
            .any(|line| line.contains("reveal done")));
    }

    #[test]
    fn draw_keys_are_ignored_during_a_reveal() {
        let mut app = app();
        app.draw(Role::Mid);
        let session = app.game.reveal().map(|reveal| reveal.session());
        app.draw(Role::Support);
        assert_eq!(app.game.reveal().map(|reveal| reveal.session()), session);
        assert!(app.game.roster().revealing().is_some());
    }

    #[test]
    fn reset_waits_for_the_overlay() {
        let mut app = app();
        app.draw(Role::Jungle);
        app.reset();
        assert!(app.game.reveal().is_some());
        app.skip();
        app.reset();
        assert_eq!(app.game.roster().filled_count(), 0);
    }

    #[test]
    fn full_roster_needs_every_slot() {
        let mut app = app();
        app.play_full_roster();
        assert!(app.status_line.starts_with("error:"));
        fill(&mut app);
        app.play_full_roster();
        assert!(app.game.effect().is_some());
        app.on_tick(app.game.now_ms() + FullRosterStage::total_ms());
        assert_eq!(app.game.roster().upgraded_ids().len(), 5);
        app.clear_upgrades();
        assert!(app.game.roster().upgraded_ids().is_empty());
    }

    #[test]
    fn showcases_cycle_in_order() {
        let mut app = app();
        app.play_next_showcase();
        let first = app.game.effect().map(|effect| effect.team().to_string());
        assert_eq!(first.as_deref(), Some("T1"));
        app.skip();
        app.play_next_showcase();
        assert_eq!(app.game.effect().map(|effect| effect.team()), Some("DWG"));
    }

    #[test]
    fn clicking_an_empty_slot_draws_it() {
        let mut app = app();
        app.on_resize(120, 30);
        let size = view::roster_card_size(app.viewport);
        let (role, slot) = view::roster_slots(app.screen, size)[1];
        assert_eq!(role, Role::Jungle);
        app.click(slot.x + 1, slot.y + 1);
        assert_eq!(
            app.game.roster().revealing().map(|pending| pending.role),
            Some(Role::Jungle)
        );
        app.click(0, 0);
        assert!(app.game.reveal().is_none());
        assert!(app.game.roster().slot(Role::Jungle).is_some());
        app.click(slot.x + 1, slot.y + 1);
        assert!(app.game.reveal().is_none());
    }

    #[test]
    fn hint_follows_the_game_state() {
        let mut app = app();
        assert!(app.next_hint().starts_with("draw: a Top"));
        app.draw(Role::Top);
        assert_eq!(app.next_hint(), "space / click to skip");
        app.skip();
        assert!(!app.next_hint().contains("a Top"));
    }
}
