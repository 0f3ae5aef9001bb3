use anyhow::{anyhow, Context, Result};
use dreamroster_core::{
    CardSource, Event, EventBus, FullRosterStage, Game, ManualClock, Region, RevealStage,
    Role, Stage,
};
use dreamroster_data::{find_showcase, load_game_data, GameData};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Step used when playing an effect up to a `--skip-at` stage.
const STEP_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Draw {
        roles: Vec<Role>,
        skip: bool,
        full_roster: bool,
    },
    Showcase {
        name: String,
        skip_at: Option<FullRosterStage>,
    },
    Catalog,
    Cui,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn run(
    command: &Command,
    assets: &Path,
    seed: u64,
    output: OutputMode,
    out: &mut impl Write,
) -> Result<()> {
    let data = load_game_data(assets)
        .with_context(|| format!("load game data from {}", assets.display()))?;
    match command {
        Command::Draw {
            roles,
            skip,
            full_roster,
        } => run_draws(&data, seed, roles, *skip, *full_roster, output, out),
        Command::Showcase { name, skip_at } => run_showcase(&data, seed, name, *skip_at, output, out),
        Command::Catalog => print_catalog(&data, output, out),
        Command::Cui | Command::Help => Ok(()),
    }
}

/// Drives a headless game on a manual clock.
struct Session {
    game: Game,
    events: EventBus,
    clock: ManualClock,
}

impl Session {
    fn new(data: &GameData, seed: u64) -> Self {
        Self {
            game: Game::new(data.catalog.clone(), seed),
            events: EventBus::default(),
            clock: ManualClock::new(0),
        }
    }

    fn advance(&mut self, delta_ms: u64) {
        let now = self.clock.advance(delta_ms);
        self.game.advance_to(now, &mut self.events);
    }

    fn flush(&mut self, output: OutputMode, out: &mut impl Write) -> Result<()> {
        for event in self.events.drain() {
            write_event(&event, output, out)?;
        }
        Ok(())
    }
}

fn run_draws(
    data: &GameData,
    seed: u64,
    roles: &[Role],
    skip: bool,
    full_roster: bool,
    output: OutputMode,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = Session::new(data, seed);
    info!(seed, draws = roles.len(), "headless draw");
    for role in roles {
        session
            .game
            .draw_card(*role, &mut session.events)
            .with_context(|| format!("draw {role}"))?;
        if skip {
            session.game.skip(&mut session.events);
        } else {
            session.advance(RevealStage::total_ms());
        }
        session.flush(output, out)?;
    }
    if full_roster {
        session
            .game
            .start_full_roster(&mut session.events)
            .context("start full roster")?;
        if skip {
            session.game.skip(&mut session.events);
        } else {
            session.advance(FullRosterStage::total_ms());
        }
        session.flush(output, out)?;
    }
    if output == OutputMode::Text {
        writeln!(out, "roster:")?;
        for role in Role::ALL {
            let roster = session.game.roster();
            let line = match roster.slot(role) {
                Some(card) => format!(
                    "{}{} {} ({} {})",
                    card.name,
                    if roster.is_upgraded(&card.id) { " *" } else { "" },
                    card.region,
                    card.team,
                    card.year
                ),
                None => "-".to_string(),
            };
            writeln!(out, "  {:<8}{line}", role.name())?;
        }
    }
    Ok(())
}

fn run_showcase(
    data: &GameData,
    seed: u64,
    name: &str,
    skip_at: Option<FullRosterStage>,
    output: OutputMode,
    out: &mut impl Write,
) -> Result<()> {
    let roster = find_showcase(&data.showcases, name).ok_or_else(|| {
        let known: Vec<&str> = data.showcases.iter().map(|r| r.name.as_str()).collect();
        anyhow!("unknown showcase '{name}' (known: {})", known.join(", "))
    })?;
    let mut session = Session::new(data, seed);
    session
        .game
        .play_showcase(roster.cards.clone(), &mut session.events)
        .with_context(|| format!("play showcase {}", roster.name))?;
    match skip_at {
        Some(target) => {
            while session
                .game
                .effect()
                .is_some_and(|effect| effect.stage().position() < target.position())
            {
                session.advance(STEP_MS);
            }
            session.game.skip(&mut session.events);
        }
        None => session.advance(FullRosterStage::total_ms()),
    }
    session.flush(output, out)
}

fn print_catalog(data: &GameData, output: OutputMode, out: &mut impl Write) -> Result<()> {
    let catalog = &data.catalog;
    if output == OutputMode::Json {
        let regions: serde_json::Map<String, serde_json::Value> = Region::ALL
            .iter()
            .map(|region| {
                let counts: serde_json::Map<String, serde_json::Value> = Role::ALL
                    .iter()
                    .map(|role| (role.name().to_string(), json!(count(data, *region, *role))))
                    .collect();
                (region.code().to_string(), serde_json::Value::Object(counts))
            })
            .collect();
        let showcases: Vec<&str> = data.showcases.iter().map(|r| r.name.as_str()).collect();
        let summary = json!({
            "cards": catalog.count(),
            "regions": regions,
            "showcases": showcases,
        });
        writeln!(out, "{summary}")?;
        return Ok(());
    }
    writeln!(out, "{} cards", catalog.count())?;
    let header: Vec<String> = Role::ALL.iter().map(|role| format!("{:>8}", role.name())).collect();
    writeln!(out, "{:<6}{}", "", header.join(""))?;
    for region in Region::ALL {
        let cells: Vec<String> = Role::ALL
            .iter()
            .map(|role| format!("{:>8}", count(data, region, *role)))
            .collect();
        writeln!(out, "{:<6}{}", region.code(), cells.join(""))?;
    }
    writeln!(out, "showcases:")?;
    for roster in &data.showcases {
        writeln!(out, "  {}", roster.name)?;
    }
    Ok(())
}

fn count(data: &GameData, region: Region, role: Role) -> usize {
    data.catalog
        .list_by_region(region)
        .into_iter()
        .filter(|card| card.role == role)
        .count()
}

fn write_event(event: &Event, output: OutputMode, out: &mut impl Write) -> Result<()> {
    match output {
        OutputMode::Json => {
            let line = serde_json::to_string(event).context("encode event")?;
            writeln!(out, "{line}")?;
        }
        OutputMode::Text => writeln!(out, "{}", describe(event))?,
    }
    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::DrawStarted {
            session,
            role,
            card_id,
        } => format!("{session} draw {role} -> {card_id}"),
        Event::RevealStageEntered {
            session,
            stage,
            at_ms,
        } => format!("{session} [{at_ms:>6}ms] reveal {}", stage.label()),
        Event::RevealSkipped { session, from } => {
            format!("{session} reveal skipped at {}", from.label())
        }
        Event::RevealCompleted {
            session,
            role,
            card_id,
        } => format!("{session} {role} filled with {card_id}"),
        Event::FullRosterStarted {
            session,
            team,
            year,
        } => format!("{session} full roster {team} {year}"),
        Event::FullRosterStageEntered {
            session,
            stage,
            at_ms,
        } => format!("{session} [{at_ms:>6}ms] full roster {}", stage.label()),
        Event::FullRosterSkipped { session, from } => {
            format!("{session} full roster skipped at {}", from.label())
        }
        Event::FullRosterCompleted { session, upgraded } => {
            format!("{session} upgraded {}", upgraded.join(", "))
        }
        Event::GameReset { abandoned_card } => match abandoned_card {
            Some(id) => format!("reset, discarded {id}"),
            None => "reset".to_string(),
        },
        Event::UpgradesCleared { count } => format!("cleared {count} upgrades"),
    }
}
