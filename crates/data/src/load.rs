use crate::schema::{ShowcaseRoster, TeamColorTable};
use anyhow::{bail, Context};
use dreamroster_core::{Card, Catalog, GameConfig, Region, Role, TeamPalette};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const PLAYERS_DIR: &str = "players";
const TEAM_COLORS_FILE: &str = "team_colors.json";
const SHOWCASE_FILE: &str = "showcase_rosters.json";
const CONFIG_FILE: &str = "config.json";

/// Everything read from the assets directory at startup.
#[derive(Debug, Clone)]
pub struct GameData {
    pub config: GameConfig,
    pub catalog: Catalog,
    pub palette: TeamPalette,
    pub showcases: Vec<ShowcaseRoster>,
}

pub fn load_game_data(dir: &Path) -> anyhow::Result<GameData> {
    let config = load_game_config(dir)?;
    let catalog = load_catalog(dir)?;
    let palette = load_team_palette(dir, &config)?;
    let showcases = load_showcase_rosters(dir)?;
    Ok(GameData {
        config,
        catalog,
        palette,
        showcases,
    })
}

/// `config.json` is optional; every field has a default.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(GameConfig::default());
    }
    load_json(path)
}

/// Reads `players/{lck,lpl,lec,lcs}.json` in that order.
pub fn load_catalog(dir: &Path) -> anyhow::Result<Catalog> {
    let mut cards = Vec::new();
    for region in Region::ALL {
        let path = dir
            .join(PLAYERS_DIR)
            .join(format!("{}.json", region.file_stem()));
        let league: Vec<Card> = load_json(&path)?;
        for card in &league {
            if card.region != region {
                bail!(
                    "card {} in {} is tagged {}",
                    card.id,
                    path.display(),
                    card.region
                );
            }
        }
        debug!(region = %region, count = league.len(), "league loaded");
        cards.extend(league);
    }
    let catalog = build_catalog(cards)?;
    info!(count = catalog.cards().len(), "catalog loaded");
    Ok(catalog)
}

/// Ids must be unique and every role needs at least one card.
pub fn build_catalog(cards: Vec<Card>) -> anyhow::Result<Catalog> {
    let mut seen = HashSet::new();
    for card in &cards {
        if !seen.insert(card.id.as_str()) {
            bail!("duplicate card id {}", card.id);
        }
    }
    let catalog = Catalog::new(cards);
    if let Some(role) = catalog.roles_missing().first() {
        bail!("catalog has no cards for role {role}");
    }
    Ok(catalog)
}

pub fn load_team_palette(dir: &Path, config: &GameConfig) -> anyhow::Result<TeamPalette> {
    let table: TeamColorTable = load_json(dir.join(TEAM_COLORS_FILE))?;
    let palette = TeamPalette::new(table.into_iter().collect())
        .with_fallbacks(config.default_team_color, config.champion_fallback_color);
    debug!(teams = palette.len(), "team colors loaded");
    Ok(palette)
}

pub fn load_showcase_rosters(dir: &Path) -> anyhow::Result<Vec<ShowcaseRoster>> {
    let path = dir.join(SHOWCASE_FILE);
    let rosters: Vec<ShowcaseRoster> = load_json(&path)?;
    for roster in &rosters {
        validate_showcase(roster).with_context(|| format!("in {}", path.display()))?;
    }
    Ok(rosters)
}

pub fn validate_showcase(roster: &ShowcaseRoster) -> anyhow::Result<()> {
    if roster.cards.len() != Role::ALL.len() {
        bail!(
            "showcase '{}' has {} cards, expected {}",
            roster.name,
            roster.cards.len(),
            Role::ALL.len()
        );
    }
    for role in Role::ALL {
        let count = roster.cards.iter().filter(|card| card.role == role).count();
        if count != 1 {
            bail!("showcase '{}' has {count} {role} cards", roster.name);
        }
    }
    Ok(())
}

pub fn find_showcase<'a>(rosters: &'a [ShowcaseRoster], name: &str) -> Option<&'a ShowcaseRoster> {
    let wanted = name.trim();
    rosters
        .iter()
        .find(|roster| roster.name.eq_ignore_ascii_case(wanted))
}

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, role: Role) -> Card {
        Card {
            id: id.to_string(),
            name: id.to_string(),
            team: "T1".to_string(),
            region: Region::Lck,
            role,
            year: "2024".to_string(),
            image_ref: None,
        }
    }

    fn full_set() -> Vec<Card> {
        Role::ALL
            .iter()
            .enumerate()
            .map(|(idx, role)| card(&format!("p{idx}"), *role))
            .collect()
    }

    #[test]
    fn accepts_one_card_per_role() {
        let catalog = build_catalog(full_set()).expect("catalog");
        assert_eq!(catalog.cards().len(), Role::ALL.len());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut cards = full_set();
        cards.push(card("p0", Role::Top));
        let err = build_catalog(cards).unwrap_err();
        assert!(err.to_string().contains("duplicate card id p0"));
    }

    #[test]
    fn rejects_a_missing_role() {
        let mut cards = full_set();
        cards.retain(|card| card.role != Role::Support);
        let err = build_catalog(cards).unwrap_err();
        assert!(err.to_string().contains("Support"));
    }

    #[test]
    fn showcase_needs_every_role_once() {
        let mut roster = ShowcaseRoster {
            name: "T1 2024".to_string(),
            cards: full_set(),
        };
        assert!(validate_showcase(&roster).is_ok());
        roster.cards[4] = card("p9", Role::Mid);
        assert!(validate_showcase(&roster).is_err());
    }

    #[test]
    fn finds_showcase_by_name_ignoring_case() {
        let rosters = vec![ShowcaseRoster {
            name: "G2 2019".to_string(),
            cards: full_set(),
        }];
        assert!(find_showcase(&rosters, " g2 2019").is_some());
        assert!(find_showcase(&rosters, "G2 2020").is_none());
    }
}
