//! Image fallback chains as pure functions: the caller asks for attempt `n`,
//! tries to load it, and asks for `n + 1` on failure. When the chain runs
//! out, the subject's placeholder letter is shown instead.

use crate::{short_year, Card, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSubject<'a> {
    PlayerPhoto(&'a Card),
    TeamLogo(&'a str),
    LeagueLogo(Region),
    ChampionshipPhoto { team: &'a str, year: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAsset {
    Found(String),
    Placeholder(char),
}

impl ResolvedAsset {
    pub fn path(&self) -> Option<&str> {
        match self {
            ResolvedAsset::Found(path) => Some(path),
            ResolvedAsset::Placeholder(_) => None,
        }
    }
}

pub fn league_logo(region: Region) -> &'static str {
    match region {
        Region::Lck => "lck.svg",
        Region::Lpl => "lpl.png",
        Region::Lec => "lec.png",
        Region::Lcs => "lcs.svg",
    }
}

/// Relative asset path for `attempt`, or `None` once the chain is exhausted.
pub fn asset_candidate(subject: AssetSubject<'_>, attempt: usize) -> Option<String> {
    match subject {
        AssetSubject::PlayerPhoto(card) => player_candidate(card, attempt),
        AssetSubject::TeamLogo(team) => team_candidate(team, attempt),
        AssetSubject::LeagueLogo(region) => {
            (attempt == 0).then(|| league_logo(region).to_string())
        }
        AssetSubject::ChampionshipPhoto { team, year } => match attempt {
            0 => Some(format!(
                "championships/{}{}.png",
                team.to_lowercase(),
                short_year(year)
            )),
            n => team_candidate(team, n - 1),
        },
    }
}

pub fn asset_candidates(subject: AssetSubject<'_>) -> Vec<String> {
    (0..)
        .map_while(|attempt| asset_candidate(subject, attempt))
        .collect()
}

pub fn placeholder(subject: AssetSubject<'_>) -> char {
    let first = |text: &str| {
        text.chars()
            .next()
            .map(|ch| ch.to_ascii_uppercase())
            .unwrap_or('?')
    };
    match subject {
        AssetSubject::PlayerPhoto(card) => card.initial(),
        AssetSubject::TeamLogo(team) => first(team),
        AssetSubject::LeagueLogo(region) => first(region.code()),
        AssetSubject::ChampionshipPhoto { team, .. } => first(team),
    }
}

/// Walks the chain and returns the first candidate `exists` accepts.
pub fn resolve_asset(subject: AssetSubject<'_>, exists: impl Fn(&str) -> bool) -> ResolvedAsset {
    asset_candidates(subject)
        .into_iter()
        .find(|path| exists(path))
        .map(ResolvedAsset::Found)
        .unwrap_or_else(|| ResolvedAsset::Placeholder(placeholder(subject)))
}

fn player_candidate(card: &Card, attempt: usize) -> Option<String> {
    let explicit = card
        .image_ref
        .as_deref()
        .map(|path| path.trim_start_matches('/').to_string());
    let name = card.name.to_lowercase();
    let generated = [
        format!("players/{}{}.png", name, card.short_year()),
        format!("players/{name}.png"),
    ];
    explicit
        .into_iter()
        .chain(generated)
        .filter(|path| !path.is_empty())
        .nth(attempt)
}

fn team_candidate(team: &str, attempt: usize) -> Option<String> {
    let stem = team.to_lowercase();
    match attempt {
        0 => Some(format!("teams/{stem}.png")),
        1 => Some(format!("teams/{stem}.svg")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::card;
    use crate::Role;

    #[test]
    fn player_chain_tries_explicit_then_year_then_name() {
        let mut faker = card("faker-t1-2024", "T1", Role::Mid);
        faker.name = "Faker".to_string();
        faker.image_ref = Some("/players/faker_custom.png".to_string());
        assert_eq!(
            asset_candidates(AssetSubject::PlayerPhoto(&faker)),
            vec![
                "players/faker_custom.png",
                "players/faker24.png",
                "players/faker.png"
            ]
        );
        faker.image_ref = None;
        assert_eq!(
            asset_candidate(AssetSubject::PlayerPhoto(&faker), 0).as_deref(),
            Some("players/faker24.png")
        );
        assert_eq!(asset_candidate(AssetSubject::PlayerPhoto(&faker), 2), None);
    }

    #[test]
    fn championship_falls_back_to_team_logo() {
        let subject = AssetSubject::ChampionshipPhoto {
            team: "DWG",
            year: "2020",
        };
        assert_eq!(
            asset_candidates(subject),
            vec![
                "championships/dwg20.png",
                "teams/dwg.png",
                "teams/dwg.svg"
            ]
        );
    }

    #[test]
    fn unresolved_assets_degrade_to_a_placeholder() {
        let keria = card("keria-t1-2024", "T1", Role::Support);
        assert_eq!(
            resolve_asset(AssetSubject::PlayerPhoto(&keria), |_| false),
            ResolvedAsset::Placeholder('K')
        );
        assert_eq!(
            resolve_asset(AssetSubject::TeamLogo("T1"), |path| path.ends_with(".svg")),
            ResolvedAsset::Found("teams/t1.svg".to_string())
        );
        assert_eq!(
            resolve_asset(AssetSubject::LeagueLogo(Region::Lec), |_| true).path(),
            Some("lec.png")
        );
    }

    #[test]
    fn empty_names_use_a_question_mark() {
        let mut nameless = card("x", "T1", Role::Top);
        nameless.name = String::new();
        assert_eq!(placeholder(AssetSubject::PlayerPhoto(&nameless)), '?');
    }
}
