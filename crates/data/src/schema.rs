use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use dreamroster_core::{Card, GameConfig, Region, Rgb, Role};

/// `team_colors.json`: team code to hex color.
pub type TeamColorTable = BTreeMap<String, Rgb>;

/// One preset roster from `showcase_rosters.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowcaseRoster {
    pub name: String,
    pub cards: Vec<Card>,
}
