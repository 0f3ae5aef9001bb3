use crate::{Rgb, ViewportClass, CHAMPION_FALLBACK_COLOR, DEFAULT_TEAM_COLOR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Terminals narrower than this many columns use the narrow layout.
    #[serde(default = "default_narrow_below_cols")]
    pub narrow_below_cols: u16,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_team_color")]
    pub default_team_color: Rgb,
    #[serde(default = "default_champion_color")]
    pub champion_fallback_color: Rgb,
}

fn default_narrow_below_cols() -> u16 {
    100
}

fn default_tick_ms() -> u64 {
    50
}

fn default_team_color() -> Rgb {
    DEFAULT_TEAM_COLOR
}

fn default_champion_color() -> Rgb {
    CHAMPION_FALLBACK_COLOR
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            narrow_below_cols: default_narrow_below_cols(),
            tick_ms: default_tick_ms(),
            default_team_color: default_team_color(),
            champion_fallback_color: default_champion_color(),
        }
    }
}

impl GameConfig {
    pub fn viewport_for(&self, width: u16) -> ViewportClass {
        ViewportClass::classify(width, self.narrow_below_cols)
    }
}
