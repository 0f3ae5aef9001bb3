use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    #[serde(rename = "ADC")]
    Adc,
    Support,
}

impl Role {
    /// Canonical roster order, also used for layout.
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];

    pub fn index(self) -> usize {
        match self {
            Role::Top => 0,
            Role::Jungle => 1,
            Role::Mid => 2,
            Role::Adc => 3,
            Role::Support => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Adc => "ADC",
            Role::Support => "Support",
        }
    }

    pub fn draw_key(self) -> char {
        match self {
            Role::Top => 'a',
            Role::Jungle => 's',
            Role::Mid => 'd',
            Role::Adc => 'f',
            Role::Support => 'g',
        }
    }

    pub fn from_draw_key(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Role::ALL.into_iter().find(|role| role.draw_key() == key)
    }

    pub fn parse(value: &str) -> Option<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    #[serde(rename = "LCK")]
    Lck,
    #[serde(rename = "LPL")]
    Lpl,
    #[serde(rename = "LEC")]
    Lec,
    #[serde(rename = "LCS")]
    Lcs,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Lck, Region::Lpl, Region::Lec, Region::Lcs];

    pub fn code(self) -> &'static str {
        match self {
            Region::Lck => "LCK",
            Region::Lpl => "LPL",
            Region::Lec => "LEC",
            Region::Lcs => "LCS",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Region::Lck => "Korea",
            Region::Lpl => "China",
            Region::Lec => "Europe",
            Region::Lcs => "North America",
        }
    }

    /// Lowercase stem used for per-league data files.
    pub fn file_stem(self) -> &'static str {
        match self {
            Region::Lck => "lck",
            Region::Lpl => "lpl",
            Region::Lec => "lec",
            Region::Lcs => "lcs",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub team: String,
    pub region: Region,
    pub role: Role,
    pub year: String,
    #[serde(default, rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl Card {
    /// Last two digits of the season, e.g. `"24"` for `"2024"`.
    pub fn short_year(&self) -> &str {
        short_year(&self.year)
    }

    /// Letter shown when no portrait resolves.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|ch| ch.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Last two digits of a season string; shorter strings come back unchanged.
pub fn short_year(year: &str) -> &str {
    let len = year.len();
    if len >= 2 && year.is_char_boundary(len - 2) {
        &year[len - 2..]
    } else {
        year
    }
}
