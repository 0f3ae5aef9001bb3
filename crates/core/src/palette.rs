use crate::Role;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color '{0}'")]
pub struct ColorParseError(pub String);

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ColorParseError(value.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Rgb::hex)
            .map_err(|_| ColorParseError(value.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

pub fn role_color(role: Role) -> Rgb {
    match role {
        Role::Top => Rgb::hex(0xEF4444),
        Role::Jungle => Rgb::hex(0x22C55E),
        Role::Mid => Rgb::hex(0xA855F7),
        Role::Adc => Rgb::hex(0xEAB308),
        Role::Support => Rgb::hex(0x3B82F6),
    }
}

/// Gradient stops of the "upgraded" holographic treatment.
pub const HOLOGRAPHIC: [Rgb; 3] = [Rgb::hex(0x02FEFF), Rgb::hex(0xFF88FE), Rgb::hex(0x0777FD)];

pub const DEFAULT_TEAM_COLOR: Rgb = Rgb::hex(0x666666);
pub const CHAMPION_FALLBACK_COLOR: Rgb = Rgb::hex(0xE2012D);

#[derive(Debug, Clone)]
pub struct TeamPalette {
    colors: HashMap<String, Rgb>,
    fallback: Rgb,
    champion_fallback: Rgb,
}

impl Default for TeamPalette {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl TeamPalette {
    pub fn new(colors: HashMap<String, Rgb>) -> Self {
        Self {
            colors,
            fallback: DEFAULT_TEAM_COLOR,
            champion_fallback: CHAMPION_FALLBACK_COLOR,
        }
    }

    pub fn with_fallbacks(mut self, fallback: Rgb, champion_fallback: Rgb) -> Self {
        self.fallback = fallback;
        self.champion_fallback = champion_fallback;
        self
    }

    pub fn get(&self, team: &str) -> Option<Rgb> {
        self.colors.get(team).copied()
    }

    pub fn team_color(&self, team: &str) -> Rgb {
        self.get(team).unwrap_or(self.fallback)
    }

    pub fn champion_color(&self, team: &str) -> Rgb {
        self.get(team).unwrap_or(self.champion_fallback)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
