//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod assets;
pub mod cards;
pub mod catalog;
pub mod config;
pub mod events;
pub mod full_roster;
pub mod game;
pub mod layout;
pub mod palette;
pub mod reveal;
pub mod rng;
pub mod roster;
pub mod sequencer;
pub mod timer;

pub use assets::*;
pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use events::*;
pub use full_roster::*;
pub use game::*;
pub use layout::*;
pub use palette::*;
pub use reveal::*;
pub use rng::*;
pub use roster::*;
pub use sequencer::*;
pub use timer::*;
