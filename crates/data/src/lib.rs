//! Data loading and validation for game content.

pub mod load;
pub mod resolver;
pub mod schema;

pub use load::*;
pub use resolver::*;
pub use schema::*;
