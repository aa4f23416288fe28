//! Deck template handling: placeholder mapping and population

pub mod mapping;
pub mod populate;

pub use mapping::{build_placeholder_map, PlaceholderMap, PlaceholderTable};
pub use populate::populate_deck;
