//! Section-to-placeholder mapping

use crate::enhance::EnhancedSections;
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

/// Mapping from placeholder token to the literal text that replaces it.
pub type PlaceholderMap = IndexMap<String, String>;

/// The explicit template contract: which placeholder token each known
/// section name fills. Deserializable so it can live in the config file and
/// be versioned alongside the template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceholderTable {
    entries: IndexMap<String, String>,
}

impl PlaceholderTable {
    pub fn new(entries: IndexMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn token_for(&self, section: &str) -> Option<&str> {
        self.entries.get(section).map(String::as_str)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PlaceholderTable {
    fn default() -> Self {
        let mut entries = IndexMap::new();
        for (section, token) in [
            ("Name", "{{NAME}}"),
            ("Summary", "{{SUMMARY}}"),
            ("Experience", "{{EXPERIENCE}}"),
            ("Education", "{{EDUCATION}}"),
            ("Skills", "{{SKILLS}}"),
            ("Certifications", "{{CERTIFICATIONS}}"),
        ] {
            entries.insert(section.to_string(), token.to_string());
        }
        Self { entries }
    }
}

/// Derive the placeholder map from the enhanced sections. Pure and
/// deterministic: the same sections and table always produce the same map.
/// Sections the table does not know are dropped with a warning.
pub fn build_placeholder_map(
    sections: &EnhancedSections,
    table: &PlaceholderTable,
) -> PlaceholderMap {
    let mut map = PlaceholderMap::new();

    for (section, content) in sections {
        match table.token_for(section) {
            Some(token) => {
                map.insert(token.to_string(), content.clone());
            }
            None => {
                warn!(
                    "Model returned unknown section '{}', not in the placeholder table; dropping it",
                    section
                );
            }
        }
    }

    map
}
