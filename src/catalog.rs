//! Two-way lookup over the fetched source catalog.
//!
//! Built once after API key validation and immutable afterwards. Display
//! names are normalized (trimmed, lowercased) so users can type either the
//! raw id (`bbc-news`) or the name in any casing (`"BBC News"`, `"bbc news"`)
//! and land on the same id.

use crate::models::Source;
use crate::utils::normalize;
use std::collections::HashMap;

/// Bidirectional name/id mapping, modeled as two maps kept in sync.
#[derive(Debug, Default)]
pub struct SourceIndex {
    /// normalized display name -> source id
    id_by_name: HashMap<String, String>,
    /// source id -> display name (as published by the API)
    name_by_id: HashMap<String, String>,
}

impl SourceIndex {
    /// Build the index from a fetched catalog. Names and ids are each
    /// unique within the catalog per the API's own data; later duplicates
    /// would simply overwrite, which is not validated locally.
    pub fn from_sources(sources: &[Source]) -> Self {
        let mut index = Self::default();
        for source in sources {
            index
                .id_by_name
                .insert(normalize(&source.name), source.id.clone());
            index
                .name_by_id
                .insert(source.id.clone(), source.name.clone());
        }
        index
    }

    /// Resolve user input (already normalized) to a source id, accepting
    /// either a display name or a raw id.
    pub fn resolve(&self, input: &str) -> Option<&str> {
        if let Some(id) = self.id_by_name.get(input) {
            Some(id.as_str())
        } else if let Some((id, _)) = self.name_by_id.get_key_value(input) {
            Some(id.as_str())
        } else {
            None
        }
    }

    /// Display name for a known source id.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.name_by_id.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.name_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_by_id.is_empty()
    }
}
