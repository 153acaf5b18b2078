//! Source → target country tag mapping.

use crate::state::Tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps source-game country tags to converted target tags.
///
/// Source countries that were not converted (rebels, dead tags) have no entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryMapping {
    source_to_target: BTreeMap<String, Tag>,
}

impl CountryMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<Tag>) {
        self.source_to_target.insert(source.into(), target.into());
    }

    /// Target tag for a source tag, if the source country was converted.
    pub fn target_tag(&self, source: &str) -> Option<&Tag> {
        self.source_to_target.get(source)
    }

    pub fn len(&self) -> usize {
        self.source_to_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_to_target.is_empty()
    }
}

impl<S: Into<String>, T: Into<Tag>> FromIterator<(S, T)> for CountryMapping {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (source, target) in iter {
            mapping.insert(source, target);
        }
        mapping
    }
}
