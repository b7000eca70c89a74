//! Data Dragon static data, used to turn numeric champion ids into names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `cdn/{version}/data/{locale}/champion.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionListDto {
    #[serde(default)]
    pub version: String,
    /// Keyed by the champion's string id (e.g. `"MonkeyKing"`).
    pub data: HashMap<String, ChampionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionDto {
    pub id: String,
    /// Numeric champion id, as a string.
    pub key: String,
    /// Display name (e.g. `"Wukong"`).
    pub name: String,
}

/// Lookup table from numeric champion id to display name.
///
/// Unknown ids fall back to `Champion #<id>` so a stale or missing catalog
/// never blocks a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChampionCatalog {
    names: HashMap<i64, String>,
}

impl ChampionCatalog {
    /// Build a catalog from a Data Dragon champion list.
    ///
    /// Entries whose `key` is not numeric are skipped.
    pub fn from_list(list: ChampionListDto) -> Self {
        let names = list
            .data
            .into_values()
            .filter_map(|c| c.key.parse::<i64>().ok().map(|key| (key, c.name)))
            .collect();
        Self { names }
    }

    pub fn name(&self, champion_id: i64) -> String {
        match self.names.get(&champion_id) {
            Some(name) => name.clone(),
            None => format!("Champion #{champion_id}"),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
