//! Character roster loader.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use battle_core::{Character, CharacterId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub characters: Vec<Character>,
}

/// Validated character templates keyed by id.
///
/// Templates are handed out as `Arc`s so every match built from the roster
/// shares them.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: BTreeMap<CharacterId, Arc<Character>>,
}

impl Roster {
    /// Builds a roster, validating each template and rejecting duplicate ids.
    pub fn new(characters: Vec<Character>) -> LoadResult<Self> {
        let mut by_id = BTreeMap::new();
        for character in characters {
            character.validate()?;
            let id = character.id;
            if by_id.insert(id, Arc::new(character)).is_some() {
                anyhow::bail!("Duplicate character id {} in roster", id);
            }
        }
        Ok(Self { characters: by_id })
    }

    pub fn get(&self, id: CharacterId) -> Option<&Arc<Character>> {
        self.characters.get(&id)
    }

    /// Resolves a party in the given order.
    pub fn party(&self, ids: &[CharacterId]) -> LoadResult<Vec<Arc<Character>>> {
        ids.iter()
            .map(|id| {
                self.get(*id)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Unknown character id {} in party", id))
            })
            .collect()
    }

    /// Templates in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Character>> {
        self.characters.values()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Loader for character rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file containing a [`RosterFile`].
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid roster {}: {}", path.display(), e))
    }

    /// Parse and validate roster RON.
    pub fn parse(content: &str) -> LoadResult<Roster> {
        let file: RosterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        Roster::new(file.characters)
    }
}
