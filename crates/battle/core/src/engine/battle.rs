use std::sync::Arc;

use crate::config::BattleConfig;
use crate::error::ValidationError;
use crate::model::Character;
use crate::state::Side;

/// Caller-supplied match identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for MatchId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Validated, immutable description of a match.
///
/// Holds shared character templates and a private copy of the config taken
/// at creation.
#[derive(Clone, Debug)]
pub struct BattleMatch {
    id: MatchId,
    party_a: Vec<Arc<Character>>,
    party_b: Vec<Arc<Character>>,
    config: BattleConfig,
    seed: u64,
}

impl BattleMatch {
    pub fn id(&self) -> &MatchId {
        &self.id
    }

    pub fn party(&self, side: Side) -> &[Arc<Character>] {
        match side {
            Side::A => &self.party_a,
            Side::B => &self.party_b,
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Validates inputs and builds a match. No battle state exists until
/// [`super::simulate`] runs it.
///
/// `config` defaults to [`BattleConfig::default`] and is copied, so later
/// changes to the caller's value never reach this match.
pub fn create_match(
    party_a: Vec<Arc<Character>>,
    party_b: Vec<Arc<Character>>,
    match_id: impl Into<MatchId>,
    config: Option<&BattleConfig>,
    seed: u64,
) -> Result<BattleMatch, ValidationError> {
    let id = match_id.into();
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::EmptyMatchId);
    }

    let config = config.cloned().unwrap_or_default();
    config.validate()?;

    for (side, party) in [(Side::A, &party_a), (Side::B, &party_b)] {
        if party.is_empty() {
            return Err(ValidationError::EmptyParty { side });
        }
        if party.len() > config.max_party_size {
            return Err(ValidationError::PartyTooLarge {
                side,
                size: party.len(),
                max: config.max_party_size,
            });
        }
        for character in party.iter() {
            character.validate()?;
        }
    }

    Ok(BattleMatch {
        id,
        party_a,
        party_b,
        config,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CharacterId, CharacterStats, Element};

    fn fighter(id: u32) -> Arc<Character> {
        Arc::new(Character::new(
            CharacterId(id),
            format!("Fighter {id}"),
            Element::Neutral,
            CharacterStats::new(100, 20, 10, 10, 10, 10),
        ))
    }

    #[test]
    fn rejects_empty_parties_and_ids() {
        assert_eq!(
            create_match(vec![], vec![fighter(2)], "m", None, 1).err(),
            Some(ValidationError::EmptyParty { side: Side::A })
        );
        assert_eq!(
            create_match(vec![fighter(1)], vec![], "m", None, 1).err(),
            Some(ValidationError::EmptyParty { side: Side::B })
        );
        assert_eq!(
            create_match(vec![fighter(1)], vec![fighter(2)], " ", None, 1).err(),
            Some(ValidationError::EmptyMatchId)
        );
    }

    #[test]
    fn rejects_oversized_party() {
        let party: Vec<_> = (0..6).map(fighter).collect();
        let err = create_match(party, vec![fighter(9)], "m", None, 1).err();
        assert_eq!(
            err,
            Some(ValidationError::PartyTooLarge {
                side: Side::A,
                size: 6,
                max: 5
            })
        );
    }

    #[test]
    fn config_is_snapshotted() {
        let mut config = BattleConfig::new().with_max_rounds(7);
        let battle = create_match(vec![fighter(1)], vec![fighter(2)], "m", Some(&config), 9)
            .expect("valid match");
        config.max_rounds = 99;
        assert_eq!(battle.config().max_rounds, 7);
        assert_eq!(battle.seed(), 9);
        assert_eq!(battle.id().as_str(), "m");
    }
}
