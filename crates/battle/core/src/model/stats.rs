//! Base character statistics and the basis-point probability type.

/// Base stats of a character as declared in its template.
///
/// Effective values during a match are derived from these by applying active
/// buff and debuff modifiers (see [`crate::state::Vitals::effective_stat`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
    pub elem_atk: u32,
    pub elem_def: u32,
}

impl CharacterStats {
    pub const fn new(hp: u32, atk: u32, def: u32, spd: u32, elem_atk: u32, elem_def: u32) -> Self {
        Self {
            hp,
            atk,
            def,
            spd,
            elem_atk,
            elem_def,
        }
    }

    /// Base value of a modifiable stat.
    pub const fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spd => self.spd,
            Stat::ElemAtk => self.elem_atk,
            Stat::ElemDef => self.elem_def,
        }
    }
}

/// Stats that buffs and debuffs can scale. Max HP is fixed for a match.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Stat {
    Atk,
    Def,
    Spd,
    ElemAtk,
    ElemDef,
}

/// Probability in basis points: 0 = never, 10000 = always.
///
/// Constructors clamp to the valid range. Deserialized values are taken as-is
/// and checked by [`Chance::is_valid`] during character validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Chance(u16);

impl Chance {
    pub const SCALE: u16 = 10_000;
    pub const ZERO: Self = Self(0);
    pub const CERTAIN: Self = Self(Self::SCALE);

    pub const fn from_bps(bps: u16) -> Self {
        if bps > Self::SCALE {
            Self(Self::SCALE)
        } else {
            Self(bps)
        }
    }

    /// Whole percent, `percent(95)` is 9500 bps.
    pub const fn percent(percent: u16) -> Self {
        let bps = percent as u32 * 100;
        if bps > Self::SCALE as u32 {
            Self::CERTAIN
        } else {
            Self(bps as u16)
        }
    }

    /// Out-of-range values, as a content file could carry them.
    #[cfg(test)]
    pub(crate) const fn unchecked(bps: u16) -> Self {
        Self(bps)
    }

    pub const fn bps(self) -> u16 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 <= Self::SCALE
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self::from_bps(self.0.saturating_add(other.0))
    }

    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub const fn min(self, other: Self) -> Self {
        if self.0 < other.0 { self } else { other }
    }

    /// True when a uniform roll in `0..10000` lands under this chance.
    pub const fn succeeds(self, roll: u16) -> bool {
        roll < self.0
    }
}

impl core::fmt::Display for Chance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}
