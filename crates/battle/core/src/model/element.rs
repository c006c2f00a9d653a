/// Elemental affinity of a character or skill.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Element {
    Fire,
    Water,
    Grass,
    Light,
    Dark,
    #[default]
    Neutral,
}

/// Rarity tier of a character template. Purely descriptive for the engine.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    #[default]
    #[strum(serialize = "N")]
    #[cfg_attr(feature = "serde", serde(rename = "N"))]
    N,
    #[strum(serialize = "R")]
    #[cfg_attr(feature = "serde", serde(rename = "R"))]
    R,
    #[strum(serialize = "SR")]
    #[cfg_attr(feature = "serde", serde(rename = "SR"))]
    Sr,
    #[strum(serialize = "SSR")]
    #[cfg_attr(feature = "serde", serde(rename = "SSR"))]
    Ssr,
    #[strum(serialize = "UR")]
    #[cfg_attr(feature = "serde", serde(rename = "UR"))]
    Ur,
    #[strum(serialize = "LR")]
    #[cfg_attr(feature = "serde", serde(rename = "LR"))]
    Lr,
    #[strum(serialize = "MYTHIC")]
    #[cfg_attr(feature = "serde", serde(rename = "MYTHIC"))]
    Mythic,
}
