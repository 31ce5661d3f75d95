//! Base attributes - Layer 1 of the stat system.
//!
//! Twenty-one named attributes describe a character. Templates carry base
//! values; equipment and active effects add to them to produce the
//! effective set that feeds derived stats.

use std::collections::BTreeMap;

use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// Closed set of character attributes, in canonical order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumCount,
    EnumIter,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Attribute {
    /// Stamina
    Sta,
    /// Strength
    Str,
    /// Agility
    Agi,
    /// Dexterity
    Dex,
    /// Hit (precision)
    Hit,
    /// Balance
    Bal,
    /// Weight
    Wgt,
    /// Height
    Hei,
    /// Intelligence
    Int,
    /// Willpower
    Wil,
    /// Fortitude
    For,
    /// Focus
    Foc,
    /// Psyche
    Psy,
    /// Arcana
    Arc,
    /// Blessing
    Bls,
    /// Mana
    Man,
    /// Alchemy
    Alc,
    /// Curse
    Cur,
    /// Corruption
    Cor,
    /// Summoning
    Sum,
    /// Hex
    Hex,
}

impl Attribute {
    /// Physical size/weight attributes may legitimately drop below 1.
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Wgt | Self::Hei)
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Dense attribute vector indexed by [`Attribute`].
///
/// Missing entries in data files default to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "BTreeMap<Attribute, i32>",
        into = "BTreeMap<Attribute, i32>"
    )
)]
pub struct AttributeSet {
    values: [i32; Attribute::COUNT],
}

impl AttributeSet {
    pub const fn zeroed() -> Self {
        Self {
            values: [0; Attribute::COUNT],
        }
    }

    /// Builds a set from `(attribute, value)` pairs; later pairs win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Attribute, i32)>) -> Self {
        let mut set = Self::zeroed();
        for (attribute, value) in pairs {
            set.set(attribute, value);
        }
        set
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.values[attribute.index()]
    }

    #[inline]
    pub fn set(&mut self, attribute: Attribute, value: i32) {
        self.values[attribute.index()] = value;
    }

    #[inline]
    pub fn add(&mut self, attribute: Attribute, delta: i32) {
        self.values[attribute.index()] += delta;
    }

    /// Raises every non-physical attribute to at least 1.
    pub fn clamp_minimums(&mut self) {
        for attribute in Attribute::iter().filter(|a| !a.is_physical()) {
            let value = &mut self.values[attribute.index()];
            if *value < 1 {
                *value = 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::iter().map(|attribute| (attribute, self.get(attribute)))
    }
}

impl From<BTreeMap<Attribute, i32>> for AttributeSet {
    fn from(map: BTreeMap<Attribute, i32>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<AttributeSet> for BTreeMap<Attribute, i32> {
    fn from(set: AttributeSet) -> Self {
        set.iter().collect()
    }
}
