//! Stat names that effects and actions refer to.

use super::attributes::Attribute;
use super::derived::DerivedStat;

/// A stat an effect can shift: a base attribute or a derived stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Stat {
    Attribute(Attribute),
    Derived(DerivedStat),
}

impl core::fmt::Display for Stat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Attribute(attribute) => write!(f, "{attribute}"),
            Self::Derived(stat) => write!(f, "{stat}"),
        }
    }
}

impl core::str::FromStr for Stat {
    type Err = UnknownStat;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Ok(attribute) = name.parse::<Attribute>() {
            return Ok(Self::Attribute(attribute));
        }
        name.parse::<DerivedStat>()
            .map(Self::Derived)
            .map_err(|_| UnknownStat(name.to_owned()))
    }
}

impl TryFrom<String> for Stat {
    type Error = UnknownStat;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Stat> for String {
    fn from(stat: Stat) -> Self {
        stat.to_string()
    }
}

/// What an action's buff/debuff column points at.
///
/// `HP` is handled specially: it is never a stored stat delta but either an
/// immediate, per-second or on-expiry HP change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum EffectTarget {
    Hp,
    Stat(Stat),
}

impl EffectTarget {
    pub const HP_NAME: &'static str = "HP";
}

impl core::fmt::Display for EffectTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Hp => f.write_str(Self::HP_NAME),
            Self::Stat(stat) => write!(f, "{stat}"),
        }
    }
}

impl core::str::FromStr for EffectTarget {
    type Err = UnknownStat;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name == Self::HP_NAME {
            return Ok(Self::Hp);
        }
        name.parse().map(Self::Stat)
    }
}

impl TryFrom<String> for EffectTarget {
    type Error = UnknownStat;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<EffectTarget> for String {
    fn from(target: EffectTarget) -> Self {
        target.to_string()
    }
}

/// Raised when a data file names a stat outside the recognized set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized stat name `{0}`")]
pub struct UnknownStat(pub String);
