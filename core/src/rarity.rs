//! Rarity tiers and holographic finishes.
//!
//! The derive order of `Rarity` IS the scarcity order. Fallback logic,
//! cumulative walks and "best pull" all depend on it, so variants are
//! never reordered.

use crate::error::{PackError, PackResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// All tiers, ascending.
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common    => "common",
            Self::Uncommon  => "uncommon",
            Self::Rare      => "rare",
            Self::Epic      => "epic",
            Self::Legendary => "legendary",
            Self::Mythic    => "mythic",
        }
    }

    /// Position in the scarcity order, 0 for common.
    pub fn tier(&self) -> usize {
        *self as usize
    }

    pub fn is_at_least(&self, other: Rarity) -> bool {
        *self >= other
    }

    /// Holo finishes this rarity may legally roll.
    pub fn legal_holo_variants(&self) -> &'static [HoloVariant] {
        use HoloVariant::*;
        match self {
            Self::Mythic    => &[None, Standard, Reverse, FullArt, Prismatic],
            Self::Legendary => &[None, Standard, Reverse, FullArt],
            _               => &[None, Standard, Reverse],
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = PackError;

    fn from_str(s: &str) -> PackResult<Self> {
        Rarity::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PackError::UnknownRarity { value: s.to_string() })
    }
}

/// Highest rarity in a set, `None` for an empty set.
pub fn highest<I>(rarities: I) -> Option<Rarity>
where
    I: IntoIterator<Item = Rarity>,
{
    rarities.into_iter().max()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoloVariant {
    None,
    Standard,
    Reverse,
    FullArt,
    Prismatic,
}

impl HoloVariant {
    pub const ALL: [HoloVariant; 5] = [
        HoloVariant::None,
        HoloVariant::Standard,
        HoloVariant::Reverse,
        HoloVariant::FullArt,
        HoloVariant::Prismatic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None      => "none",
            Self::Standard  => "standard",
            Self::Reverse   => "reverse",
            Self::FullArt   => "full_art",
            Self::Prismatic => "prismatic",
        }
    }

    pub fn is_holo(&self) -> bool {
        *self != Self::None
    }

    pub fn is_legal_for(&self, rarity: Rarity) -> bool {
        rarity.legal_holo_variants().contains(self)
    }
}

impl fmt::Display for HoloVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HoloVariant {
    type Err = PackError;

    fn from_str(s: &str) -> PackResult<Self> {
        HoloVariant::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PackError::config(format!("unknown holo variant '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_order_is_scarcity_order() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Legendary < Rarity::Mythic);
        assert_eq!(Rarity::Mythic.tier(), 5);
        assert!(Rarity::Epic.is_at_least(Rarity::Rare));
        assert!(!Rarity::Rare.is_at_least(Rarity::Epic));
    }

    #[test]
    fn highest_of_set() {
        let set = [Rarity::Rare, Rarity::Common, Rarity::Epic, Rarity::Uncommon];
        assert_eq!(highest(set), Some(Rarity::Epic));
        assert_eq!(highest(Vec::new()), None);
    }

    #[test]
    fn rarity_parses_case_insensitively() {
        assert_eq!("Legendary".parse::<Rarity>().unwrap(), Rarity::Legendary);
        assert!("ultra".parse::<Rarity>().is_err());
    }

    #[test]
    fn holo_legality_gates() {
        assert!(HoloVariant::Prismatic.is_legal_for(Rarity::Mythic));
        assert!(!HoloVariant::Prismatic.is_legal_for(Rarity::Legendary));
        assert!(HoloVariant::FullArt.is_legal_for(Rarity::Legendary));
        assert!(!HoloVariant::FullArt.is_legal_for(Rarity::Epic));
        for rarity in Rarity::ALL {
            assert!(HoloVariant::Reverse.is_legal_for(rarity));
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&HoloVariant::FullArt).unwrap();
        assert_eq!(json, "\"full_art\"");
        let r: Rarity = serde_json::from_str("\"mythic\"").unwrap();
        assert_eq!(r, Rarity::Mythic);
    }
}
