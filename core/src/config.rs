//! Pack configuration: slot rules, holo odds, design weights.
//!
//! Configs are validated eagerly by `PackConfig::validate()`. Nothing in
//! the draw path fills in missing values; named defaults live in the
//! constructors below (`standard()`, `premium()`, `HoloTable::default()`,
//! `DesignTable::default()`).

use crate::{
    catalogue::CardFilter,
    error::{PackError, PackResult},
    rarity::{HoloVariant, Rarity},
    types::{Category, DesignName, Series},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Allowed distance of a probability table's sum from 1.0.
pub const PROBABILITY_EPSILON: f64 = 1e-6;

/// Rule for one pack slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRule {
    Guaranteed(Rarity),
    /// Rarity → probability, walked in ascending rarity order.
    Weighted(BTreeMap<Rarity, f64>),
}

impl SlotRule {
    pub fn weighted<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Rarity, f64)>,
    {
        Self::Weighted(entries.into_iter().collect())
    }

    /// Probability that this slot resolves to `rarity`.
    pub fn probability_of(&self, rarity: Rarity) -> f64 {
        match self {
            Self::Guaranteed(r) => if *r == rarity { 1.0 } else { 0.0 },
            Self::Weighted(table) => table.get(&rarity).copied().unwrap_or(0.0).max(0.0),
        }
    }

    /// Rarities this slot can actually produce.
    pub fn reachable(&self) -> Vec<Rarity> {
        match self {
            Self::Guaranteed(r) => vec![*r],
            Self::Weighted(table) => table
                .iter()
                .filter(|(_, p)| **p > 0.0)
                .map(|(r, _)| *r)
                .collect(),
        }
    }

    fn validate(&self, index: usize) -> PackResult<()> {
        if let Self::Weighted(table) = self {
            check_probabilities(table.values().copied(), &format!("slot {index}"))?;
        }
        Ok(())
    }
}

/// Per-rarity holo odds. Each rarity maps finish → probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoloTable(BTreeMap<Rarity, BTreeMap<HoloVariant, f64>>);

impl HoloTable {
    pub fn new(odds: BTreeMap<Rarity, BTreeMap<HoloVariant, f64>>) -> Self {
        Self(odds)
    }

    pub fn odds(&self, rarity: Rarity) -> Option<&BTreeMap<HoloVariant, f64>> {
        self.0.get(&rarity)
    }

    /// Probability that a card of `rarity` rolls any finish but `None`.
    pub fn holo_probability(&self, rarity: Rarity) -> f64 {
        self.odds(rarity)
            .map(|odds| {
                odds.iter()
                    .filter(|(v, p)| v.is_holo() && **p > 0.0)
                    .map(|(_, p)| *p)
                    .sum()
            })
            .unwrap_or(0.0)
    }

    fn validate(&self) -> PackResult<()> {
        for rarity in Rarity::ALL {
            let odds = self
                .odds(rarity)
                .ok_or_else(|| PackError::config(format!("holo table has no entry for {rarity}")))?;
            if let Some(illegal) = odds.keys().find(|v| !v.is_legal_for(rarity)) {
                return Err(PackError::config(format!(
                    "holo variant {illegal} is not legal for {rarity}"
                )));
            }
            check_probabilities(odds.values().copied(), &format!("holo odds for {rarity}"))?;
        }
        Ok(())
    }
}

impl Default for HoloTable {
    fn default() -> Self {
        use HoloVariant::*;
        let odds = |entries: &[(HoloVariant, f64)]| -> BTreeMap<HoloVariant, f64> {
            entries.iter().copied().collect()
        };
        Self(BTreeMap::from([
            (Rarity::Common,    odds(&[(None, 0.80), (Standard, 0.15), (Reverse, 0.05)])),
            (Rarity::Uncommon,  odds(&[(None, 0.75), (Standard, 0.17), (Reverse, 0.08)])),
            (Rarity::Rare,      odds(&[(None, 0.65), (Standard, 0.22), (Reverse, 0.13)])),
            (Rarity::Epic,      odds(&[(None, 0.55), (Standard, 0.27), (Reverse, 0.18)])),
            (Rarity::Legendary, odds(&[(None, 0.40), (Standard, 0.30), (Reverse, 0.20), (FullArt, 0.10)])),
            (
                Rarity::Mythic,
                odds(&[(None, 0.25), (Standard, 0.30), (Reverse, 0.20), (FullArt, 0.15), (Prismatic, 0.10)]),
            ),
        ]))
    }
}

/// Cosmetic pack designs with relative weights, ordered, not HashMap.
/// Weights need not sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignTable(Vec<(DesignName, f64)>);

impl DesignTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<DesignName>,
    {
        Self(entries.into_iter().map(|(n, w)| (n.into(), w)).collect())
    }

    pub fn entries(&self) -> &[(DesignName, f64)] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn total_weight(&self) -> f64 {
        self.0.iter().map(|(_, w)| w.max(0.0)).sum()
    }

    fn validate(&self) -> PackResult<()> {
        if self.0.is_empty() {
            return Err(PackError::config("design table is empty"));
        }
        let mut names = HashSet::new();
        for (name, weight) in &self.0 {
            if !names.insert(name.as_str()) {
                return Err(PackError::config(format!("design '{name}' listed twice")));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(PackError::config(format!(
                    "design '{name}' has invalid weight {weight}"
                )));
            }
        }
        let total = self.total_weight();
        if !total.is_finite() {
            return Err(PackError::config(format!("design weights overflow: total is {total}")));
        }
        if total <= 0.0 {
            return Err(PackError::config("design table has no positive weight"));
        }
        Ok(())
    }
}

impl Default for DesignTable {
    fn default() -> Self {
        Self::new([("standard", 80.0), ("holiday", 15.0), ("premium", 5.0)])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackConfig {
    pub name: String,
    pub cards_per_pack: usize,
    pub slots: Vec<SlotRule>,
    pub holo_table: HoloTable,
    pub design_table: DesignTable,
    /// Restricts every draw to one category (theme pack).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<Category>,
    /// Restricts every draw to one card series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_filter: Option<Series>,
}

impl PackConfig {
    /// Six-card booster: three common slots, two uncommon-leaning slots,
    /// one rare-leaning slot.
    pub fn standard() -> Self {
        let uncommon_slot = SlotRule::weighted([
            (Rarity::Uncommon, 0.74),
            (Rarity::Rare, 0.20),
            (Rarity::Epic, 0.05),
            (Rarity::Legendary, 0.009),
            (Rarity::Mythic, 0.001),
        ]);
        let rare_slot = SlotRule::weighted([
            (Rarity::Rare, 0.88),
            (Rarity::Epic, 0.10),
            (Rarity::Legendary, 0.017),
            (Rarity::Mythic, 0.003),
        ]);
        Self {
            name: "standard".into(),
            cards_per_pack: 6,
            slots: vec![
                SlotRule::Guaranteed(Rarity::Common),
                SlotRule::Guaranteed(Rarity::Common),
                SlotRule::Guaranteed(Rarity::Common),
                uncommon_slot.clone(),
                uncommon_slot,
                rare_slot,
            ],
            holo_table: HoloTable::default(),
            design_table: DesignTable::default(),
            category_filter: None,
            series_filter: None,
        }
    }

    /// Premium booster: a guaranteed uncommon and richer top slots.
    pub fn premium() -> Self {
        Self {
            name: "premium".into(),
            cards_per_pack: 6,
            slots: vec![
                SlotRule::Guaranteed(Rarity::Common),
                SlotRule::Guaranteed(Rarity::Common),
                SlotRule::Guaranteed(Rarity::Uncommon),
                SlotRule::weighted([
                    (Rarity::Uncommon, 0.50),
                    (Rarity::Rare, 0.35),
                    (Rarity::Epic, 0.10),
                    (Rarity::Legendary, 0.04),
                    (Rarity::Mythic, 0.01),
                ]),
                SlotRule::weighted([
                    (Rarity::Rare, 0.70),
                    (Rarity::Epic, 0.20),
                    (Rarity::Legendary, 0.08),
                    (Rarity::Mythic, 0.02),
                ]),
                SlotRule::weighted([
                    (Rarity::Rare, 0.55),
                    (Rarity::Epic, 0.30),
                    (Rarity::Legendary, 0.12),
                    (Rarity::Mythic, 0.03),
                ]),
            ],
            holo_table: HoloTable::default(),
            design_table: DesignTable::new([("standard", 40.0), ("holiday", 30.0), ("premium", 30.0)]),
            category_filter: None,
            series_filter: None,
        }
    }

    pub fn for_pack_type(pack_type: PackType) -> Self {
        match pack_type {
            PackType::Standard => Self::standard(),
            PackType::Premium  => Self::premium(),
        }
    }

    /// Derive a theme pack restricted to `category`.
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        let category = category.into();
        self.name = format!("{}:{category}", self.name);
        self.category_filter = Some(category);
        self
    }

    /// Derive a pack restricted to cards of one series.
    pub fn with_series(mut self, series: Series) -> Self {
        self.name = format!("{}:series-{series}", self.name);
        self.series_filter = Some(series);
        self
    }

    /// The pool restriction every slot draws under.
    pub fn card_filter(&self) -> CardFilter<'_> {
        CardFilter {
            category: self.category_filter.as_deref(),
            series: self.series_filter,
        }
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: PackConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on any structural or probability error.
    pub fn validate(&self) -> PackResult<()> {
        if self.cards_per_pack == 0 {
            return Err(PackError::config("cards_per_pack must be at least 1"));
        }
        if self.slots.len() != self.cards_per_pack {
            return Err(PackError::config(format!(
                "{} slots declared for cards_per_pack = {}",
                self.slots.len(),
                self.cards_per_pack
            )));
        }
        for (index, slot) in self.slots.iter().enumerate() {
            slot.validate(index)?;
        }
        self.holo_table.validate()?;
        self.design_table.validate()?;
        if let Some(category) = &self.category_filter {
            if category.trim().is_empty() {
                return Err(PackError::config("category filter is empty"));
            }
        }
        if self.series_filter == Some(0) {
            return Err(PackError::config("series numbers start at 1"));
        }
        Ok(())
    }

    /// Every rarity some slot can produce, ascending.
    pub fn reachable_rarities(&self) -> Vec<Rarity> {
        let mut rarities: Vec<Rarity> = self.slots.iter().flat_map(SlotRule::reachable).collect();
        rarities.sort();
        rarities.dedup();
        rarities
    }
}

fn check_probabilities<I>(values: I, what: &str) -> PackResult<()>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut any_positive = false;
    for p in values {
        if !p.is_finite() || p < 0.0 {
            return Err(PackError::config(format!("{what} has invalid probability {p}")));
        }
        any_positive |= p > 0.0;
        sum += p;
    }
    if !any_positive {
        return Err(PackError::config(format!("{what} has no positive probability")));
    }
    if (sum - 1.0).abs() > PROBABILITY_EPSILON {
        return Err(PackError::config(format!("{what} sums to {sum}, expected 1")));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackType {
    #[default]
    Standard,
    Premium,
}

impl PackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium  => "premium",
        }
    }
}

impl fmt::Display for PackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackType {
    type Err = PackError;

    fn from_str(s: &str) -> PackResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "premium"  => Ok(Self::Premium),
            other => Err(PackError::request(format!("unknown pack type '{other}'"))),
        }
    }
}
