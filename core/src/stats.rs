//! Distribution statistics over many packs, and the analytic targets
//! they should converge to.

use crate::{
    config::PackConfig,
    pack::GeneratedPack,
    rarity::{HoloVariant, Rarity},
    types::DesignName,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Observed frequencies across a set of packs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DistributionReport {
    pub packs: usize,
    pub cards: usize,
    pub holo_cards: usize,
    pub fallback_draws: u64,
    pub rarity_counts: BTreeMap<Rarity, usize>,
    pub holo_counts: BTreeMap<HoloVariant, usize>,
    pub design_counts: BTreeMap<DesignName, usize>,
}

impl DistributionReport {
    pub fn from_packs<'a, I>(packs: I) -> Self
    where
        I: IntoIterator<Item = &'a GeneratedPack>,
    {
        let mut report = Self::default();
        for pack in packs {
            report.add(pack);
        }
        report
    }

    pub fn add(&mut self, pack: &GeneratedPack) {
        self.packs += 1;
        self.fallback_draws += u64::from(pack.fallback_draws());
        *self.design_counts.entry(pack.design().to_string()).or_default() += 1;
        for card in pack.cards() {
            self.cards += 1;
            if card.is_holo {
                self.holo_cards += 1;
            }
            *self.rarity_counts.entry(card.rarity()).or_default() += 1;
            *self.holo_counts.entry(card.holo).or_default() += 1;
        }
    }

    /// Share of all drawn cards with this rarity.
    pub fn rarity_frequency(&self, rarity: Rarity) -> f64 {
        ratio(self.rarity_counts.get(&rarity).copied().unwrap_or(0), self.cards)
    }

    pub fn holo_rate(&self) -> f64 {
        ratio(self.holo_cards, self.cards)
    }

    pub fn holo_frequency(&self, variant: HoloVariant) -> f64 {
        ratio(self.holo_counts.get(&variant).copied().unwrap_or(0), self.cards)
    }

    /// Share of packs wearing this design.
    pub fn design_frequency(&self, design: &str) -> f64 {
        ratio(self.design_counts.get(design).copied().unwrap_or(0), self.packs)
    }
}

fn ratio(n: usize, d: usize) -> f64 {
    if d == 0 {
        0.0
    } else {
        n as f64 / d as f64
    }
}

/// Expected share of cards per rarity: the mean of the slot tables.
pub fn expected_rarity_frequencies(config: &PackConfig) -> BTreeMap<Rarity, f64> {
    let slots = config.slots.len().max(1) as f64;
    Rarity::ALL
        .into_iter()
        .map(|rarity| {
            let total: f64 = config.slots.iter().map(|s| s.probability_of(rarity)).sum();
            (rarity, total / slots)
        })
        .collect()
}

/// Expected share of cards with any holo finish.
pub fn expected_holo_rate(config: &PackConfig) -> f64 {
    expected_rarity_frequencies(config)
        .into_iter()
        .map(|(rarity, share)| share * config.holo_table.holo_probability(rarity))
        .sum()
}

/// Expected share of cards per holo variant, `None` included.
pub fn expected_holo_frequencies(config: &PackConfig) -> BTreeMap<HoloVariant, f64> {
    let rarity_shares = expected_rarity_frequencies(config);
    HoloVariant::ALL
        .into_iter()
        .map(|variant| {
            let share = rarity_shares
                .iter()
                .map(|(rarity, share)| {
                    let odds = config
                        .holo_table
                        .odds(*rarity)
                        .and_then(|odds| odds.get(&variant))
                        .copied()
                        .unwrap_or(0.0);
                    share * odds
                })
                .sum();
            (variant, share)
        })
        .collect()
}

/// Expected share of packs per design, weights normalised.
pub fn expected_design_frequencies(config: &PackConfig) -> BTreeMap<DesignName, f64> {
    let total = config.design_table.total_weight();
    config
        .design_table
        .entries()
        .iter()
        .map(|(name, weight)| {
            let share = if total > 0.0 { weight.max(0.0) / total } else { 0.0 };
            (name.clone(), share)
        })
        .collect()
}

/// True when `observed` is within `relative * expected` of `expected`,
/// or within `sigmas` binomial standard errors over `trials` draws.
/// The allowance shrinks with the target, so a tier that never shows up
/// fails even when its expected share is tiny.
pub fn within_tolerance(
    observed: f64,
    expected: f64,
    trials: usize,
    relative: f64,
    sigmas: f64,
) -> bool {
    let standard_error = if trials == 0 {
        0.0
    } else {
        (expected * (1.0 - expected) / trials as f64).sqrt()
    };
    let allowed = (expected * relative).max(sigmas * standard_error);
    (observed - expected).abs() <= allowed
}
