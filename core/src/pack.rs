//! The generated pack record and its derived statistics.

use crate::{
    card::CardInstance,
    rarity::Rarity,
    types::{DesignName, PackId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One opened pack. Immutable once built; ownership passes to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPack {
    id: PackId,
    name: String,
    seed: u64,
    cards: Vec<CardInstance>,
    design: DesignName,
    generated_at: DateTime<Utc>,
    fallback_draws: u32,
}

impl GeneratedPack {
    pub(crate) fn new(
        id: PackId,
        name: String,
        seed: u64,
        cards: Vec<CardInstance>,
        design: DesignName,
        generated_at: DateTime<Utc>,
        fallback_draws: u32,
    ) -> Self {
        Self {
            id,
            name,
            seed,
            cards,
            design,
            generated_at,
            fallback_draws,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the config that produced this pack.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seed that reproduces this pack with the same config.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    pub fn design(&self) -> &str {
        &self.design
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Slots that had to accept an in-pack duplicate.
    pub fn fallback_draws(&self) -> u32 {
        self.fallback_draws
    }

    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(CardInstance::id).collect()
    }

    /// Same draws as `other`: every field except the timestamp matches.
    /// A replayed seed yields such a pack.
    pub fn same_draws(&self, other: &GeneratedPack) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.seed == other.seed
            && self.cards == other.cards
            && self.design == other.design
            && self.fallback_draws == other.fallback_draws
    }

    pub fn stats(&self) -> PackStats {
        pack_stats(self)
    }
}

/// Derived view over a pack. Never stored; recompute on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackStats {
    pub total_cards: usize,
    pub holo_count: usize,
    pub rarity_counts: BTreeMap<Rarity, usize>,
    /// First card of the highest rarity, in pack order.
    pub best_card: Option<CardInstance>,
}

impl PackStats {
    pub fn best_rarity(&self) -> Option<Rarity> {
        self.best_card.as_ref().map(CardInstance::rarity)
    }

    pub fn count_of(&self, rarity: Rarity) -> usize {
        self.rarity_counts.get(&rarity).copied().unwrap_or(0)
    }
}

pub fn pack_stats(pack: &GeneratedPack) -> PackStats {
    let mut rarity_counts = BTreeMap::new();
    let mut best: Option<&CardInstance> = None;
    for card in pack.cards() {
        *rarity_counts.entry(card.rarity()).or_insert(0) += 1;
        if best.map_or(true, |b| card.rarity() > b.rarity()) {
            best = Some(card);
        }
    }
    PackStats {
        total_cards: pack.cards().len(),
        holo_count: pack.cards().iter().filter(|c| c.is_holo).count(),
        rarity_counts,
        best_card: best.cloned(),
    }
}
