//! The pack assembler: one synchronous pass per pack.
//!
//! DRAW ORDER (fixed, documented, never reordered):
//!   1. For each slot, in slot order:
//!        a. rarity  : one f64 for a weighted slot, none if guaranteed
//!        b. card    : one u64 below the candidate pool size
//!        c. holo    : one f64
//!   2. Design       : one f64, even when a request forces the design
//!   3. Pack id      : two u64, formatted as a random (v4) UUID
//!
//! RULES:
//!   - Validation and catalogue checks run before the first draw.
//!     A failing call never yields a partial pack.
//!   - Callers never interleave their own draws into a pack's stream.
//!   - The timestamp comes from the injected clock, not the stream.
//!   - The catalogue is shared read-only; each call owns its own RNG and
//!     in-progress card list, so concurrent calls need no locking.

use crate::{
    card::CardInstance,
    catalogue::CardCatalogue,
    clock::{PackClock, SystemClock},
    config::{PackConfig, PackType},
    design::resolve_design,
    error::{PackError, PackResult},
    holo::resolve_holo,
    pack::GeneratedPack,
    rng::{PackRng, SeedBank},
    selector::select_card,
    slot::resolve_rarity,
    types::{Category, DesignName, Series},
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// Most packs one request may open.
pub const MAX_PACKS_PER_REQUEST: u32 = 10;

/// A player-facing "open packs" request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackRequest {
    pub pack_type: PackType,
    pub count: u32,
    /// Force a specific design instead of rolling one.
    pub design: Option<DesignName>,
    /// Open theme packs of this category.
    pub category: Option<Category>,
    /// Draw only from this card series.
    pub series: Option<Series>,
}

impl PackRequest {
    pub fn new(pack_type: PackType, count: u32) -> Self {
        Self {
            pack_type,
            count,
            ..Default::default()
        }
    }

    /// The config this request resolves to.
    pub fn config(&self) -> PackConfig {
        let mut config = PackConfig::for_pack_type(self.pack_type);
        if let Some(category) = &self.category {
            config = config.with_category(category.clone());
        }
        if let Some(series) = self.series {
            config = config.with_series(series);
        }
        config
    }
}

pub struct PackAssembler {
    catalogue: Arc<dyn CardCatalogue>,
    clock: Arc<dyn PackClock>,
}

impl PackAssembler {
    pub fn new(catalogue: Arc<dyn CardCatalogue>) -> Self {
        Self {
            catalogue,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn PackClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn catalogue(&self) -> &dyn CardCatalogue {
        self.catalogue.as_ref()
    }

    /// Generate one pack. `None` seeds from entropy; the chosen seed is
    /// recorded on the pack either way.
    pub fn generate_pack(&self, config: &PackConfig, seed: Option<u64>) -> PackResult<GeneratedPack> {
        let mut rng = match seed {
            Some(seed) => PackRng::from_seed(seed),
            None => PackRng::from_entropy(),
        };
        self.generate_with_rng(config, &mut rng)
    }

    /// Generate one pack from a caller-supplied stream. The pack records
    /// the stream's seed, which replays it only if the stream was fresh.
    pub fn generate_with_rng(&self, config: &PackConfig, rng: &mut PackRng) -> PackResult<GeneratedPack> {
        self.preflight(config)?;
        self.assemble(config, rng, None)
    }

    /// Generate `count` packs in parallel. Pack `i` uses
    /// `SeedBank::new(master_seed).for_pack(i)`; output is in index order.
    pub fn generate_batch(
        &self,
        config: &PackConfig,
        master_seed: u64,
        count: usize,
    ) -> PackResult<Vec<GeneratedPack>> {
        self.preflight(config)?;
        let bank = SeedBank::new(master_seed);
        let packs = (0..count as u64)
            .into_par_iter()
            .map(|index| self.assemble(config, &mut bank.for_pack(index), None))
            .collect::<PackResult<Vec<_>>>()?;
        log::info!(
            "batch: generated {} '{}' packs from master seed {master_seed}",
            packs.len(),
            config.name
        );
        Ok(packs)
    }

    /// Serve an "open packs" request.
    pub fn open(&self, request: &PackRequest, seed: Option<u64>) -> PackResult<Vec<GeneratedPack>> {
        if request.count == 0 || request.count > MAX_PACKS_PER_REQUEST {
            return Err(PackError::request(format!(
                "count must be between 1 and {MAX_PACKS_PER_REQUEST}, got {}",
                request.count
            )));
        }
        let config = request.config();
        if let Some(design) = &request.design {
            if !config.design_table.contains(design) {
                return Err(PackError::request(format!(
                    "design '{design}' is not offered for {} packs",
                    request.pack_type
                )));
            }
        }
        self.preflight(&config)?;

        let master_seed = seed.unwrap_or_else(|| PackRng::from_entropy().seed());
        let bank = SeedBank::new(master_seed);
        (0..request.count as u64)
            .map(|index| self.assemble(&config, &mut bank.for_pack(index), request.design.as_deref()))
            .collect()
    }

    /// Every check that can fail, before any draw.
    fn preflight(&self, config: &PackConfig) -> PackResult<()> {
        config.validate()?;
        if self.catalogue.card_count() == 0 {
            return Err(PackError::EmptyCatalogue);
        }
        let filter = config.card_filter();
        for rarity in config.reachable_rarities() {
            if self.catalogue.pool(rarity, filter).is_empty() {
                return Err(PackError::no_cards(rarity, filter));
            }
        }
        Ok(())
    }

    fn assemble(
        &self,
        config: &PackConfig,
        rng: &mut PackRng,
        forced_design: Option<&str>,
    ) -> PackResult<GeneratedPack> {
        let filter = config.card_filter();
        let mut cards: Vec<CardInstance> = Vec::with_capacity(config.cards_per_pack);
        let mut placed: HashSet<String> = HashSet::with_capacity(config.cards_per_pack);
        let mut fallback_draws = 0u32;

        for (slot, rule) in config.slots.iter().enumerate() {
            let rarity = resolve_rarity(rule, rng);
            let selection = select_card(self.catalogue.as_ref(), rarity, filter, &placed, rng)?;
            if selection.fallback {
                fallback_draws += 1;
                log::warn!(
                    "pack '{}' seed={}: {rarity} pool exhausted at slot {slot}, duplicating {}",
                    config.name,
                    rng.seed(),
                    selection.card.id
                );
            }
            let holo = resolve_holo(&config.holo_table, rarity, rng);
            placed.insert(selection.card.id.clone());
            cards.push(CardInstance::new(selection.card, holo));
        }

        let rolled = resolve_design(&config.design_table, rng);
        let design = forced_design.map(str::to_string).unwrap_or(rolled);
        let id = uuid::Builder::from_random_bytes(rng.next_bytes16())
            .into_uuid()
            .to_string();

        log::debug!(
            "pack {id}: '{}' seed={} design={design} cards={}",
            config.name,
            rng.seed(),
            cards.len()
        );

        Ok(GeneratedPack::new(
            id,
            config.name.clone(),
            rng.seed(),
            cards,
            design,
            self.clock.now(),
            fallback_draws,
        ))
    }
}

/// One-shot convenience over `PackAssembler::generate_pack`.
pub fn generate_pack(
    catalogue: Arc<dyn CardCatalogue>,
    config: &PackConfig,
    seed: Option<u64>,
) -> PackResult<GeneratedPack> {
    PackAssembler::new(catalogue).generate_pack(config, seed)
}
