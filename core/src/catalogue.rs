//! Read-only card catalogue access.
//!
//! The catalogue is loaded once and shared as `Arc<dyn CardCatalogue>`.
//! Every lookup returns cards in catalogue insertion order; seeded
//! reproduction depends on that order being stable.

use crate::{
    card::CardDefinition,
    error::{PackError, PackResult},
    rarity::Rarity,
    types::{Category, Series},
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

pub trait CardCatalogue: Send + Sync {
    fn all_cards(&self) -> &[CardDefinition];

    fn cards_by_rarity(&self, rarity: Rarity) -> Vec<&CardDefinition>;

    fn cards_by_rarity_and_category(&self, rarity: Rarity, category: &str) -> Vec<&CardDefinition>;

    fn card_count(&self) -> usize {
        self.all_cards().len()
    }

    /// Distinct categories, sorted.
    fn categories(&self) -> Vec<Category> {
        let mut seen: Vec<Category> = self
            .all_cards()
            .iter()
            .map(|c| c.category.clone())
            .collect();
        seen.sort();
        seen.dedup();
        seen
    }

    /// Rarity pool with `filter` applied, in catalogue order.
    fn pool(&self, rarity: Rarity, filter: CardFilter<'_>) -> Vec<&CardDefinition> {
        let mut pool = match filter.category {
            Some(category) => self.cards_by_rarity_and_category(rarity, category),
            None => self.cards_by_rarity(rarity),
        };
        if let Some(series) = filter.series {
            pool.retain(|c| c.series == Some(series));
        }
        pool
    }
}

/// Optional category and series restriction on a card pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardFilter<'a> {
    pub category: Option<&'a str>,
    pub series: Option<Series>,
}

impl<'a> CardFilter<'a> {
    pub fn category(category: &'a str) -> Self {
        Self {
            category: Some(category),
            series: None,
        }
    }

    pub fn series(series: Series) -> Self {
        Self {
            category: None,
            series: Some(series),
        }
    }

    pub fn matches(&self, card: &CardDefinition) -> bool {
        self.category.map_or(true, |c| card.category == c)
            && self.series.map_or(true, |s| card.series == Some(s))
    }
}

/// Catalogue held fully in memory, indexed by rarity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogue {
    cards: Vec<CardDefinition>,
    by_rarity: BTreeMap<Rarity, Vec<usize>>,
}

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    cards: Vec<CardDefinition>,
}

impl InMemoryCatalogue {
    /// Index `cards`. Ids must be unique.
    pub fn new(cards: Vec<CardDefinition>) -> PackResult<Self> {
        let mut seen = HashSet::with_capacity(cards.len());
        let mut by_rarity: BTreeMap<Rarity, Vec<usize>> = BTreeMap::new();
        for (index, card) in cards.iter().enumerate() {
            if !seen.insert(card.id.as_str()) {
                return Err(PackError::DuplicateCard {
                    card_id: card.id.clone(),
                });
            }
            by_rarity.entry(card.rarity).or_default().push(index);
        }
        Ok(Self { cards, by_rarity })
    }

    /// Load from a JSON file of shape `{"cards": [...]}`.
    pub fn load_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let file: CatalogueFile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        let catalogue = Self::new(file.cards)?;
        log::info!(
            "catalogue: loaded {} cards from {}",
            catalogue.card_count(),
            path.display()
        );
        Ok(catalogue)
    }

    /// Deterministic 96-card fixture for tests and demos: four categories,
    /// 8/6/4/3/2/1 cards per category from common to mythic. Odd-numbered
    /// cards are series 1, even-numbered series 2, so series 2 has no
    /// mythics.
    pub fn default_test() -> Self {
        const CATEGORIES: [&str; 4] = ["grill", "lawn", "joke", "garage"];
        const PER_CATEGORY: [(Rarity, usize); 6] = [
            (Rarity::Common, 8),
            (Rarity::Uncommon, 6),
            (Rarity::Rare, 4),
            (Rarity::Epic, 3),
            (Rarity::Legendary, 2),
            (Rarity::Mythic, 1),
        ];

        let mut cards = Vec::new();
        for (rarity, count) in PER_CATEGORY {
            for category in CATEGORIES {
                for n in 1..=count {
                    let series = if n % 2 == 1 { 1 } else { 2 };
                    cards.push(
                        CardDefinition::new(
                            format!("{rarity}-{category}-{n:02}"),
                            format!("{category} {rarity} #{n}"),
                            category,
                            rarity,
                        )
                        .with_series(series),
                    );
                }
            }
        }
        // Ids are unique by construction.
        let mut by_rarity: BTreeMap<Rarity, Vec<usize>> = BTreeMap::new();
        for (index, card) in cards.iter().enumerate() {
            by_rarity.entry(card.rarity).or_default().push(index);
        }
        Self { cards, by_rarity }
    }

    pub fn into_cards(self) -> Vec<CardDefinition> {
        self.cards
    }

    fn indexed(&self, rarity: Rarity) -> impl Iterator<Item = &CardDefinition> {
        self.by_rarity
            .get(&rarity)
            .into_iter()
            .flatten()
            .map(|&i| &self.cards[i])
    }
}

impl CardCatalogue for InMemoryCatalogue {
    fn all_cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    fn cards_by_rarity(&self, rarity: Rarity) -> Vec<&CardDefinition> {
        self.indexed(rarity).collect()
    }

    fn cards_by_rarity_and_category(&self, rarity: Rarity, category: &str) -> Vec<&CardDefinition> {
        self.indexed(rarity)
            .filter(|c| c.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_has_expected_shape() {
        let catalogue = InMemoryCatalogue::default_test();
        assert_eq!(catalogue.card_count(), 96);
        assert_eq!(catalogue.cards_by_rarity(Rarity::Common).len(), 32);
        assert_eq!(catalogue.cards_by_rarity(Rarity::Mythic).len(), 4);
        assert_eq!(
            catalogue
                .cards_by_rarity_and_category(Rarity::Rare, "grill")
                .len(),
            4
        );
        assert_eq!(catalogue.categories(), vec!["garage", "grill", "joke", "lawn"]);
    }

    #[test]
    fn lookups_preserve_insertion_order() {
        let catalogue = InMemoryCatalogue::default_test();
        let ids: Vec<&str> = catalogue
            .cards_by_rarity(Rarity::Legendary)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids[0], "legendary-grill-01");
        assert_eq!(ids[1], "legendary-grill-02");
        assert_eq!(ids[2], "legendary-lawn-01");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let cards = vec![
            CardDefinition::new("dup", "One", "grill", Rarity::Common),
            CardDefinition::new("dup", "Two", "lawn", Rarity::Rare),
        ];
        let err = InMemoryCatalogue::new(cards).unwrap_err();
        assert!(matches!(err, PackError::DuplicateCard { card_id } if card_id == "dup"));
    }

    #[test]
    fn unknown_category_yields_empty_pool() {
        let catalogue = InMemoryCatalogue::default_test();
        assert!(catalogue.pool(Rarity::Common, CardFilter::category("yacht")).is_empty());
        assert_eq!(catalogue.pool(Rarity::Common, CardFilter::default()).len(), 32);
    }

    #[test]
    fn series_filter_narrows_pool() {
        let catalogue = InMemoryCatalogue::default_test();
        let series_two = catalogue.pool(Rarity::Common, CardFilter::series(2));
        assert_eq!(series_two.len(), 16);
        assert!(series_two.iter().all(|c| c.series == Some(2)));
        assert!(catalogue.pool(Rarity::Mythic, CardFilter::series(2)).is_empty());

        let both = CardFilter {
            category: Some("joke"),
            series: Some(1),
        };
        let pool = catalogue.pool(Rarity::Uncommon, both);
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|c| both.matches(c)));
    }
}
