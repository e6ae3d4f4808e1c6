//! Catalogue entries and the drawn instances that land in a pack.

use crate::{
    rarity::{HoloVariant, Rarity},
    types::{CardId, Category, Series},
};
use serde::{Deserialize, Serialize};

/// An immutable catalogue entry. The engine never mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub category: Category,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<Series>,
    /// Art, flavour text, stats. Opaque to generation.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub presentation: serde_json::Value,
}

impl CardDefinition {
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        category: impl Into<Category>,
        rarity: Rarity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            rarity,
            series: None,
            presentation: serde_json::Value::Null,
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series = Some(series);
        self
    }

    pub fn with_presentation(mut self, presentation: serde_json::Value) -> Self {
        self.presentation = presentation;
        self
    }
}

/// One drawn card: the definition plus its rolled finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    pub card: CardDefinition,
    pub is_holo: bool,
    pub holo: HoloVariant,
}

impl CardInstance {
    pub fn new(card: CardDefinition, holo: HoloVariant) -> Self {
        Self {
            card,
            is_holo: holo.is_holo(),
            holo,
        }
    }

    pub fn id(&self) -> &str {
        &self.card.id
    }

    pub fn rarity(&self) -> Rarity {
        self.card.rarity
    }
}
