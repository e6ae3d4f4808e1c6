use crate::{catalogue::CardFilter, rarity::Rarity};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("Invalid pack configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Card catalogue is empty")]
    EmptyCatalogue,

    #[error("No {rarity} cards available{}", filter_suffix(.category, .series))]
    NoCardsAvailable {
        rarity: Rarity,
        category: Option<String>,
        series: Option<u32>,
    },

    #[error("Duplicate card id '{card_id}' in catalogue")]
    DuplicateCard { card_id: String },

    #[error("Invalid pack request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Pack '{pack_id}' is already recorded with different contents")]
    LedgerConflict { pack_id: String },

    #[error("Unknown rarity '{value}'")]
    UnknownRarity { value: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PackError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }

    pub(crate) fn request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest { reason: reason.into() }
    }

    pub(crate) fn no_cards(rarity: Rarity, filter: CardFilter<'_>) -> Self {
        Self::NoCardsAvailable {
            rarity,
            category: filter.category.map(str::to_string),
            series: filter.series,
        }
    }
}

fn filter_suffix(category: &Option<String>, series: &Option<u32>) -> String {
    match (category, series) {
        (Some(c), Some(s)) => format!(" in category '{c}', series {s}"),
        (Some(c), None) => format!(" in category '{c}'"),
        (None, Some(s)) => format!(" in series {s}"),
        (None, None) => String::new(),
    }
}

pub type PackResult<T> = Result<T, PackError>;
