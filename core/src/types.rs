//! Shared primitive types used across the pack engine.

/// A stable, unique catalogue identifier for a card.
pub type CardId = String;

/// The identifier of one generated pack.
pub type PackId = String;

/// A card category tag ("dad type"). Theme packs filter on it.
pub type Category = String;

/// Print-run number of a card set. Series packs filter on it.
pub type Series = u32;

/// Name of a cosmetic pack design.
pub type DesignName = String;
