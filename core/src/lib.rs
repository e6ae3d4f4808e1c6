//! Probabilistic pack generation for the DadDeck trading-card game.
//!
//! Given a read-only card catalogue and a validated `PackConfig`, the
//! `PackAssembler` draws a fixed-size pack slot by slot: rarity, card,
//! holo finish, then one pack design. Seeded generation is reproducible
//! field-for-field; see `assembler` for the draw order contract.

pub mod assembler;
pub mod card;
pub mod catalogue;
pub mod clock;
pub mod config;
pub mod design;
pub mod error;
pub mod holo;
pub mod pack;
pub mod rarity;
pub mod rng;
pub mod selector;
pub mod slot;
pub mod stats;
pub mod store;
pub mod types;

pub use assembler::{generate_pack, PackAssembler, PackRequest, MAX_PACKS_PER_REQUEST};
pub use card::{CardDefinition, CardInstance};
pub use catalogue::{CardCatalogue, CardFilter, InMemoryCatalogue};
pub use config::{DesignTable, HoloTable, PackConfig, PackType, SlotRule};
pub use error::{PackError, PackResult};
pub use pack::{pack_stats, GeneratedPack, PackStats};
pub use rarity::{HoloVariant, Rarity};
pub use rng::{PackRng, SeedBank};
