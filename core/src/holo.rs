//! Holo finish resolution. Legality lives in the table: a variant that is
//! illegal for a rarity is rejected at validation and never offered here.

use crate::{
    config::HoloTable,
    rarity::{HoloVariant, Rarity},
    rng::PackRng,
    slot::cumulative_pick,
};

/// Roll a finish for a card of `rarity`. Always consumes one draw.
pub fn resolve_holo(table: &HoloTable, rarity: Rarity, rng: &mut PackRng) -> HoloVariant {
    let draw = rng.next_f64();
    table
        .odds(rarity)
        .and_then(|odds| cumulative_pick(odds.iter().map(|(v, p)| (*v, *p)), draw))
        .unwrap_or(HoloVariant::None)
}
