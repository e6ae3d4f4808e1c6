//! Pack design (wrapper skin) resolution. Independent of card content.

use crate::{config::DesignTable, rng::PackRng, slot::cumulative_pick, types::DesignName};

/// Roll a design. Weights are normalised by their total; one draw.
pub fn resolve_design(table: &DesignTable, rng: &mut PackRng) -> DesignName {
    let target = rng.next_f64() * table.total_weight();
    let index = cumulative_pick(
        table.entries().iter().enumerate().map(|(i, (_, w))| (i, *w)),
        target,
    )
    .unwrap_or(0);
    table
        .entries()
        .get(index)
        .map(|(name, _)| name.clone())
        .unwrap_or_default()
}
