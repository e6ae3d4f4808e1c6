//! Card selection within a pack.
//!
//! Policy (fixed): pick uniformly among cards of the target rarity that
//! are not yet in the pack. When every such card is already in the pack,
//! pick uniformly from the whole rarity pool instead, allowing a
//! duplicate. The fallback never borrows from another rarity.

use crate::{
    card::CardDefinition,
    catalogue::{CardCatalogue, CardFilter},
    error::{PackError, PackResult},
    rarity::Rarity,
    rng::PackRng,
    types::CardId,
};
use std::collections::HashSet;

/// Most cards one random-sample request may return.
pub const MAX_RANDOM_CARDS: usize = 10;

/// Outcome of one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub card: CardDefinition,
    /// True when the pool was exhausted and a duplicate was permitted.
    pub fallback: bool,
}

/// Select one card of `rarity`, avoiding ids in `placed`. One draw.
///
/// Errors only when the rarity pool itself is empty under `filter`;
/// the assembler rules that out before the first draw.
pub fn select_card(
    catalogue: &dyn CardCatalogue,
    rarity: Rarity,
    filter: CardFilter<'_>,
    placed: &HashSet<CardId>,
    rng: &mut PackRng,
) -> PackResult<Selection> {
    let pool = catalogue.pool(rarity, filter);
    if pool.is_empty() {
        return Err(PackError::no_cards(rarity, filter));
    }

    let fresh: Vec<&CardDefinition> = pool
        .iter()
        .copied()
        .filter(|c| !placed.contains(&c.id))
        .collect();

    let (candidates, fallback) = if fresh.is_empty() {
        (&pool, true)
    } else {
        (&fresh, false)
    };

    let card = rng
        .pick(candidates)
        .map(|c| (*c).clone())
        .ok_or_else(|| PackError::no_cards(rarity, filter))?;
    Ok(Selection { card, fallback })
}

/// `count` (1..=`MAX_RANDOM_CARDS`) distinct random cards matching
/// `rarity` and `filter`, skipping ids in `exclude`. Returns fewer when
/// the matching pool is smaller. One draw per returned card.
pub fn sample_cards(
    catalogue: &dyn CardCatalogue,
    count: usize,
    rarity: Option<Rarity>,
    filter: CardFilter<'_>,
    exclude: &HashSet<CardId>,
    rng: &mut PackRng,
) -> PackResult<Vec<CardDefinition>> {
    if count == 0 || count > MAX_RANDOM_CARDS {
        return Err(PackError::request(format!(
            "random card count must be between 1 and {MAX_RANDOM_CARDS}, got {count}"
        )));
    }

    let mut pool: Vec<&CardDefinition> = catalogue
        .all_cards()
        .iter()
        .filter(|c| rarity.map_or(true, |r| c.rarity == r))
        .filter(|c| filter.matches(c))
        .filter(|c| !exclude.contains(&c.id))
        .collect();

    let mut drawn = Vec::with_capacity(count.min(pool.len()));
    while drawn.len() < count && !pool.is_empty() {
        let index = rng.next_u64_below(pool.len() as u64) as usize;
        drawn.push(pool.swap_remove(index).clone());
    }
    Ok(drawn)
}
