//! Slot resolution: one slot rule + one draw → one target rarity.

use crate::{config::SlotRule, rarity::Rarity, rng::PackRng};

/// Resolve the target rarity for one slot.
///
/// Guaranteed slots consume no draw. Weighted slots consume exactly one
/// `next_f64`, whatever the outcome.
pub fn resolve_rarity(rule: &SlotRule, rng: &mut PackRng) -> Rarity {
    match rule {
        SlotRule::Guaranteed(rarity) => *rarity,
        SlotRule::Weighted(table) => {
            let draw = rng.next_f64();
            // Validated tables always have a positive entry.
            cumulative_pick(table.iter().map(|(r, p)| (*r, *p)), draw).unwrap_or(Rarity::Common)
        }
    }
}

/// Walk `entries` in order, returning the first key whose running sum
/// is >= `draw`. Non-positive entries are never chosen. A draw left
/// above the final sum by rounding lands on the last positive entry.
pub(crate) fn cumulative_pick<K, I>(entries: I, draw: f64) -> Option<K>
where
    K: Copy,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (key, p) in entries {
        if p <= 0.0 {
            continue;
        }
        cumulative += p;
        last_positive = Some(key);
        if cumulative >= draw {
            return Some(key);
        }
    }
    last_positive
}
