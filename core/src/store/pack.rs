use super::PackStore;
use crate::{
    error::{PackError, PackResult},
    pack::GeneratedPack,
    rarity::Rarity,
};
use rusqlite::{params, OptionalExtension};
use std::collections::BTreeMap;

impl PackStore {
    // ── Opened packs ──────────────────────────────────────────────

    /// Record an opened pack. Returns `false` when a replay of the same
    /// seed is already in the ledger; the first recording is kept.
    pub fn record_pack(&mut self, pack: &GeneratedPack) -> PackResult<bool> {
        if let Some(existing) = self.pack_by_id(pack.id())? {
            if existing.same_draws(pack) {
                log::debug!("store: pack {} already recorded, skipping replay", pack.id());
                return Ok(false);
            }
            return Err(PackError::LedgerConflict {
                pack_id: pack.id().to_string(),
            });
        }

        let payload = serde_json::to_string(pack)?;
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO opened_pack (
                pack_id, pack_name, seed, design, generated_at, fallback_draws, payload
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                pack.id(),
                pack.name(),
                pack.seed() as i64,
                pack.design(),
                pack.generated_at().to_rfc3339(),
                pack.fallback_draws() as i64,
                payload,
            ],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO opened_card (pack_id, position, card_id, rarity, holo)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, card) in pack.cards().iter().enumerate() {
                stmt.execute(params![
                    pack.id(),
                    position as i64,
                    card.id(),
                    card.rarity().as_str(),
                    card.holo.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(true)
    }

    pub fn pack_by_id(&self, pack_id: &str) -> PackResult<Option<GeneratedPack>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM opened_pack WHERE pack_id = ?1",
                params![pack_id],
                |row| row.get(0),
            )
            .optional()?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn pack_count(&self) -> PackResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM opened_pack", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Cards opened per rarity, across the whole ledger.
    pub fn rarity_totals(&self) -> PackResult<BTreeMap<Rarity, i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT rarity, COUNT(*) FROM opened_card GROUP BY rarity")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        let mut totals = BTreeMap::new();
        for (rarity, count) in rows {
            totals.insert(rarity.parse::<Rarity>()?, count);
        }
        Ok(totals)
    }
}
