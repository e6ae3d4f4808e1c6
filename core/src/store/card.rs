use super::PackStore;
use crate::{
    card::CardDefinition,
    catalogue::InMemoryCatalogue,
    error::PackResult,
};
use rusqlite::params;

impl PackStore {
    // ── Catalogue ─────────────────────────────────────────────────

    /// Insert cards in order, in one transaction.
    pub fn insert_cards(&mut self, cards: &[CardDefinition]) -> PackResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO card (card_id, name, category, rarity, series, presentation)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for card in cards {
                stmt.execute(params![
                    &card.id,
                    &card.name,
                    &card.category,
                    card.rarity.as_str(),
                    card.series,
                    serde_json::to_string(&card.presentation)?,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn card_count(&self) -> PackResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM card", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Load the whole catalogue in insertion order.
    pub fn load_catalogue(&self) -> PackResult<InMemoryCatalogue> {
        let mut stmt = self.conn.prepare(
            "SELECT card_id, name, category, rarity, series, presentation
             FROM card ORDER BY seq ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<u32>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut cards = Vec::with_capacity(rows.len());
        for (id, name, category, rarity, series, presentation) in rows {
            cards.push(CardDefinition {
                id,
                name,
                category,
                rarity: rarity.parse()?,
                series,
                presentation: serde_json::from_str(&presentation)?,
            });
        }
        InMemoryCatalogue::new(cards)
    }
}
