//! Structural guarantees every pack must meet, and the error taxonomy.

use dadddeck_core::{
    clock::FixedClock, CardDefinition, InMemoryCatalogue, PackAssembler, PackConfig, PackError,
    PackRequest, PackType, Rarity, SlotRule,
};
use std::collections::HashSet;
use std::sync::Arc;

fn assembler_with(catalogue: InMemoryCatalogue) -> PackAssembler {
    PackAssembler::new(Arc::new(catalogue)).with_clock(Arc::new(FixedClock::epoch()))
}

fn fixture() -> PackAssembler {
    assembler_with(InMemoryCatalogue::default_test())
}

#[test]
fn every_pack_has_configured_size() {
    let assembler = fixture();
    for config in [PackConfig::standard(), PackConfig::premium()] {
        for pack in assembler.generate_batch(&config, 1, 500).unwrap() {
            assert_eq!(pack.cards().len(), config.cards_per_pack);
        }
    }
}

#[test]
fn holo_variants_are_legal_for_rarity() {
    let assembler = fixture();
    let packs = assembler.generate_batch(&PackConfig::premium(), 17, 2_000).unwrap();
    for card in packs.iter().flat_map(|p| p.cards()) {
        assert!(
            card.holo.is_legal_for(card.rarity()),
            "{} rolled {} on a {} card",
            card.id(),
            card.holo,
            card.rarity()
        );
        assert_eq!(card.is_holo, card.holo.is_holo());
    }
}

#[test]
fn rarities_are_legal_draws_for_their_slot() {
    let assembler = fixture();
    let config = PackConfig::standard();
    for pack in assembler.generate_batch(&config, 3, 1_000).unwrap() {
        for (card, rule) in pack.cards().iter().zip(&config.slots) {
            assert!(
                rule.probability_of(card.rarity()) > 0.0,
                "{} is not a legal draw for {rule:?}",
                card.rarity()
            );
        }
    }
}

#[test]
fn no_duplicates_when_pool_is_large_enough() {
    let assembler = fixture();
    for pack in assembler.generate_batch(&PackConfig::standard(), 9, 2_000).unwrap() {
        let ids: HashSet<&str> = pack.card_ids().into_iter().collect();
        assert_eq!(ids.len(), pack.cards().len(), "duplicate in pack {}", pack.id());
        assert_eq!(pack.fallback_draws(), 0);
    }
}

#[test]
fn guaranteed_common_slots_are_enforced() {
    let assembler = fixture();
    for pack in assembler.generate_batch(&PackConfig::standard(), 4, 1_000).unwrap() {
        assert!(pack.stats().count_of(Rarity::Common) >= 3);
        for card in &pack.cards()[..3] {
            assert_eq!(card.rarity(), Rarity::Common);
        }
    }
}

#[test]
fn theme_packs_stay_in_category() {
    let assembler = fixture();
    for category in ["grill", "lawn", "joke", "garage"] {
        let config = PackConfig::standard().with_category(category);
        for pack in assembler.generate_batch(&config, 11, 300).unwrap() {
            assert!(pack.cards().iter().all(|c| c.card.category == category));
        }
    }
}

#[test]
fn theme_request_opens_theme_packs() {
    let assembler = fixture();
    let request = PackRequest {
        pack_type: PackType::Premium,
        count: 5,
        design: None,
        category: Some("lawn".into()),
        series: None,
    };
    let packs = assembler.open(&request, Some(8)).unwrap();
    assert_eq!(packs.len(), 5);
    for pack in &packs {
        assert_eq!(pack.name(), "premium:lawn");
        assert!(pack.cards().iter().all(|c| c.card.category == "lawn"));
    }
}

#[test]
fn exhausted_pool_falls_back_to_duplicate() {
    // Two commons only, three guaranteed common slots.
    let catalogue = InMemoryCatalogue::new(vec![
        CardDefinition::new("c1", "Socks and Sandals", "grill", Rarity::Common),
        CardDefinition::new("c2", "Thermostat Guard", "grill", Rarity::Common),
        CardDefinition::new("u1", "Lawn Whisperer", "lawn", Rarity::Uncommon),
        CardDefinition::new("r1", "Pun Master", "joke", Rarity::Rare),
    ])
    .unwrap();
    let mut config = PackConfig::standard();
    config.slots = vec![
        SlotRule::Guaranteed(Rarity::Common),
        SlotRule::Guaranteed(Rarity::Common),
        SlotRule::Guaranteed(Rarity::Common),
        SlotRule::Guaranteed(Rarity::Uncommon),
        SlotRule::Guaranteed(Rarity::Uncommon),
        SlotRule::Guaranteed(Rarity::Rare),
    ];

    let pack = assembler_with(catalogue).generate_pack(&config, Some(1)).unwrap();
    assert_eq!(pack.cards().len(), 6);
    assert_eq!(pack.fallback_draws(), 2);
    let ids: HashSet<&str> = pack.card_ids().into_iter().collect();
    assert_eq!(ids, HashSet::from(["c1", "c2", "u1", "r1"]));
}

#[test]
fn empty_catalogue_is_an_error() {
    let assembler = assembler_with(InMemoryCatalogue::new(Vec::new()).unwrap());
    let err = assembler.generate_pack(&PackConfig::standard(), Some(1)).unwrap_err();
    assert!(matches!(err, PackError::EmptyCatalogue));
}

#[test]
fn missing_reachable_rarity_fails_before_drawing() {
    // No mythics at all, but the standard slots can roll one.
    let catalogue = InMemoryCatalogue::new(
        InMemoryCatalogue::default_test()
            .into_cards()
            .into_iter()
            .filter(|c| c.rarity != Rarity::Mythic)
            .collect(),
    )
    .unwrap();
    let err = assembler_with(catalogue)
        .generate_pack(&PackConfig::standard(), Some(1))
        .unwrap_err();
    assert!(matches!(
        err,
        PackError::NoCardsAvailable { rarity: Rarity::Mythic, category: None, series: None }
    ));
}

#[test]
fn unknown_theme_category_is_an_error() {
    let err = fixture()
        .generate_pack(&PackConfig::standard().with_category("yacht"), Some(1))
        .unwrap_err();
    assert!(matches!(err, PackError::NoCardsAvailable { .. }));
    assert!(err.to_string().contains("yacht"), "{err}");
}

#[test]
fn invalid_config_is_rejected_before_generation() {
    let mut config = PackConfig::standard();
    config.cards_per_pack = 5;
    let err = fixture().generate_pack(&config, Some(1)).unwrap_err();
    assert!(matches!(err, PackError::InvalidConfig { .. }));

    let mut config = PackConfig::standard();
    config.slots[4] = SlotRule::weighted([(Rarity::Uncommon, 0.7), (Rarity::Rare, 0.2)]);
    assert!(fixture().generate_batch(&config, 1, 10).is_err());
}

#[test]
fn stats_report_best_pull() {
    let pack = fixture().generate_pack(&PackConfig::standard(), Some(12345)).unwrap();
    let stats = pack.stats();
    assert_eq!(stats.total_cards, 6);
    assert_eq!(stats.best_rarity(), Some(Rarity::Rare));
    assert_eq!(
        stats.rarity_counts.values().sum::<usize>(),
        stats.total_cards
    );
    assert_eq!(
        stats.holo_count,
        pack.cards().iter().filter(|c| c.is_holo).count()
    );
}
