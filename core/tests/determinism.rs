//! Seeded packs must be reproducible field-for-field, across calls,
//! across assembler instances and across process restarts.

use dadddeck_core::{
    clock::FixedClock, CardCatalogue, InMemoryCatalogue, PackAssembler, PackConfig,
};
use std::sync::Arc;

fn build_assembler() -> PackAssembler {
    PackAssembler::new(Arc::new(InMemoryCatalogue::default_test()))
        .with_clock(Arc::new(FixedClock::epoch()))
}

/// Recorded from the standard config over the 96-card fixture.
const GOLDEN_12345: [&str; 6] = [
    "common-grill-06",
    "common-lawn-05",
    "common-joke-02",
    "uncommon-garage-06",
    "uncommon-grill-01",
    "rare-garage-03",
];

#[test]
fn same_seed_produces_identical_packs() {
    let config = PackConfig::standard();
    let a = build_assembler().generate_pack(&config, Some(0xDEAD_BEEF)).expect("pack a");
    let b = build_assembler().generate_pack(&config, Some(0xDEAD_BEEF)).expect("pack b");
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn seed_12345_matches_golden_sequence() {
    let assembler = build_assembler();
    let config = PackConfig::standard();

    let first = assembler.generate_pack(&config, Some(12345)).unwrap();
    assert_eq!(first.card_ids(), GOLDEN_12345);
    assert_eq!(first.design(), "holiday");

    let again = assembler.generate_pack(&config, Some(12345)).unwrap();
    assert_eq!(again, first);
}

#[test]
fn different_seed_gives_different_but_legal_pack() {
    let assembler = build_assembler();
    let config = PackConfig::standard();

    let other = assembler.generate_pack(&config, Some(54321)).unwrap();
    assert_ne!(other.card_ids(), GOLDEN_12345);
    assert_eq!(other.cards().len(), 6);
    for card in other.cards() {
        assert!(card.holo.is_legal_for(card.rarity()));
    }
}

#[test]
fn many_seeds_all_reproduce() {
    let assembler = build_assembler();
    let config = PackConfig::premium().with_category("garage");
    for seed in 0..200u64 {
        let a = assembler.generate_pack(&config, Some(seed)).unwrap();
        let b = assembler.generate_pack(&config, Some(seed)).unwrap();
        assert_eq!(a, b, "seed {seed} diverged");
    }
}

#[test]
fn concurrent_generation_matches_sequential() {
    let catalogue: Arc<dyn CardCatalogue> = Arc::new(InMemoryCatalogue::default_test());
    let config = Arc::new(PackConfig::standard());

    let sequential: Vec<_> = (0..8u64)
        .map(|seed| {
            PackAssembler::new(catalogue.clone())
                .with_clock(Arc::new(FixedClock::epoch()))
                .generate_pack(&config, Some(seed))
                .unwrap()
        })
        .collect();

    let handles: Vec<_> = (0..8u64)
        .map(|seed| {
            let catalogue = catalogue.clone();
            let config = config.clone();
            std::thread::spawn(move || {
                PackAssembler::new(catalogue)
                    .with_clock(Arc::new(FixedClock::epoch()))
                    .generate_pack(&config, Some(seed))
            })
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        let pack = handle.join().expect("thread panicked").expect("pack");
        assert_eq!(pack, sequential[seed], "seed {seed} differs across threads");
    }
}

#[test]
fn batch_is_reproducible() {
    let assembler = build_assembler();
    let config = PackConfig::standard();
    let a = assembler.generate_batch(&config, 2024, 64).unwrap();
    let b = assembler.generate_batch(&config, 2024, 64).unwrap();
    assert_eq!(a, b);
    let c = assembler.generate_batch(&config, 2025, 64).unwrap();
    assert_ne!(a, c, "different master seeds produced identical batches");
}
