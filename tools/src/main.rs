//! pack-runner: headless batch pack opener for DadDeck.
//!
//! Usage:
//!   pack-runner --seed 12345 --packs 1000
//!   pack-runner --seed 12345 --packs 500 --pack-type premium --category grill --db packs.db
//!   pack-runner --seed 7 --packs 200 --series 1
//!   pack-runner --config data/packs/standard.json --catalogue data/catalogue.json --json

use anyhow::Result;
use dadddeck_core::{
    stats::{
        expected_design_frequencies, expected_holo_frequencies, expected_holo_rate,
        expected_rarity_frequencies, within_tolerance, DistributionReport,
    },
    store::PackStore,
    GeneratedPack, InMemoryCatalogue, PackAssembler, PackConfig, PackType, Rarity,
};
use std::env;
use std::sync::Arc;

const RELATIVE_TOLERANCE: f64 = 0.10;
const SIGMAS: f64 = 4.0;

#[derive(serde::Serialize)]
struct RunSummary<'a> {
    run_id: &'a str,
    config: &'a str,
    master_seed: u64,
    report: &'a DistributionReport,
    expected_rarity: std::collections::BTreeMap<Rarity, f64>,
    expected_holo_rate: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let packs = parse_arg(&args, "--packs", 1000usize);
    let show = parse_arg(&args, "--show", 3usize);
    let json = args.iter().any(|a| a == "--json");
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let catalogue_path = str_arg(&args, "--catalogue").unwrap_or("./data/catalogue.json");

    let mut config = match str_arg(&args, "--config") {
        Some(path) => PackConfig::load(path)?,
        None => {
            let pack_type: PackType = str_arg(&args, "--pack-type").unwrap_or("standard").parse()?;
            PackConfig::for_pack_type(pack_type)
        }
    };
    if let Some(category) = str_arg(&args, "--category") {
        config = config.with_category(category);
    }
    if let Some(series) = str_arg(&args, "--series") {
        config = config.with_series(series.parse()?);
    }

    let catalogue = InMemoryCatalogue::load_json(catalogue_path)?;
    let run_id = format!("run-{seed}-{}", chrono::Utc::now().format("%Y%m%dT%H%M%S"));

    if !json {
        println!("DadDeck pack-runner");
        println!("  run_id:     {run_id}");
        println!("  seed:       {seed}");
        println!("  packs:      {packs}");
        println!("  config:     {}", config.name);
        println!("  catalogue:  {catalogue_path}");
        println!("  db:         {db}");
        println!();
    }

    let assembler = PackAssembler::new(Arc::new(catalogue));
    let opened = assembler.generate_batch(&config, seed, packs)?;

    let mut store = PackStore::open(db)?;
    store.migrate()?;
    let mut recorded = 0usize;
    for pack in &opened {
        if store.record_pack(pack)? {
            recorded += 1;
        }
    }
    log::info!(
        "{run_id}: recorded {recorded} new packs in {db} ({} already present)",
        opened.len() - recorded
    );

    let report = DistributionReport::from_packs(&opened);
    if json {
        let summary = RunSummary {
            run_id: &run_id,
            config: &config.name,
            master_seed: seed,
            report: &report,
            expected_rarity: expected_rarity_frequencies(&config),
            expected_holo_rate: expected_holo_rate(&config),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for pack in opened.iter().take(show) {
            print_pack(pack);
        }
        print_report(&config, &report, store.pack_count()?);
    }
    Ok(())
}

fn print_pack(pack: &GeneratedPack) {
    let stats = pack.stats();
    println!(
        "pack {} | seed {} | design {} | best {}",
        pack.id(),
        pack.seed(),
        pack.design(),
        stats.best_rarity().map(|r| r.as_str()).unwrap_or("-")
    );
    for card in pack.cards() {
        println!(
            "    {:<10} {:<24} {:<8} {}",
            card.rarity().as_str(),
            card.id(),
            card.card.category,
            card.holo
        );
    }
}

fn print_report(config: &PackConfig, report: &DistributionReport, recorded: i64) {
    println!();
    println!("=== DISTRIBUTION ({} packs, {} cards) ===", report.packs, report.cards);
    for (rarity, expected) in expected_rarity_frequencies(config) {
        let observed = report.rarity_frequency(rarity);
        println!(
            "  {:<10} observed {:>7.4} | expected {:>7.4} {}",
            rarity.as_str(),
            observed,
            expected,
            verdict(observed, expected, report.cards)
        );
    }

    let expected_holo = expected_holo_rate(config);
    println!(
        "  {:<10} observed {:>7.4} | expected {:>7.4} {}",
        "holo",
        report.holo_rate(),
        expected_holo,
        verdict(report.holo_rate(), expected_holo, report.cards)
    );

    for (variant, expected) in expected_holo_frequencies(config) {
        if !variant.is_holo() {
            continue;
        }
        let observed = report.holo_frequency(variant);
        println!(
            "    {:<8} observed {:>7.4} | expected {:>7.4} {}",
            variant.as_str(),
            observed,
            expected,
            verdict(observed, expected, report.cards)
        );
    }

    println!();
    println!("=== DESIGNS ===");
    for (design, expected) in expected_design_frequencies(config) {
        let observed = report.design_frequency(&design);
        println!(
            "  {:<10} observed {:>7.4} | expected {:>7.4} {}",
            design,
            observed,
            expected,
            verdict(observed, expected, report.packs)
        );
    }

    println!();
    println!("  fallback draws: {}", report.fallback_draws);
    println!("  recorded packs: {recorded}");
}

fn verdict(observed: f64, expected: f64, trials: usize) -> &'static str {
    if within_tolerance(observed, expected, trials, RELATIVE_TOLERANCE, SIGMAS) {
        "ok"
    } else {
        "DRIFT"
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
