// =============================================================================
// Human or Worm — genbench dataset loading demo
// =============================================================================
//
// Downloads (once) the `demo_human_or_worm` benchmark, indexes a split and
// prints per-class counts plus the first batch of sequences.
//
// Features demonstrated:
//   1. Cache-aware download through the cloud cache
//   2. Named dataset builders and string split parsing
//   3. Train/validation split with a fixed seed
//   4. DataLoader batching into SequenceBatch
//
// Usage:
//   cargo run -p human_or_worm                              # train split, default cache
//   cargo run -p human_or_worm -- --split test
//   cargo run -p human_or_worm -- --cache-dir /tmp/gb --force
//   RUST_LOG=debug cargo run -p human_or_worm               # show cache decisions

use std::path::PathBuf;

use genbench_core::{default_cache_root, Result};
use genbench_data::{
    get_dataset, train_test_split, DataLoader, DataLoaderConfig, Dataset, SequenceBatch,
};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

struct Config {
    dataset: String,
    split: String,
    cache_dir: PathBuf,
    version: Option<u32>,
    force: bool,
    batch_size: usize,
    val_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: "demo_human_or_worm".to_string(),
            split: "train".to_string(),
            cache_dir: default_cache_root(),
            version: None,
            force: false,
            batch_size: 4,
            val_ratio: 0.1,
        }
    }
}

fn parse_args() -> Config {
    let mut cfg = Config::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dataset" => {
                i += 1;
                cfg.dataset = args[i].clone();
            }
            "--split" => {
                i += 1;
                cfg.split = args[i].clone();
            }
            "--cache-dir" => {
                i += 1;
                cfg.cache_dir = PathBuf::from(&args[i]);
            }
            "--version" => {
                i += 1;
                cfg.version = Some(args[i].parse().expect("invalid --version"));
            }
            "--force" => cfg.force = true,
            "--batch-size" => {
                i += 1;
                cfg.batch_size = args[i].parse().expect("invalid --batch-size");
            }
            "--val-ratio" => {
                i += 1;
                cfg.val_ratio = args[i].parse().expect("invalid --val-ratio");
            }
            "--help" | "-h" => {
                println!("genbench dataset loading demo");
                println!();
                println!("Options:");
                println!("  --dataset <name>    Benchmark name (default: demo_human_or_worm)");
                println!("  --split <s>         train or test (default: train)");
                println!("  --cache-dir <path>  Cache root (default: ~/.genomic_benchmarks)");
                println!("  --version <n>       Dataset version (default: latest)");
                println!("  --force             Discard the cached copy and download again");
                println!("  --batch-size <n>    Batch size (default: 4)");
                println!("  --val-ratio <f>     Fraction held out for validation (default: 0.1)");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    cfg
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cfg = parse_args();

    let mut builder = get_dataset(&cfg.dataset, &cfg.split)?
        .cache_root(&cfg.cache_dir)
        .force_download(cfg.force);
    if let Some(v) = cfg.version {
        builder = builder.version(v);
    }
    let ds = builder.build()?;

    println!("{} / {}: {} sequences", ds.name(), ds.split(), ds.len());
    for (label, (name, count)) in ds
        .class_names()
        .iter()
        .zip(ds.class_counts())
        .enumerate()
    {
        println!("  [{label}] {name:<20} {count}");
    }

    let splits = train_test_split(&ds, &[1.0 - cfg.val_ratio, cfg.val_ratio], 42)?;
    println!(
        "holdout: {} for fitting, {} for validation",
        splits[0].len(),
        splits[1].len()
    );

    let config = DataLoaderConfig::default()
        .batch_size(cfg.batch_size)
        .seed(42);
    let mut loader = DataLoader::new(&ds, config);
    log::info!("{} batches of up to {}", loader.num_batches(), cfg.batch_size);

    if let Some(first) = loader.iter_batches().next() {
        let batch: SequenceBatch = first?.into_iter().collect();
        for (seq, label) in batch.sequences.iter().zip(&batch.labels) {
            let preview: String = seq.chars().take(40).collect();
            println!("  {label}  {preview}");
        }
    }
    Ok(())
}
