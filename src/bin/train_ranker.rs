//! Trains a pairwise ranker from (applicants.jsonl, pairs.csv).
//!
//! Given pair (i, j, y), y=1 means i should rank higher than j. Minimizes
//! `sum log(1 + exp(-y' * (w·(xi-xj) + b))) + (l2/2)·||w||²` with y' in
//! {+1, -1}, and writes a JSON model suitable for the scoring side.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pairrank_rs::{
    CpuBackend, InMemoryPairs, PairDataset, PairwiseLogisticLoss, PairwiseRanker, PairwiseTrainer,
    L2, SGD,
};
use pairrank_rs::dataset::{load_applicants_jsonl, load_pairs_csv};

#[derive(Parser, Debug)]
#[command(
    name = "train-ranker",
    about = "Train a pairwise ranking model from labeled preference pairs"
)]
struct Args {
    /// Path to applicants.jsonl
    #[arg(long)]
    applicants: PathBuf,

    /// Path to pairs.csv
    #[arg(long)]
    pairs: PathBuf,

    /// Output model json
    #[arg(long, default_value = "rank_model.json")]
    out: PathBuf,

    /// Feature schema version tag written into the artifact
    #[arg(long, default_value_t = 2)]
    feature_version: u32,

    /// Feature vector length
    #[arg(long, default_value_t = 21)]
    dim: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.02)]
    lr: f64,

    /// Number of passes over the pair list
    #[arg(long, default_value_t = 60)]
    epochs: usize,

    /// L2 regularization strength (bias is not regularized)
    #[arg(long, default_value_t = 0.001)]
    l2: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let (features, skipped_applicants) = load_applicants_jsonl(&args.applicants)
        .with_context(|| format!("reading {}", args.applicants.display()))?;
    let (pairs, skipped_pairs) =
        load_pairs_csv(&args.pairs).with_context(|| format!("reading {}", args.pairs.display()))?;

    tracing::info!(
        applicants = features.len(),
        pairs = pairs.len(),
        skipped_applicants,
        skipped_pairs,
        "loaded training inputs"
    );

    let dataset = InMemoryPairs::new(features, pairs, args.dim)?;
    tracing::info!(
        dim = dataset.dim(),
        applicants = dataset.applicants(),
        dropped_features = dataset.dropped_features(),
        "dataset ready"
    );

    let model = PairwiseRanker::<CpuBackend>::new(args.dim);
    let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(args.lr), L2::new(args.l2))
        .epochs(args.epochs)
        .build();

    let fitted = trainer.fit(model, &dataset).context("training failed")?;

    let artifact = fitted.to_artifact(args.feature_version);
    artifact
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;

    println!("Wrote model -> {}", args.out.display());
    Ok(())
}
