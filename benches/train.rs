use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pairrank_rs::{
    CpuBackend, InMemoryPairs, LabeledPair, PairwiseLogisticLoss, PairwiseRanker, PairwiseTrainer,
    L2, SGD,
};

const DIM: usize = 21;
const APPLICANTS: usize = 200;
const PAIRS: usize = 1000;

/// Deterministic synthetic dataset: feature values from a fixed recurrence,
/// labels consistent with the sum of the feature vector.
fn synthetic() -> InMemoryPairs {
    let mut features = HashMap::new();
    let mut sums = Vec::with_capacity(APPLICANTS);
    for a in 0..APPLICANTS {
        let x: Vec<f64> = (0..DIM)
            .map(|k| (((a * 31 + k * 17) % 97) as f64) / 97.0)
            .collect();
        sums.push(x.iter().sum::<f64>());
        features.insert(format!("id{a}"), x);
    }

    let pairs: Vec<LabeledPair> = (0..PAIRS)
        .map(|p| {
            let i = (p * 7) % APPLICANTS;
            let j = (p * 13 + 1) % APPLICANTS;
            LabeledPair::new(format!("id{i}"), format!("id{j}"), sums[i] >= sums[j])
        })
        .collect();

    InMemoryPairs::new(features, pairs, DIM).unwrap()
}

fn bench_fit(c: &mut Criterion) {
    let dataset = synthetic();
    let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.02), L2::new(0.001))
        .epochs(5)
        .build();

    c.bench_function("fit_5_epochs_1000_pairs", |b| {
        b.iter(|| {
            let model = PairwiseRanker::<CpuBackend>::new(DIM);
            black_box(trainer.fit(model, &dataset).unwrap())
        })
    });
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
