use std::collections::HashMap;

use crate::dataset::{DataError, LabeledPair, PairDataset};

/// In-memory training data: applicant feature map plus ordered labeled pairs.
///
/// The constructor enforces the trainer's precondition that every feature
/// vector has exactly `dim` entries: vectors of any other length are dropped
/// (counted and warned about, never fatal). Pairs referencing dropped or
/// unknown identifiers stay in the list; the trainer skips them per epoch.
#[derive(Debug)]
pub struct InMemoryPairs {
    features: HashMap<String, Vec<f64>>,
    pairs: Vec<LabeledPair>,
    dim: usize,
    dropped_features: usize,
}

impl InMemoryPairs {
    pub fn new(
        features: HashMap<String, Vec<f64>>,
        pairs: Vec<LabeledPair>,
        dim: usize,
    ) -> Result<Self, DataError> {
        if dim == 0 {
            return Err(DataError::InvalidDimension(dim));
        }

        let before = features.len();
        let features: HashMap<String, Vec<f64>> = features
            .into_iter()
            .filter(|(id, x)| {
                let keep = x.len() == dim;
                if !keep {
                    tracing::warn!(id = %id, got = x.len(), expected = dim, "dropping feature vector with wrong length");
                }
                keep
            })
            .collect();
        let dropped_features = before - features.len();

        Ok(Self {
            features,
            pairs,
            dim,
            dropped_features,
        })
    }

    /// Number of feature vectors dropped for having length != dim.
    pub fn dropped_features(&self) -> usize {
        self.dropped_features
    }

    /// Number of distinct applicants with usable features.
    pub fn applicants(&self) -> usize {
        self.features.len()
    }
}

impl PairDataset for InMemoryPairs {
    fn dim(&self) -> usize {
        self.dim
    }

    fn features(&self, id: &str) -> Option<&[f64]> {
        self.features.get(id).map(Vec::as_slice)
    }

    fn pairs(&self) -> &[LabeledPair] {
        &self.pairs
    }
}
