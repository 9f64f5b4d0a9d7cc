use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod loaders;
pub mod memory;

pub use loaders::{load_applicants_jsonl, load_pairs_csv};
pub use memory::InMemoryPairs;

/// A labeled preference between two applicants.
///
/// `label == true` means `left` must rank at or above `right`
/// ("does left win over right"); `false` means at or below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPair {
    pub left: String,
    pub right: String,
    pub label: bool,
}

impl LabeledPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>, label: bool) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            label,
        }
    }
}

/// Errors from dataset construction and the external input interfaces.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid feature dimension: {0}")]
    InvalidDimension(usize),
}

/// Source of training data for the pairwise trainer: a feature map and an
/// ordered list of labeled pairs.
///
/// Implementations guarantee that every vector returned by `features` has
/// exactly `dim` entries; records violating that must be excluded before
/// they reach the trainer. Pairs referencing identifiers with no features
/// are the trainer's responsibility to drop.
pub trait PairDataset {
    /// Fixed feature-vector length for this run.
    fn dim(&self) -> usize;

    /// Feature vector for an applicant identifier, if known.
    fn features(&self, id: &str) -> Option<&[f64]>;

    /// Labeled pairs in input order. The trainer iterates them in exactly
    /// this order every epoch.
    fn pairs(&self) -> &[LabeledPair];

    /// Number of labeled pairs.
    fn len(&self) -> usize {
        self.pairs().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
