//! # pairrank-rs
//!
//! A pairwise ranking trainer: fits a linear scoring function that
//! reproduces a labeled preference ordering over applicant feature vectors,
//! using a Bradley-Terry/logistic pairwise model trained with online SGD.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: Models carry their training state in the type
//!   system (`Unfitted` vs `Fitted`), preventing invalid operations at
//!   compile time.
//! - **Training/Inference Separation**: Fitted models contain only scoring
//!   parameters; training logic lives in separate components (loss,
//!   optimizer, regularizer, trainer).
//! - **Backend Agnosticism**: the `Backend` trait decouples the math from
//!   tensor storage (`cpu` and `ndarray` features).
//! - **Reproducibility**: training is strictly sequential; identical inputs,
//!   hyperparameters, and pair order give bit-identical weights, and the
//!   JSON artifact rounds to a fixed precision for stable diffs.
//!
//! ## Quick Start
//!
//! ```
//! use pairrank_rs::{
//!     CpuBackend, InMemoryPairs, LabeledPair, PairwiseLogisticLoss, PairwiseRanker,
//!     PairwiseTrainer, NoRegularizer, SGD,
//! };
//! use std::collections::HashMap;
//!
//! let mut features = HashMap::new();
//! features.insert("a".to_string(), vec![1.0, 0.0]);
//! features.insert("b".to_string(), vec![0.0, 1.0]);
//! let pairs = vec![LabeledPair::new("a", "b", true)];
//! let dataset = InMemoryPairs::new(features, pairs, 2).unwrap();
//!
//! let model = PairwiseRanker::<CpuBackend>::new(2);
//! let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.1), NoRegularizer)
//!     .epochs(1)
//!     .build();
//!
//! let fitted = trainer.fit(model, &dataset).unwrap();
//! let artifact = fitted.to_artifact(2);
//! assert_eq!(artifact.weights, vec![0.05, -0.05]);
//! assert_eq!(artifact.bias, 0.05);
//! ```
//!
//! ## Module Structure
//!
//! - `backend` — tensor abstractions and computation primitives
//! - `model` — the linear ranker with stateful type parameters
//! - `loss` — the numerically stable pairwise logistic loss
//! - `optimizer` — per-pair SGD parameter updates
//! - `regularizers` — L2 weight penalty (bias never regularized)
//! - `trainer` — the epoch/pair training loop
//! - `dataset` — feature map + labeled pairs, JSONL/CSV loaders
//! - `serialization` — the flat JSON model artifact

pub mod backend;
pub mod dataset;
pub mod loss;
pub mod model;
pub mod optimizer;
pub mod regularizers;
pub mod serialization;
pub mod trainer;

pub use backend::{Backend, Scalar, ScalarOps, Tensor1D};

#[cfg(feature = "cpu")]
pub use backend::CpuBackend;
#[cfg(feature = "ndarray")]
pub use backend::NdarrayBackend;

pub use dataset::{InMemoryPairs, LabeledPair, PairDataset};
pub use loss::{PairwiseLogisticLoss, PairwiseLoss};
pub use model::linear::{LinearParams, LinearRanker, PairwiseRanker};
pub use model::{Fitted, InferenceModel, TrainableModel, Unfitted};
pub use optimizer::{Optimizer, SGD};
pub use regularizers::{NoRegularizer, Regularizer, L2};
pub use serialization::{ArtifactError, RankModel, ARTIFACT_PRECISION};
pub use trainer::{PairwiseTrainer, PairwiseTrainerBuilder, TrainError};

#[cfg(feature = "cpu")]
pub use model::linear::CpuRanker;
