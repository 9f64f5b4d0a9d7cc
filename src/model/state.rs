/// A marker type indicating that a model is **not yet trained**.
///
/// This phantom type is used in generic parameters (e.g.,
/// `LinearRanker<B, Unfitted>`) to enforce compile-time guarantees:
/// - Training methods (like `PairwiseTrainer::fit`) require an `Unfitted` model.
/// - Scoring is **not available** until the model is converted to `Fitted`.
///
/// This prevents accidental use of an untrained model for ranking.
pub struct Unfitted;

/// A marker type indicating that a model has been **fully trained**.
///
/// After training, a model is converted from `LinearRanker<B, Unfitted>` to
/// `LinearRanker<B, Fitted>`, which implements [`InferenceModel`] and can be
/// exported to the JSON model artifact or used for scoring.
///
/// A `Fitted` model contains **only inference parameters**; hyperparameters,
/// loss, and optimizer state stay behind in the trainer.
///
/// [`InferenceModel`]: crate::model::InferenceModel
pub struct Fitted;
