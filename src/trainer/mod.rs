use std::collections::HashMap;
use std::marker::PhantomData;

use thiserror::Error;

use crate::backend::{Backend, Scalar, Tensor1D};
use crate::dataset::PairDataset;
use crate::loss::PairwiseLoss;
use crate::model::{ParamOps, TrainableModel};
use crate::optimizer::Optimizer;
use crate::regularizers::Regularizer;

/// Errors surfaced by a training run.
#[derive(Debug, Error)]
pub enum TrainError {
    /// Every pair in an epoch referenced an identifier absent from the
    /// feature map. The run aborts; there is nothing to retry against.
    #[error("epoch {epoch}: no usable pairs (identifiers not found in the feature map)")]
    NoUsablePairs { epoch: usize },
}

/// Orchestrates pairwise ranking training.
///
/// Combines a pairwise loss, an optimizer, and a regularizer to fit a model
/// on labeled preference pairs. Once built via [`PairwiseTrainerBuilder`] it
/// is immutable and can be reused across models (as long as types match).
///
/// Training is strictly sequential: epochs run in order, pairs within an
/// epoch run in input order, and each pair's gradient update is applied
/// before the next pair is processed. Later pairs in the same epoch see the
/// updated parameters; that ordering dependence is part of the contract.
/// Runs with identical inputs, hyperparameters, and pair order reproduce
/// bit-identical parameters.
pub struct PairwiseTrainer<B, L, O, M, P, R>
where
    B: Backend,
    L: PairwiseLoss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    R: Regularizer<B, M>,
{
    pub(crate) epochs: usize,
    pub(crate) loss_fn: L,
    pub(crate) optimizer: O,
    pub(crate) regularizer: R,
    _phantom_backend: PhantomData<B>,
    _phantom_model: PhantomData<(M, P)>,
}

/// Fluent builder for constructing a `PairwiseTrainer`.
///
/// Defaults:
/// - `epochs`: 60
pub struct PairwiseTrainerBuilder<B, L, O, M, P, R>
where
    B: Backend,
    L: PairwiseLoss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    R: Regularizer<B, M>,
{
    epochs: usize,
    loss_fn: L,
    optimizer: O,
    regularizer: R,
    _phantom_backend: PhantomData<B>,
    _phantom_model: PhantomData<(M, P)>,
}

impl<B, L, O, M, P, R> PairwiseTrainerBuilder<B, L, O, M, P, R>
where
    B: Backend,
    L: PairwiseLoss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    R: Regularizer<B, M>,
{
    /// Creates a new builder with the given components.
    ///
    /// # Arguments
    /// * `loss_fn` — pairwise loss (e.g., `PairwiseLogisticLoss`)
    /// * `optimizer` — parameter updater (e.g., `SGD`)
    /// * `regularizer` — penalty term (e.g., `L2` or `NoRegularizer`)
    pub fn new(loss_fn: L, optimizer: O, regularizer: R) -> Self {
        Self {
            epochs: 60,
            loss_fn,
            optimizer,
            regularizer,
            _phantom_backend: PhantomData,
            _phantom_model: PhantomData,
        }
    }

    /// Number of passes over the pair list (positive).
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn build(self) -> PairwiseTrainer<B, L, O, M, P, R> {
        PairwiseTrainer {
            epochs: self.epochs,
            loss_fn: self.loss_fn,
            optimizer: self.optimizer,
            regularizer: self.regularizer,
            _phantom_backend: PhantomData,
            _phantom_model: PhantomData,
        }
    }
}

impl<B, L, O, M, P, R> PairwiseTrainer<B, L, O, M, P, R>
where
    B: Backend,
    L: PairwiseLoss<B>,
    M: TrainableModel<B, Input = Tensor1D<B>, Prediction = Scalar<B>, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    R: Regularizer<B, M>,
    P: ParamOps<B>,
{
    /// Trains the model on the dataset's labeled pairs for `epochs` epochs.
    ///
    /// Per pair `(i, j, label)`:
    /// 1. Skip the pair if either identifier has no feature vector.
    /// 2. Map the label to a bipolar target `y ∈ {+1, -1}`.
    /// 3. Form the difference vector `dx = xi - xj` and the raw margin
    ///    `s = forward(dx)`; the signed margin is `z = y * s`.
    /// 4. Accumulate the loss value and obtain the gradient scale
    ///    `-y * sigmoid_term(z)`.
    /// 5. Apply the regularized gradient step immediately (online SGD).
    ///
    /// After each epoch the average loss over used pairs, the regularizer
    /// penalty, and the used-pair count are logged. These diagnostics are
    /// human-observable, not a machine contract.
    ///
    /// # Errors
    /// [`TrainError::NoUsablePairs`] if an epoch processes zero usable
    /// pairs; this is fatal and not retried.
    pub fn fit<D>(&self, mut model: M, dataset: &D) -> Result<M::Output, TrainError>
    where
        D: PairDataset,
    {
        // Convert referenced feature vectors to backend tensors once; the
        // per-epoch loop then only does lookups.
        let mut tensors: HashMap<&str, Tensor1D<B>> = HashMap::new();
        for pair in dataset.pairs() {
            for id in [pair.left.as_str(), pair.right.as_str()] {
                if !tensors.contains_key(id) {
                    if let Some(x) = dataset.features(id) {
                        tensors.insert(id, Tensor1D::<B>::new(x.to_vec()));
                    }
                }
            }
        }

        for epoch in 1..=self.epochs {
            let mut total_loss = 0.0;
            let mut used = 0usize;

            for pair in dataset.pairs() {
                let (Some(xi), Some(xj)) = (
                    tensors.get(pair.left.as_str()),
                    tensors.get(pair.right.as_str()),
                ) else {
                    continue;
                };

                let y = if pair.label { 1.0 } else { -1.0 };
                let dx = xi.sub(xj);
                let s = model.forward(&dx);
                let z = Scalar::<B>::new(y) * s;

                total_loss += self.loss_fn.loss(&z).to_f64();
                used += 1;

                let sig = self.loss_fn.sigmoid_term(&z);
                let gscale = Scalar::<B>::new(-y) * sig;
                let grads = model.backward(&dx, &gscale);
                let (_, reg_grad) = self.regularizer.penalty_grad(&model);

                let total_grads = grads.add(&reg_grad);
                let new_params = self.optimizer.step(model.params(), &total_grads);
                model.update_params(&new_params);
            }

            if used == 0 {
                return Err(TrainError::NoUsablePairs { epoch });
            }

            let (penalty, _) = self.regularizer.penalty_grad(&model);
            tracing::info!(
                epoch,
                avg_loss = total_loss / used as f64,
                l2term = penalty.to_f64(),
                used_pairs = used,
                "epoch complete"
            );
        }

        Ok(model.into_fitted())
    }
}

impl<B, L, O, M, P, R> PairwiseTrainer<B, L, O, M, P, R>
where
    B: Backend,
    L: PairwiseLoss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    R: Regularizer<B, M>,
{
    /// Convenience constructor that starts the builder pattern.
    pub fn builder(loss_fn: L, optimizer: O, regularizer: R) -> PairwiseTrainerBuilder<B, L, O, M, P, R> {
        PairwiseTrainerBuilder::new(loss_fn, optimizer, regularizer)
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::dataset::{InMemoryPairs, LabeledPair};
    use crate::loss::PairwiseLogisticLoss;
    use crate::model::linear::PairwiseRanker;
    use crate::model::InferenceModel;
    use crate::optimizer::SGD;
    use crate::regularizers::{NoRegularizer, L2};
    use std::collections::HashMap;

    fn feature_map(entries: &[(&str, Vec<f64>)]) -> HashMap<String, Vec<f64>> {
        entries
            .iter()
            .map(|(id, x)| (id.to_string(), x.clone()))
            .collect()
    }

    fn two_applicants() -> InMemoryPairs {
        InMemoryPairs::new(
            feature_map(&[("a", vec![1.0, 0.0]), ("b", vec![0.0, 1.0])]),
            vec![LabeledPair::new("a", "b", true)],
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_single_pair_single_epoch_update() {
        // From a zero model: dx = [1, -1], s = 0, z = 0, sig = 0.5,
        // gscale = -0.5; w -= 0.1 * (-0.5 * dx), b -= 0.1 * (-0.5).
        let dataset = two_applicants();
        let model = PairwiseRanker::<CpuBackend>::new(2);
        let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.1), NoRegularizer)
            .epochs(1)
            .build();

        let fitted = trainer.fit(model, &dataset).unwrap();
        assert_eq!(fitted.params().weights.to_vec(), vec![0.05, -0.05]);
        assert_eq!(fitted.params().bias.to_f64(), 0.05);
    }

    #[test]
    fn test_unknown_ids_are_skipped_not_fatal() {
        let dataset = InMemoryPairs::new(
            feature_map(&[("a", vec![1.0, 0.0]), ("b", vec![0.0, 1.0])]),
            vec![
                LabeledPair::new("ghost", "b", true),
                LabeledPair::new("a", "b", true),
                LabeledPair::new("a", "phantom", false),
            ],
            2,
        )
        .unwrap();

        let model = PairwiseRanker::<CpuBackend>::new(2);
        let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.1), NoRegularizer)
            .epochs(1)
            .build();

        // Only the middle pair is usable; the result must match the
        // single-pair run exactly.
        let fitted = trainer.fit(model, &dataset).unwrap();
        assert_eq!(fitted.params().weights.to_vec(), vec![0.05, -0.05]);
        assert_eq!(fitted.params().bias.to_f64(), 0.05);
    }

    #[test]
    fn test_zero_usable_pairs_is_fatal() {
        let dataset = InMemoryPairs::new(
            feature_map(&[("a", vec![1.0, 0.0])]),
            vec![LabeledPair::new("x", "y", true)],
            2,
        )
        .unwrap();

        let model = PairwiseRanker::<CpuBackend>::new(2);
        let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.1), NoRegularizer)
            .epochs(5)
            .build();

        let err = trainer.fit(model, &dataset).unwrap_err();
        assert!(matches!(err, TrainError::NoUsablePairs { epoch: 1 }));
    }

    #[test]
    fn test_empty_pair_list_is_fatal() {
        let dataset = InMemoryPairs::new(
            feature_map(&[("a", vec![1.0, 0.0])]),
            vec![],
            2,
        )
        .unwrap();

        let model = PairwiseRanker::<CpuBackend>::new(2);
        let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.1), NoRegularizer)
            .epochs(1)
            .build();

        assert!(trainer.fit(model, &dataset).is_err());
    }

    #[test]
    fn test_determinism_bit_for_bit() {
        let dataset = InMemoryPairs::new(
            feature_map(&[
                ("a", vec![0.9, 0.1, 0.3]),
                ("b", vec![0.2, 0.8, 0.5]),
                ("c", vec![0.4, 0.4, 0.9]),
            ]),
            vec![
                LabeledPair::new("a", "b", true),
                LabeledPair::new("b", "c", false),
                LabeledPair::new("a", "c", true),
            ],
            3,
        )
        .unwrap();

        let run = || {
            let model = PairwiseRanker::<CpuBackend>::new(3);
            let trainer =
                PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.02), L2::new(0.001))
                    .epochs(40)
                    .build();
            let fitted = trainer.fit(model, &dataset).unwrap();
            (fitted.params().weights.to_vec(), fitted.params().bias.to_f64())
        };

        let (w1, b1) = run();
        let (w2, b2) = run();
        assert_eq!(w1, w2);
        assert_eq!(b1.to_bits(), b2.to_bits());
    }

    #[test]
    fn test_training_improves_winning_margins() {
        // Winners consistently carry larger first coordinates; the fitted
        // model should, on average, score them above the losers where the
        // zero model scored every pair at margin 0.
        let dataset = InMemoryPairs::new(
            feature_map(&[
                ("w1", vec![1.0, 0.2]),
                ("w2", vec![0.9, 0.1]),
                ("l1", vec![0.1, 0.3]),
                ("l2", vec![0.2, 0.25]),
            ]),
            vec![
                LabeledPair::new("w1", "l1", true),
                LabeledPair::new("w2", "l2", true),
                LabeledPair::new("l1", "w2", false),
                LabeledPair::new("w1", "l2", true),
            ],
            2,
        )
        .unwrap();

        let model = PairwiseRanker::<CpuBackend>::new(2);
        let trainer = PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.1), L2::new(0.001))
            .epochs(100)
            .build();
        let fitted = trainer.fit(model, &dataset).unwrap();

        let score = |x: Vec<f64>| fitted.predict(&Tensor1D::new(x)).to_f64();
        let mean_winner_margin = (score(vec![1.0, 0.2]) - score(vec![0.1, 0.3])
            + score(vec![0.9, 0.1]) - score(vec![0.2, 0.25]))
            / 2.0;
        assert!(mean_winner_margin > 0.0);
    }

    #[test]
    fn test_l2_shrinks_weights_but_not_bias_direction() {
        let dataset = two_applicants();

        let fit_with = |l2: f64| {
            let model = PairwiseRanker::<CpuBackend>::new(2);
            let trainer =
                PairwiseTrainer::builder(PairwiseLogisticLoss, SGD::new(0.1), L2::new(l2))
                    .epochs(200)
                    .build();
            let fitted = trainer.fit(model, &dataset).unwrap();
            (fitted.params().weights.to_vec(), fitted.params().bias.to_f64())
        };

        let (w_free, b_free) = fit_with(0.0);
        let (w_reg, b_reg) = fit_with(0.5);

        // Strong regularization shrinks the weight norm
        let norm = |w: &[f64]| w.iter().map(|v| v * v).sum::<f64>();
        assert!(norm(&w_reg) < norm(&w_free));
        // The bias is not regularized and keeps pushing in the label's favor
        assert!(b_free > 0.0);
        assert!(b_reg > 0.0);
    }
}
