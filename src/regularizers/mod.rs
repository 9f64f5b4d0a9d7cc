use crate::backend::{Backend, Scalar, Tensor1D};
use crate::model::linear::{LinearParams, PairwiseRanker};
use crate::model::TrainableModel;

/// A penalty on model parameters, contributed to every gradient step.
///
/// Returns both the penalty value (reported in epoch diagnostics) and its
/// gradient with respect to the parameters (added to the loss gradient
/// before the optimizer step).
pub trait Regularizer<B: Backend, M: TrainableModel<B>> {
    fn penalty_grad(&self, model: &M) -> (Scalar<B>, M::Gradients);
}

/// L2 (ridge) regularization on the weight vector.
///
/// Penalty `0.5 * l2 * Σ w_k²` with gradient `l2 * w`. The bias carries a
/// zero gradient: it is never regularized.
pub struct L2 {
    strength: f64,
}

impl L2 {
    /// # Arguments
    /// * `strength` — regularization coefficient `l2` (>= 0)
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }
}

impl<B: Backend> Regularizer<B, PairwiseRanker<B>> for L2 {
    fn penalty_grad(
        &self,
        model: &PairwiseRanker<B>,
    ) -> (Scalar<B>, <PairwiseRanker<B> as TrainableModel<B>>::Gradients) {
        let params = model.params();
        let lambda = Scalar::<B>::new(self.strength);

        let weight_grad = params.weights.scale(&lambda);
        let penalty = Scalar::<B>::new(0.5) * lambda * params.weights.dot(&params.weights);

        (
            penalty,
            LinearParams {
                weights: weight_grad,
                bias: Scalar::<B>::new(0.),
            },
        )
    }
}

/// No-op regularizer: zero penalty, zero gradient.
pub struct NoRegularizer;

impl<B: Backend> Regularizer<B, PairwiseRanker<B>> for NoRegularizer {
    fn penalty_grad(
        &self,
        model: &PairwiseRanker<B>,
    ) -> (Scalar<B>, <PairwiseRanker<B> as TrainableModel<B>>::Gradients) {
        let dim = model.params().weights.len();

        (
            Scalar::<B>::new(0.),
            LinearParams {
                weights: Tensor1D::<B>::zeros(dim),
                bias: Scalar::<B>::new(0.),
            },
        )
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_l2_penalty_and_grad() {
        let model = PairwiseRanker::<CpuBackend>::from_params(LinearParams {
            weights: Tensor1D::new(vec![2.0, -4.0]),
            bias: Scalar::new(10.0),
        });

        let l2 = L2::new(0.5);
        let (penalty, grads) = l2.penalty_grad(&model);

        // 0.5 * 0.5 * (4 + 16) = 5
        assert_eq!(penalty.to_f64(), 5.0);
        assert_eq!(grads.weights.to_vec(), vec![1.0, -2.0]);
    }

    #[test]
    fn test_l2_never_touches_bias() {
        let model = PairwiseRanker::<CpuBackend>::from_params(LinearParams {
            weights: Tensor1D::new(vec![1.0]),
            bias: Scalar::new(123.0),
        });

        let (_, grads) = L2::new(10.0).penalty_grad(&model);
        assert_eq!(grads.bias.to_f64(), 0.0);
    }

    #[test]
    fn test_no_regularizer_is_zero() {
        let model = PairwiseRanker::<CpuBackend>::from_params(LinearParams {
            weights: Tensor1D::new(vec![3.0, 4.0]),
            bias: Scalar::new(1.0),
        });

        let (penalty, grads) = NoRegularizer.penalty_grad(&model);
        assert_eq!(penalty.to_f64(), 0.0);
        assert_eq!(grads.weights.to_vec(), vec![0.0, 0.0]);
        assert_eq!(grads.bias.to_f64(), 0.0);
    }
}
