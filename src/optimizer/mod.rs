use crate::backend::{Backend, Scalar};
use crate::model::linear::LinearParams;

/// Trait for gradient-based optimizers.
///
/// Optimizers are responsible for updating model parameters based on computed
/// gradients. Training logic (`PairwiseTrainer`) is decoupled from parameter
/// update logic, so any model can be paired with any optimizer while keeping
/// full type safety without dynamic dispatch.
///
/// # Type Parameters
/// * `B` — computation backend implementing [`Backend`]
/// * `P` — model parameters type (e.g., [`LinearParams`])
pub trait Optimizer<B: Backend, P> {
    /// Performs an optimization step using the update rule:
    /// ```text
    /// params_new = params - learning_rate * gradients
    /// ```
    ///
    /// This method does not mutate inputs; it returns a new value, which
    /// simplifies state management in the per-pair training loop.
    fn step(&self, params: &P, gradients: &P) -> P;
}

/// Stochastic Gradient Descent (SGD) optimizer.
///
/// The simplest first-order optimizer, applied here once per labeled pair
/// (online SGD): later pairs in the same epoch see the updated parameters.
/// That ordering dependence is part of the trainer's reproducibility
/// contract, not an implementation detail.
///
/// Stateless by design (no momentum, no adaptive learning rates).
///
/// # Example
/// ```
/// use pairrank_rs::backend::CpuBackend;
/// use pairrank_rs::optimizer::SGD;
///
/// let optimizer = SGD::<CpuBackend>::new(0.02);
/// assert_eq!(optimizer.learning_rate(), 0.02);
/// ```
#[derive(Clone)]
pub struct SGD<B: Backend> {
    /// Learning rate. Stored as a backend scalar to enable type-safe
    /// arithmetic with tensors.
    lr: Scalar<B>,
}

impl<B: Backend> SGD<B> {
    /// Creates a new SGD optimizer with the specified learning rate.
    ///
    /// # Arguments
    /// * `lr` — learning rate (positive value, typically in range 1e-4 .. 1e-1)
    pub fn new(lr: f64) -> Self {
        Self {
            lr: Scalar::<B>::new(lr),
        }
    }

    /// Returns the current learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.lr.to_f64()
    }
}

impl<B: Backend> Optimizer<B, LinearParams<B>> for SGD<B> {
    fn step(&self, params: &LinearParams<B>, grads: &LinearParams<B>) -> LinearParams<B> {
        // weights_new = weights - lr * grad_weights
        // Using (-lr) enables single scaling operation instead of scale + subtract
        let neg_lr = Scalar::<B>::new(0.0) - self.lr;
        let scaled_grad = grads.weights.scale(&neg_lr);
        let weights_update = params.weights.add(&scaled_grad);

        // bias_new = bias - lr * grad_bias
        let scaled_bias_grad = grads.bias * self.lr;
        let bias_update = params.bias - scaled_bias_grad;

        LinearParams {
            weights: weights_update,
            bias: bias_update,
        }
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::{CpuBackend, Tensor1D};

    #[test]
    fn test_step_moves_against_gradient() {
        let params = LinearParams::<CpuBackend> {
            weights: Tensor1D::new(vec![1.0, -1.0]),
            bias: Scalar::new(0.5),
        };
        let grads = LinearParams::<CpuBackend> {
            weights: Tensor1D::new(vec![0.5, -0.25]),
            bias: Scalar::new(-1.0),
        };

        // lr and values are powers of two, so the expected results are exact
        let sgd = SGD::<CpuBackend>::new(0.125);
        let updated = sgd.step(&params, &grads);

        assert_eq!(updated.weights.to_vec(), vec![0.9375, -0.96875]);
        assert_eq!(updated.bias.to_f64(), 0.625);
    }

    #[test]
    fn test_zero_gradient_is_identity() {
        let params = LinearParams::<CpuBackend> {
            weights: Tensor1D::new(vec![0.25, 0.75]),
            bias: Scalar::new(-0.125),
        };
        let grads = LinearParams::<CpuBackend> {
            weights: Tensor1D::zeros(2),
            bias: Scalar::new(0.0),
        };

        let sgd = SGD::<CpuBackend>::new(0.5);
        let updated = sgd.step(&params, &grads);

        assert_eq!(updated.weights.to_vec(), params.weights.to_vec());
        assert_eq!(updated.bias.to_f64(), params.bias.to_f64());
    }
}
