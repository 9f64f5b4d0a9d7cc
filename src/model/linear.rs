use crate::backend::{Backend, Scalar, Tensor1D};
use crate::model::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use std::marker::PhantomData;

/// Parameters of the linear scoring function: a weight vector and a bias.
///
/// This is the mutable training state. It is owned by the model for the
/// duration of one run and exported to the JSON artifact at the end.
#[derive(Clone)]
pub struct LinearParams<B: Backend> {
    pub weights: Tensor1D<B>,
    pub bias: Scalar<B>,
}

impl<B: Backend> ParamOps<B> for LinearParams<B> {
    fn add(&self, other: &Self) -> Self {
        Self {
            weights: self.weights.add(&other.weights),
            bias: self.bias + other.bias,
        }
    }

    fn scale(&self, scalar: Scalar<B>) -> Self {
        Self {
            weights: self.weights.scale(&scalar),
            bias: self.bias * scalar,
        }
    }
}

/// Linear ranking model parametrized by backend and training state.
///
/// Ranks by `score(x) = weights · x + bias`, descending. During training the
/// forward pass is applied to the difference of two feature vectors, so the
/// predicted scalar is the raw margin of the pair.
pub struct LinearRanker<B: Backend, S> {
    params: LinearParams<B>,
    _state: PhantomData<S>,
}

impl<B: Backend, S> std::fmt::Debug for LinearRanker<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearRanker")
            .field("weights", &self.params.weights.to_vec())
            .field("bias", &self.params.bias.to_f64())
            .finish()
    }
}

impl<B: Backend> LinearRanker<B, Unfitted> {
    /// Creates an untrained ranker with zero weights and zero bias.
    pub fn new(dim: usize) -> Self {
        let params = LinearParams {
            weights: Tensor1D::<B>::zeros(dim),
            bias: Scalar::<B>::new(0.),
        };
        Self {
            params,
            _state: PhantomData,
        }
    }

    /// Resumes from existing parameters (e.g., a warm start).
    pub fn from_params(params: LinearParams<B>) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }

    /// Number of weight coordinates.
    pub fn dim(&self) -> usize {
        self.params.weights.len()
    }
}

impl<B: Backend> TrainableModel<B> for LinearRanker<B, Unfitted> {
    type Input = Tensor1D<B>;
    type Prediction = Scalar<B>;
    type Params = LinearParams<B>;
    type Gradients = LinearParams<B>;
    type Output = LinearRanker<B, Fitted>;

    /// Raw margin of a feature-difference vector: `w · dx + b`.
    fn forward(&self, dx: &Self::Input) -> Self::Prediction {
        self.params.weights.dot(dx) + self.params.bias
    }

    /// Gradients for one pair given `grad_output = dL/ds`:
    /// `dL/dw = grad_output * dx`, `dL/db = grad_output`.
    fn backward(&self, dx: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients {
        LinearParams {
            weights: dx.scale(grad_output),
            bias: *grad_output,
        }
    }

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn update_params(&mut self, new_params: &Self::Params) {
        self.params = new_params.clone();
    }

    fn into_fitted(self) -> LinearRanker<B, Fitted> {
        LinearRanker::<B, Fitted>::new(self.params)
    }
}

impl<B: Backend> LinearRanker<B, Fitted> {
    /// Creates a fitted ranker from final parameters.
    pub fn new(params: LinearParams<B>) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }

    pub fn params(&self) -> &LinearParams<B> {
        &self.params
    }
}

impl<B: Backend> InferenceModel<B> for LinearRanker<B, Fitted> {
    type Input = Tensor1D<B>;
    type Output = Scalar<B>;

    /// Scores a single applicant feature vector.
    fn predict(&self, input: &Self::Input) -> Self::Output {
        self.params.weights.dot(input) + self.params.bias
    }
}

/// Convenience alias for an untrained ranker.
pub type PairwiseRanker<B> = LinearRanker<B, Unfitted>;

// Удобный алиас для CPU
#[cfg(feature = "cpu")]
pub type CpuRanker = PairwiseRanker<crate::backend::CpuBackend>;

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_forward_is_margin() {
        let model = LinearRanker::<CpuBackend, Unfitted>::from_params(LinearParams {
            weights: Tensor1D::new(vec![0.5, -0.25]),
            bias: Scalar::new(0.1),
        });
        let dx = Tensor1D::new(vec![2.0, 4.0]);
        // 0.5*2 - 0.25*4 + 0.1 = 0.1
        assert!((model.forward(&dx).to_f64() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_backward_shapes_gradient() {
        let model = LinearRanker::<CpuBackend, Unfitted>::new(3);
        let dx = Tensor1D::new(vec![1.0, -1.0, 2.0]);
        let gscale = Scalar::<CpuBackend>::new(-0.5);
        let grads = model.backward(&dx, &gscale);
        assert_eq!(grads.weights.to_vec(), vec![-0.5, 0.5, -1.0]);
        assert_eq!(grads.bias.to_f64(), -0.5);
    }

    #[test]
    fn test_into_fitted_predicts() {
        let mut model = LinearRanker::<CpuBackend, Unfitted>::new(2);
        model.update_params(&LinearParams {
            weights: Tensor1D::new(vec![1.0, 2.0]),
            bias: Scalar::new(-1.0),
        });
        let fitted = model.into_fitted();
        let x = Tensor1D::new(vec![3.0, 0.5]);
        // 1*3 + 2*0.5 - 1 = 3
        assert_eq!(fitted.predict(&x).to_f64(), 3.0);
    }

    #[test]
    fn test_param_ops() {
        let a = LinearParams::<CpuBackend> {
            weights: Tensor1D::new(vec![1.0, 2.0]),
            bias: Scalar::new(0.5),
        };
        let b = LinearParams::<CpuBackend> {
            weights: Tensor1D::new(vec![-1.0, 1.0]),
            bias: Scalar::new(0.25),
        };
        let sum = a.add(&b);
        assert_eq!(sum.weights.to_vec(), vec![0.0, 3.0]);
        assert_eq!(sum.bias.to_f64(), 0.75);

        let scaled = sum.scale(Scalar::new(-2.0));
        assert_eq!(scaled.weights.to_vec(), vec![-0.0, -6.0]);
        assert_eq!(scaled.bias.to_f64(), -1.5);
    }
}
