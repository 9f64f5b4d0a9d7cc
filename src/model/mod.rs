pub mod state;
pub use state::{Fitted, Unfitted};

pub mod linear;
pub use crate::backend::{Backend, Scalar};

/// A model that can be fitted by the pairwise trainer.
///
/// For pairwise ranking the `Input` is the feature-difference vector
/// `dx = xi - xj` of one labeled pair and the `Prediction` is the scalar
/// raw margin `s = f(dx)`. `backward` maps the gradient of the loss with
/// respect to the prediction into per-parameter gradients.
pub trait TrainableModel<B: Backend> {
    type Input;
    type Prediction;
    type Params;
    type Gradients;
    type Output;

    fn forward(&self, input: &Self::Input) -> Self::Prediction;
    fn backward(&self, input: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients;
    fn params(&self) -> &Self::Params;
    fn update_params(&mut self, new_params: &Self::Params);

    fn into_fitted(self) -> Self::Output;
}

/// Arithmetic over parameter bundles, used to combine loss and regularizer
/// gradients and to apply optimizer steps.
pub trait ParamOps<B: Backend>: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, scalar: Scalar<B>) -> Self;
}

/// A fitted model usable for scoring.
pub trait InferenceModel<B: Backend> {
    type Input;
    type Output;

    /// Scores a single feature vector.
    fn predict(&self, input: &Self::Input) -> Self::Output;
}
