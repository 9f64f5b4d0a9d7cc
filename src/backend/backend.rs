use super::scalar::ScalarOps;

/// Abstraction over numeric computation for training and scoring.
///
/// The `Backend` trait defines the minimal set of 1-D tensor operations the
/// pairwise trainer needs: construction, element-wise arithmetic, scaling,
/// reduction, and host access. Implementations provide concrete tensor types
/// while keeping a uniform API surface, so model and trainer code are written
/// once and instantiated per backend at compile time.
///
/// # Type Parameters
///
/// - `Scalar`: primitive numeric type with arithmetic capabilities
/// - `Tensor1D`: one-dimensional array representation
///
/// # Determinism
///
/// Training must reproduce bit-identical weights for identical inputs and
/// iteration order. Implementations must keep reductions sequential
/// (left to right) and must not reassociate floating-point operations.
pub trait Backend: Clone + Copy + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Constructs a 1D tensor from owned host data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    // --- Element-wise ops ---

    /// Element-wise addition of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths (backend-dependent behavior).
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise subtraction of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths (backend-dependent behavior).
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise multiplication of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths (backend-dependent behavior).
    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Multiplies each element of a tensor by a scalar.
    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    // --- Reductions ---

    /// Computes the sum of all elements in a 1D tensor.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    // --- Scalar ops (for loss gradients, lr updates) ---

    /// Creates a backend-specific scalar from an f64 value.
    fn scalar_f64(value: f64) -> Self::Scalar;

    // --- Access (for serialization / diagnostics) ---

    /// Converts a 1D tensor to a Vec of f64 values.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;
}
