use super::scalar::Scalar;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor providing compile-time type safety.
///
/// Wraps a backend's native 1D tensor representation (`B::Tensor1D`) while
/// carrying phantom type information about its originating backend. This
/// prevents accidental mixing of tensors from different backends at compile
/// time while adding no runtime overhead (`PhantomData` is zero-sized).
///
/// # Precision semantics
/// - Constructors accept `Vec<f64>` and keep full double precision end to
///   end; the serialized model artifact depends on this for reproducible
///   12-decimal rounding.
/// - `to_vec()` returns `Vec<f64>` for host interoperability.
///
/// # Example
/// ```
/// use pairrank_rs::backend::CpuBackend;
/// use pairrank_rs::backend::{Scalar, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// assert_eq!(x.len(), 3);
///
/// let y = x.scale(&Scalar::<CpuBackend>::new(2.0));
/// assert_eq!(y.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(Clone)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor1D<B> {
    /// Creates a new 1D tensor from a vector of `f64` values.
    ///
    /// # Example
    /// ```
    /// use pairrank_rs::backend::CpuBackend;
    /// use pairrank_rs::backend::Tensor1D;
    ///
    /// let t: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.5, 3.75]);
    /// assert_eq!(t.to_vec(), vec![1.0, 2.5, 3.75]);
    /// ```
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: B::from_vec_1d(data),
            backend: PhantomData,
        }
    }

    /// Creates a 1D tensor filled with zeros of specified length.
    ///
    /// # Example
    /// ```
    /// use pairrank_rs::backend::CpuBackend;
    /// use pairrank_rs::backend::Tensor1D;
    ///
    /// let zeros: Tensor1D<CpuBackend> = Tensor1D::zeros(4);
    /// assert_eq!(zeros.to_vec(), vec![0.0, 0.0, 0.0, 0.0]);
    /// ```
    pub fn zeros(len: usize) -> Self {
        Self {
            data: B::zeros_1d(len),
            backend: PhantomData,
        }
    }

    /// Computes element-wise addition: `self + other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths (backend-dependent behavior).
    pub fn add(&self, other: &Self) -> Self {
        Self {
            data: B::add_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Computes element-wise subtraction: `self - other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths (backend-dependent behavior).
    ///
    /// # Example
    /// ```
    /// use pairrank_rs::backend::CpuBackend;
    /// use pairrank_rs::backend::Tensor1D;
    ///
    /// let a = Tensor1D::<CpuBackend>::new(vec![5.0, 7.0, 9.0]);
    /// let b = Tensor1D::<CpuBackend>::new(vec![2.0, 3.0, 4.0]);
    /// let diff = a.sub(&b);
    /// assert_eq!(diff.to_vec(), vec![3.0, 4.0, 5.0]);
    /// ```
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            data: B::sub_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Computes the dot product (inner product) between two tensors.
    ///
    /// # Formula
    /// `dot(a, b) = Σᵢ aᵢ * bᵢ`
    ///
    /// # Panics
    /// Panics if tensors have different lengths.
    ///
    /// # Example
    /// ```
    /// use pairrank_rs::backend::CpuBackend;
    /// use pairrank_rs::backend::Tensor1D;
    ///
    /// let a = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0, 3.0]);
    /// let b = Tensor1D::<CpuBackend>::new(vec![4.0, 5.0, 6.0]);
    /// // 1*4 + 2*5 + 3*6 = 32
    /// assert_eq!(a.dot(&b).to_f64(), 32.0);
    /// ```
    pub fn dot(&self, other: &Self) -> Scalar<B> {
        let prod = B::mul_1d(&self.data, &other.data);
        Scalar {
            data: B::sum_all_1d(&prod),
            backend: PhantomData,
        }
    }

    /// Scales the tensor by multiplying each element by a scalar value.
    ///
    /// # Example
    /// ```
    /// use pairrank_rs::backend::CpuBackend;
    /// use pairrank_rs::backend::{Scalar, Tensor1D};
    ///
    /// let t = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0, 3.0]);
    /// let scaled = t.scale(&Scalar::<CpuBackend>::new(2.5));
    /// assert_eq!(scaled.to_vec(), vec![2.5, 5.0, 7.5]);
    /// ```
    pub fn scale(&self, a: &Scalar<B>) -> Self {
        Self {
            data: B::mul_scalar_1d(&self.data, &a.data),
            backend: PhantomData,
        }
    }

    /// Converts the tensor to a standard Rust `Vec<f64>`.
    ///
    /// Used for serialization, test assertions, and logging; not intended
    /// for hot paths due to allocation overhead.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }

    /// Returns the number of elements in the tensor.
    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    /// Returns `true` if the tensor contains no elements.
    pub fn is_empty(&self) -> bool {
        B::len_1d(&self.data) == 0
    }
}
