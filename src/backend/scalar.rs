use crate::backend::Backend;
use std::marker::PhantomData;

/// Trait for scalar operations required by numerical backends.
///
/// Defines the minimal arithmetic surface needed by the pairwise trainer:
/// standard arithmetic via `std::ops`, the exponential (for the logistic
/// loss), and `f64` conversion for host-side control flow and logging.
///
/// Implementations must satisfy:
/// - `Copy` + `Clone` for zero-cost abstractions
/// - `Send` + `Sync` for safe use across threads
pub trait ScalarOps:
    Clone
    + Copy
    + Send
    + Sync
    + std::ops::Add<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
{
    /// Returns the additive identity (zero) for this scalar type.
    fn zero() -> Self;
    /// Returns the multiplicative identity (one) for this scalar type.
    fn one() -> Self;
    /// Converts an `f64` value to this scalar type.
    fn from_f64(v: f64) -> Self;
    /// Converts this scalar to an `f64` value.
    fn to_f64(self) -> f64;
    /// Computes the exponential function `e^x`.
    fn exp(self) -> Self;
}

impl ScalarOps for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(v: f64) -> Self {
        v
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn exp(self) -> Self {
        self.exp()
    }
}

/// Backend-typed scalar wrapper providing compile-time type safety.
///
/// Wraps a backend's native scalar type (`B::Scalar`) while carrying phantom
/// type information about its originating backend. This prevents accidental
/// mixing of scalars from different backends at compile time.
#[derive(Clone, Debug, Copy)]
pub struct Scalar<B: Backend> {
    pub(crate) data: B::Scalar,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Scalar<B> {
    pub fn new(f: f64) -> Self {
        Self {
            data: B::scalar_f64(f),
            backend: PhantomData,
        }
    }

    /// Converts to an `f64` host value.
    ///
    /// Used for branching in the loss, metrics, and serialization.
    pub fn to_f64(&self) -> f64 {
        self.data.to_f64()
    }

    pub fn exp(&self) -> Self {
        Self {
            data: self.data.exp(),
            backend: PhantomData,
        }
    }
}

// Арифметические операции через std::ops
impl<B: Backend> std::ops::Add for Scalar<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            data: self.data + rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Sub for Scalar<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            data: self.data - rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Mul for Scalar<B> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            data: self.data * rhs.data,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> std::ops::Div for Scalar<B> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self {
            data: self.data / rhs.data,
            backend: PhantomData,
        }
    }
}
