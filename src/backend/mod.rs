#[cfg(feature = "cpu")]
mod cpu;
#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
pub use ndarray_backend::NdarrayBackend;

pub mod backend;
pub mod scalar;
pub mod tensor1d;

pub use backend::Backend;
pub use scalar::{Scalar, ScalarOps};

pub use self::tensor1d::Tensor1D;
