//! Fourier transform service
//!
//! The Wiener stage only depends on the [`FourierTransform`] trait; the
//! default implementation is backed by `rustfft`.

mod fourier;
mod rustfft_2d;

pub use fourier::FourierTransform;
pub use rustfft::num_complex::Complex64;
pub use rustfft_2d::RustFft2d;
