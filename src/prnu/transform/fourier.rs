use rustfft::num_complex::Complex64;

use crate::prnu::common::error::Result;

/// Unnormalized 2-D discrete Fourier transform bound to a fixed image size.
///
/// Both directions operate in place on a row-major `height * width` buffer.
/// Callers divide inverse results by `height * width`.
pub trait FourierTransform {
    fn height(&self) -> usize;
    fn width(&self) -> usize;
    fn forward(&mut self, buffer: &mut [Complex64]) -> Result<()>;
    fn inverse(&mut self, buffer: &mut [Complex64]) -> Result<()>;
}
