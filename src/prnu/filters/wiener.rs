//! Adaptive Wiener filter in the frequency domain.
//!
//! Bins whose local variance (minimum box average of the squared magnitude
//! over several window sizes) exceeds the global variance of the residual are
//! attenuated; all others pass unchanged.

use crate::prnu::buffer::{BorderedBuffer, ImageBuffer};
use crate::prnu::common::error::{PrnuError, Result};
use crate::prnu::filters::variance::variance_estimates;
use crate::prnu::transform::{Complex64, FourierTransform};

/// Borrowed working space for one [`wiener`] call.
pub struct WienerScratch<'a> {
    pub forward: &'a mut [Complex64],
    pub backward: &'a mut [Complex64],
    pub squared_magnitudes: &'a mut ImageBuffer,
    pub estimates: &'a mut ImageBuffer,
    pub padded: &'a mut BorderedBuffer,
    pub convolution: &'a mut ImageBuffer,
}

/// `variance / max(variance, estimate)`, or 0 when the global variance is not positive.
pub fn wiener_scale(variance: f64, estimate: f64) -> f64 {
    if variance <= 0.0 {
        return 0.0;
    }
    variance / if variance > estimate { variance } else { estimate }
}

/// `sum(x^2) * n / (n - 1)`. Squares `image` in place.
fn global_variance(image: &mut ImageBuffer) -> f64 {
    let n = image.len();
    let data = image.as_mut_slice();
    for v in data.iter_mut() {
        *v *= *v;
    }
    let mut sum = 0.0;
    for v in data.iter() {
        sum += *v;
    }
    (sum * n as f64) / (n - 1) as f64
}

fn squared_magnitudes(frequencies: &[Complex64], output: &mut ImageBuffer) {
    for (out, c) in output.as_mut_slice().iter_mut().zip(frequencies) {
        *out = c.re * c.re + c.im * c.im;
    }
}

/// Writes `input` scaled per bin into `scaled`.
pub fn scale_with_variances(
    scaled: &mut [Complex64],
    input: &[Complex64],
    estimates: &ImageBuffer,
    variance: f64,
) {
    for ((out, c), &estimate) in scaled.iter_mut().zip(input).zip(estimates.as_slice()) {
        let scale = wiener_scale(variance, estimate);
        *out = Complex64::new(c.re * scale, c.im * scale);
    }
}

fn check_len(buffer: &[Complex64], expected: usize) -> Result<()> {
    if buffer.len() != expected {
        return Err(PrnuError::BufferLengthMismatch {
            expected,
            actual: buffer.len(),
        });
    }
    Ok(())
}

/// Applies the filter to `image` in place.
pub fn wiener<T: FourierTransform>(
    image: &mut ImageBuffer,
    transform: &mut T,
    scratch: WienerScratch<'_>,
) -> Result<()> {
    let (h, w) = image.dims();
    let n = h * w;
    if n < 2 {
        return Err(PrnuError::InvalidDimensions(w, h));
    }
    if transform.height() != h || transform.width() != w {
        return Err(PrnuError::DimensionMismatch {
            expected: (h, w),
            actual: (transform.height(), transform.width()),
        });
    }
    check_len(scratch.forward, n)?;
    check_len(scratch.backward, n)?;
    image.ensure_same_dims(scratch.squared_magnitudes)?;

    for (c, &v) in scratch.forward.iter_mut().zip(image.as_slice()) {
        *c = Complex64::new(v, 0.0);
    }
    transform.forward(scratch.forward)?;

    squared_magnitudes(scratch.forward, scratch.squared_magnitudes);
    variance_estimates(
        scratch.estimates,
        scratch.squared_magnitudes,
        scratch.padded,
        scratch.convolution,
    )?;

    let variance = global_variance(image);
    scale_with_variances(scratch.backward, scratch.forward, scratch.estimates, variance);

    transform.inverse(scratch.backward)?;

    let norm = n as f64;
    for (v, c) in image.as_mut_slice().iter_mut().zip(scratch.backward.iter()) {
        *v = c.re / norm;
    }
    Ok(())
}
