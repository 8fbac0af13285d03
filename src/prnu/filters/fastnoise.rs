//! Gradient denoising filter.
//!
//! Gradients are taken with one-sided differences on the first and last
//! sample of each line and centered differences elsewhere, normalized to
//! roughly unit length, and differentiated again to rebuild a smoothed image.

use crate::prnu::buffer::ImageBuffer;
use crate::prnu::common::error::{PrnuError, Result};

pub const EPS: f64 = 1.0;

/// Accumulates the vertical gradient of `input` into `output`.
fn gradient_vertical(input: &ImageBuffer, output: &mut ImageBuffer) {
    let (h, w) = input.dims();
    let src = input.as_slice();
    let dst = output.as_mut_slice();

    for j in 0..w {
        dst[j] += src[w + j] - src[j];
        dst[(h - 1) * w + j] += src[(h - 1) * w + j] - src[(h - 2) * w + j];

        for i in 1..h - 1 {
            dst[i * w + j] += 0.5 * (src[(i + 1) * w + j] - src[(i - 1) * w + j]);
        }
    }
}

/// Accumulates the horizontal gradient of `input` into `output`.
fn gradient_horizontal(input: &ImageBuffer, output: &mut ImageBuffer) {
    let (h, w) = input.dims();
    let src = input.as_slice();
    let dst = output.as_mut_slice();

    for i in 0..h {
        let row = i * w;
        dst[row] += src[row + 1] - src[row];
        dst[row + w - 1] += src[row + w - 1] - src[row + w - 2];

        for j in 1..w - 1 {
            dst[row + j] += 0.5 * (src[row + j + 1] - src[row + j - 1]);
        }
    }
}

/// Scales each `(dx, dy)` pair by `1 / (EPS + |(dx, dy)|)`.
fn normalize(dxs: &mut ImageBuffer, dys: &mut ImageBuffer) {
    for (dx, dy) in dxs.as_mut_slice().iter_mut().zip(dys.as_mut_slice()) {
        // The magnitude is taken in single precision.
        let norm = ((*dx * *dx + *dy * *dy) as f32).sqrt() as f64;
        let scale = 1.0 / (EPS + norm);
        *dx *= scale;
        *dy *= scale;
    }
}

/// Applies the filter to `image` in place. `dxs` and `dys` are overwritten.
pub fn fastnoise(image: &mut ImageBuffer, dxs: &mut ImageBuffer, dys: &mut ImageBuffer) -> Result<()> {
    let (h, w) = image.dims();
    if h < 2 || w < 2 {
        return Err(PrnuError::InvalidDimensions(w, h));
    }
    image.ensure_same_dims(dxs)?;
    image.ensure_same_dims(dys)?;

    dxs.fill(0.0);
    dys.fill(0.0);

    gradient_horizontal(image, dxs);
    gradient_vertical(image, dys);
    normalize(dxs, dys);

    image.fill(0.0);

    gradient_horizontal(dxs, image);
    gradient_vertical(dys, image);
    Ok(())
}
