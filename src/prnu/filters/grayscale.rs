use crate::prnu::buffer::{ImageBuffer, RgbImageData};
use crate::prnu::common::error::{PrnuError, Result};

const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Converts interleaved RGB into luminance.
pub fn grayscale(rgb: &RgbImageData, output: &mut ImageBuffer) -> Result<()> {
    output.ensure_dims(rgb.height, rgb.width)?;
    if rgb.data.len() != rgb.pixel_count() * 3 {
        return Err(PrnuError::BufferLengthMismatch {
            expected: rgb.pixel_count() * 3,
            actual: rgb.data.len(),
        });
    }

    for (gray, pixel) in output.as_mut_slice().iter_mut().zip(rgb.data.chunks_exact(3)) {
        let r = pixel[0] as f64;
        let g = pixel[1] as f64;
        let b = pixel[2] as f64;
        *gray = RED_WEIGHT * r + GREEN_WEIGHT * g + BLUE_WEIGHT * b;
    }
    Ok(())
}
