//! Multi-scale local variance estimation.

use crate::prnu::buffer::{BorderedBuffer, ImageBuffer};
use crate::prnu::common::error::{PrnuError, Result};

/// Box filter window sizes, ascending.
pub const FILTER_SIZES: [usize; 4] = [3, 5, 7, 9];

pub const MAX_FILTER_SIZE: usize = 9;

/// Border needed to pad for the largest window.
pub const MAX_BORDER: usize = MAX_FILTER_SIZE / 2;

/// Per-sample minimum of the box averages of `input` over [`FILTER_SIZES`].
///
/// `padded` is relaid for every window size; `convolution` is scratch.
pub fn variance_estimates(
    estimates: &mut ImageBuffer,
    input: &ImageBuffer,
    padded: &mut BorderedBuffer,
    convolution: &mut ImageBuffer,
) -> Result<()> {
    variance_estimates_with_sizes(&FILTER_SIZES, estimates, input, padded, convolution)
}

/// Same as [`variance_estimates`] over an arbitrary list of odd window sizes.
pub fn variance_estimates_with_sizes(
    filter_sizes: &[usize],
    estimates: &mut ImageBuffer,
    input: &ImageBuffer,
    padded: &mut BorderedBuffer,
    convolution: &mut ImageBuffer,
) -> Result<()> {
    input.ensure_same_dims(estimates)?;
    input.ensure_same_dims(convolution)?;

    estimates.fill(f64::MAX);
    for &filter_size in filter_sizes {
        if filter_size % 2 == 0 {
            return Err(PrnuError::InvalidFilterSize(filter_size));
        }
        padded.copy_with_border(input, filter_size / 2)?;
        padded.box_average_into(convolution)?;
        estimates.minimum_with(convolution)?;
    }
    Ok(())
}
