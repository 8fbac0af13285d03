//! Zero-mean filter.
//!
//! Removes row and column banding by forcing the even-indexed and the
//! odd-indexed samples of every line to average to zero.

use crate::prnu::buffer::ImageBuffer;
use crate::prnu::common::error::{PrnuError, Result};

/// Subtracts the even-row and odd-row means from each column in place.
///
/// With an odd height the last row is part of the even group.
fn mean_vertically(image: &mut ImageBuffer) {
    let (h, w) = image.dims();
    let data = image.as_mut_slice();
    let odd_height = h % 2 == 1;

    for j in 0..w {
        let mut sum_even = 0.0;
        let mut sum_odd = 0.0;

        for i in (0..h - 1).step_by(2) {
            sum_even += data[i * w + j];
            sum_odd += data[(i + 1) * w + j];
        }
        if odd_height {
            sum_even += data[(h - 1) * w + j];
        }

        let mean_even = sum_even / h.div_ceil(2) as f64;
        let mean_odd = sum_odd / (h / 2) as f64;

        for i in (0..h - 1).step_by(2) {
            data[i * w + j] -= mean_even;
            data[(i + 1) * w + j] -= mean_odd;
        }
        if odd_height {
            data[(h - 1) * w + j] -= mean_even;
        }
    }
}

/// Applies the filter to `image` in place, first per column then per row.
///
/// `transposed` must be `width x height` and is overwritten.
pub fn zeromean(image: &mut ImageBuffer, transposed: &mut ImageBuffer) -> Result<()> {
    let (h, w) = image.dims();
    if h < 2 || w < 2 {
        return Err(PrnuError::InvalidDimensions(w, h));
    }
    transposed.ensure_dims(w, h)?;

    mean_vertically(image);
    image.transpose_into(transposed)?;
    mean_vertically(transposed);
    transposed.transpose_into(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(height: usize, width: usize) -> ImageBuffer {
        let data = (0..height * width)
            .map(|k| ((k * 37 + 11) % 23) as f64 - 9.5 + (k % 3) as f64 * 0.125)
            .collect();
        ImageBuffer::from_vec(height, width, data).unwrap()
    }

    fn group_means(values: &[f64]) -> (f64, f64) {
        let h = values.len();
        let mut even = 0.0;
        let mut odd = 0.0;
        for (i, v) in values.iter().enumerate() {
            if i % 2 == 0 || (h % 2 == 1 && i == h - 1) {
                even += v;
            } else {
                odd += v;
            }
        }
        (even / h.div_ceil(2) as f64, odd / (h / 2) as f64)
    }

    #[test]
    fn test_rows_and_columns_have_zero_group_means() {
        for &(h, w) in &[(4, 6), (5, 7), (6, 3), (2, 2)] {
            let mut image = pattern(h, w);
            let mut transposed = ImageBuffer::new(w, h);
            zeromean(&mut image, &mut transposed).unwrap();

            for i in 0..h {
                let (even, odd) = group_means(image.row(i));
                assert!(even.abs() < 1e-9 && odd.abs() < 1e-9, "row {} of {}x{}", i, h, w);
            }
            for j in 0..w {
                let column: Vec<f64> = (0..h).map(|i| image.get(i, j)).collect();
                let (even, odd) = group_means(&column);
                assert!(even.abs() < 1e-9 && odd.abs() < 1e-9, "column {} of {}x{}", j, h, w);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let mut image = pattern(7, 5);
        let mut transposed = ImageBuffer::new(5, 7);
        zeromean(&mut image, &mut transposed).unwrap();
        let once = image.clone();
        zeromean(&mut image, &mut transposed).unwrap();

        for (a, b) in once.as_slice().iter().zip(image.as_slice()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_odd_height_last_row_joins_even_group() {
        // column [1, 10, 4]: even group {1, 4} has mean 2.5, odd group {10}
        let mut image = ImageBuffer::from_vec(3, 1, vec![1.0, 10.0, 4.0]).unwrap();
        mean_vertically(&mut image);
        assert_eq!(image.as_slice(), &[-1.5, 0.0, 1.5]);
    }

    #[test]
    fn test_removes_column_banding() {
        let mut image = ImageBuffer::new(4, 4);
        for i in 0..4 {
            for j in 0..4 {
                image.set(i, j, if j == 1 { 5.0 } else { 0.0 });
            }
        }
        let mut transposed = ImageBuffer::new(4, 4);
        zeromean(&mut image, &mut transposed).unwrap();
        assert!(image.as_slice().iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_wrong_transpose_shape() {
        let mut image = pattern(3, 5);
        let mut transposed = ImageBuffer::new(3, 5);
        let result = zeromean(&mut image, &mut transposed);

        assert!(matches!(result, Err(PrnuError::DimensionMismatch { .. })));
        assert_eq!(image, pattern(3, 5));
    }
}
