//! Zero-padded copy of an image used by the box convolutions.
//!
//! The backing storage is sized once for the largest border and relaid for
//! every smaller border: a buffer holding border `b` has stride `width + 2b`
//! and only its first `(height + 2b) * (width + 2b)` samples are meaningful.

use crate::prnu::buffer::image_buffer::{ImageBuffer, sample_count, try_alloc};
use crate::prnu::common::error::{PrnuError, Result};

#[derive(Debug, Clone)]
pub struct BorderedBuffer {
    height: usize,
    width: usize,
    max_border: usize,
    border: usize,
    data: Vec<f64>,
}

impl BorderedBuffer {
    /// Allocates padded storage for a `height x width` image with up to `max_border` samples on each side.
    pub fn try_new(height: usize, width: usize, max_border: usize) -> Result<Self> {
        let padded_h = height + 2 * max_border;
        let padded_w = width + 2 * max_border;
        let len = sample_count(padded_h, padded_w)?;
        Ok(Self {
            height,
            width,
            max_border,
            border: 0,
            data: try_alloc(len, 0.0)?,
        })
    }

    pub fn border(&self) -> usize {
        self.border
    }

    pub fn max_border(&self) -> usize {
        self.max_border
    }

    /// Row stride of the current layout.
    pub fn stride(&self) -> usize {
        self.width + 2 * self.border
    }

    /// Zeroes the padded region for `border` and copies `input` into its interior.
    pub fn copy_with_border(&mut self, input: &ImageBuffer, border: usize) -> Result<()> {
        input.ensure_dims(self.height, self.width)?;
        if border > self.max_border {
            return Err(PrnuError::InvalidFilterSize(2 * border + 1));
        }

        self.border = border;
        let stride = self.stride();
        let padded_len = (self.height + 2 * border) * stride;
        self.data[..padded_len].fill(0.0);

        for i in 0..self.height {
            let start = (i + border) * stride + border;
            self.data[start..start + self.width].copy_from_slice(input.row(i));
        }
        Ok(())
    }

    /// Box average with window `2 * border + 1` over the current layout.
    ///
    /// The divisor is always the full window area, so padded samples pull
    /// edge values towards zero.
    pub fn box_average_into(&self, output: &mut ImageBuffer) -> Result<()> {
        output.ensure_dims(self.height, self.width)?;
        let filter_size = 2 * self.border + 1;
        let stride = self.stride();
        let area = (filter_size * filter_size) as f64;
        let out = output.as_mut_slice();

        for i in 0..self.height {
            for j in 0..self.width {
                let mut sum = 0.0;
                for fi in 0..filter_size {
                    let row = (i + fi) * stride + j;
                    for fj in 0..filter_size {
                        sum += self.data[row + fj];
                    }
                }
                out[i * self.width + j] = sum / area;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_average_of_ones_with_border_one() {
        let ones = ImageBuffer::filled(5, 5, 1.0);
        let mut padded = BorderedBuffer::try_new(5, 5, 4).unwrap();
        let mut out = ImageBuffer::new(5, 5);

        padded.copy_with_border(&ones, 1).unwrap();
        padded.box_average_into(&mut out).unwrap();

        for i in 0..5 {
            for j in 0..5 {
                let on_row_edge = i == 0 || i == 4;
                let on_col_edge = j == 0 || j == 4;
                let expected = match (on_row_edge, on_col_edge) {
                    (true, true) => 4.0 / 9.0,
                    (true, false) | (false, true) => 6.0 / 9.0,
                    (false, false) => 1.0,
                };
                assert!(
                    (out.get(i, j) - expected).abs() < 1e-12,
                    "({}, {}) = {}",
                    i,
                    j,
                    out.get(i, j)
                );
            }
        }
    }

    #[test]
    fn test_relayout_clears_previous_padding() {
        let ones = ImageBuffer::filled(3, 4, 1.0);
        let mut padded = BorderedBuffer::try_new(3, 4, 4).unwrap();
        let mut wide = ImageBuffer::new(3, 4);
        let mut narrow = ImageBuffer::new(3, 4);

        padded.copy_with_border(&ones, 4).unwrap();
        padded.box_average_into(&mut wide).unwrap();
        padded.copy_with_border(&ones, 1).unwrap();
        padded.box_average_into(&mut narrow).unwrap();

        assert_eq!(padded.stride(), 6);
        assert!((narrow.get(1, 1) - 1.0).abs() < 1e-12);
        assert!((narrow.get(0, 0) - 4.0 / 9.0).abs() < 1e-12);
        assert!((wide.get(0, 0) - 12.0 / 81.0).abs() < 1e-12);
    }

    #[test]
    fn test_border_larger_than_capacity_is_rejected() {
        let image = ImageBuffer::new(4, 4);
        let mut padded = BorderedBuffer::try_new(4, 4, 1).unwrap();
        let result = padded.copy_with_border(&image, 2);
        assert!(matches!(result, Err(PrnuError::InvalidFilterSize(5))));
    }
}
