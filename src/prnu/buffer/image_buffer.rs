//! Real-valued image buffers shared by every filter stage.

use crate::prnu::common::error::{PrnuError, Result};

/// Row-major grid of `f64` samples with stride `width`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    height: usize,
    width: usize,
    data: Vec<f64>,
}

/// Number of samples in a `height x width` grid, rejecting overflow.
pub(crate) fn sample_count(height: usize, width: usize) -> Result<usize> {
    height
        .checked_mul(width)
        .ok_or(PrnuError::InvalidDimensions(width, height))
}

/// Allocates a vector of `len` copies of `value`, reporting allocation failure instead of aborting.
pub(crate) fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| PrnuError::AllocationError(format!("{} samples: {}", len, e)))?;
    data.resize(len, value);
    Ok(data)
}

impl ImageBuffer {
    /// Zero-filled buffer.
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, 0.0)
    }

    pub fn filled(height: usize, width: usize, value: f64) -> Self {
        Self {
            height,
            width,
            data: vec![value; height * width],
        }
    }

    /// Fallible zero-filled allocation used when sizing long-lived scratch space.
    pub fn try_new(height: usize, width: usize) -> Result<Self> {
        let len = sample_count(height, width)?;
        Ok(Self {
            height,
            width,
            data: try_alloc(len, 0.0)?,
        })
    }

    pub fn from_vec(height: usize, width: usize, data: Vec<f64>) -> Result<Self> {
        let expected = sample_count(height, width)?;
        if data.len() != expected {
            return Err(PrnuError::BufferLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Sum of squared samples.
    pub fn energy(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    pub fn ensure_dims(&self, height: usize, width: usize) -> Result<()> {
        if self.height != height || self.width != width {
            return Err(PrnuError::DimensionMismatch {
                expected: (height, width),
                actual: self.dims(),
            });
        }
        Ok(())
    }

    pub fn ensure_same_dims(&self, other: &ImageBuffer) -> Result<()> {
        other.ensure_dims(self.height, self.width)
    }

    /// Writes the transpose of `self` into `output`, which must be `width x height`.
    pub fn transpose_into(&self, output: &mut ImageBuffer) -> Result<()> {
        output.ensure_dims(self.width, self.height)?;
        let (h, w) = self.dims();
        for i in 0..h {
            for j in 0..w {
                output.data[j * h + i] = self.data[i * w + j];
            }
        }
        Ok(())
    }

    /// Pointwise `self = min(self, other)`.
    pub fn minimum_with(&mut self, other: &ImageBuffer) -> Result<()> {
        self.ensure_same_dims(other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = if *a < b { *a } else { b };
        }
        Ok(())
    }
}
