//! 2-D DFT built from 1-D `rustfft` plans: all rows, then all columns.

use std::sync::Arc;

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use tracing::debug;

use crate::prnu::buffer::try_alloc;
use crate::prnu::common::error::{PrnuError, Result};
use crate::prnu::transform::fourier::FourierTransform;

struct Plans {
    rows: Arc<dyn Fft<f64>>,
    columns: Arc<dyn Fft<f64>>,
}

pub struct RustFft2d {
    height: usize,
    width: usize,
    forward: Plans,
    inverse: Plans,
    column: Vec<Complex64>,
    scratch: Vec<Complex64>,
}

impl RustFft2d {
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(PrnuError::InvalidDimensions(width, height));
        }

        let mut planner = FftPlanner::<f64>::new();
        let forward = Plans {
            rows: planner.plan_fft_forward(width),
            columns: planner.plan_fft_forward(height),
        };
        let inverse = Plans {
            rows: planner.plan_fft_inverse(width),
            columns: planner.plan_fft_inverse(height),
        };

        let scratch_len = [&forward, &inverse]
            .iter()
            .flat_map(|p| [p.rows.get_inplace_scratch_len(), p.columns.get_inplace_scratch_len()])
            .max()
            .unwrap_or(0);

        debug!(height, width, scratch_len, "Planned 2-D FFT");

        Ok(Self {
            height,
            width,
            forward,
            inverse,
            column: try_alloc(height, Complex64::new(0.0, 0.0))?,
            scratch: try_alloc(scratch_len, Complex64::new(0.0, 0.0))?,
        })
    }

    fn check_len(&self, buffer: &[Complex64]) -> Result<()> {
        let expected = self.height * self.width;
        if buffer.len() != expected {
            return Err(PrnuError::BufferLengthMismatch {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(())
    }

    fn run(
        plans: &Plans,
        width: usize,
        column: &mut [Complex64],
        scratch: &mut [Complex64],
        buffer: &mut [Complex64],
    ) {
        // the row plan walks every `width`-long chunk of the buffer
        plans.rows.process_with_scratch(buffer, scratch);

        let height = column.len();
        for j in 0..width {
            for i in 0..height {
                column[i] = buffer[i * width + j];
            }
            plans.columns.process_with_scratch(column, scratch);
            for i in 0..height {
                buffer[i * width + j] = column[i];
            }
        }
    }
}

impl FourierTransform for RustFft2d {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn forward(&mut self, buffer: &mut [Complex64]) -> Result<()> {
        self.check_len(buffer)?;
        Self::run(&self.forward, self.width, &mut self.column, &mut self.scratch, buffer);
        Ok(())
    }

    fn inverse(&mut self, buffer: &mut [Complex64]) -> Result<()> {
        self.check_len(buffer)?;
        Self::run(&self.inverse, self.width, &mut self.column, &mut self.scratch, buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(height: usize, width: usize) -> Vec<Complex64> {
        (0..height * width)
            .map(|k| Complex64::new(((k * 31) % 17) as f64 - 8.0, 0.0))
            .collect()
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let (h, w) = (6, 10);
        let original = signal(h, w);
        let mut buffer = original.clone();
        let mut fft = RustFft2d::new(h, w).unwrap();

        fft.forward(&mut buffer).unwrap();
        fft.inverse(&mut buffer).unwrap();

        let n = (h * w) as f64;
        for (a, b) in buffer.iter().zip(&original) {
            assert!((a.re / n - b.re).abs() < 1e-9);
            assert!((a.im / n).abs() < 1e-9);
        }
    }

    #[test]
    fn test_dc_bin_is_unnormalized_sum() {
        let (h, w) = (4, 3);
        let mut buffer = signal(h, w);
        let total: f64 = buffer.iter().map(|c| c.re).sum();
        let mut fft = RustFft2d::new(h, w).unwrap();

        fft.forward(&mut buffer).unwrap();

        assert!((buffer[0].re - total).abs() < 1e-9);
        assert!(buffer[0].im.abs() < 1e-9);
    }

    #[test]
    fn test_matches_direct_dft() {
        let (h, w) = (3, 5);
        let input = signal(h, w);
        let mut buffer = input.clone();
        let mut fft = RustFft2d::new(h, w).unwrap();
        fft.forward(&mut buffer).unwrap();

        for u in 0..h {
            for v in 0..w {
                let mut expected = Complex64::new(0.0, 0.0);
                for i in 0..h {
                    for j in 0..w {
                        let angle = -2.0
                            * std::f64::consts::PI
                            * ((u * i) as f64 / h as f64 + (v * j) as f64 / w as f64);
                        expected += input[i * w + j] * Complex64::from_polar(1.0, angle);
                    }
                }
                let got = buffer[u * w + v];
                assert!((got - expected).norm() < 1e-9, "bin ({}, {})", u, v);
            }
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        let mut fft = RustFft2d::new(4, 4).unwrap();
        let mut buffer = vec![Complex64::new(0.0, 0.0); 15];
        assert!(fft.forward(&mut buffer).is_err());
    }
}
