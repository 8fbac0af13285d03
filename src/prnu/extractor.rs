//! PRNU extractor
//!
//! Owns every buffer and transform plan needed for one image size and runs
//! grayscale, fastnoise, zero-mean and Wiener filtering in that order.

use tracing::{debug, debug_span};

use crate::prnu::buffer::{BorderedBuffer, ImageBuffer, RgbImageData, try_alloc};
use crate::prnu::common::error::{PrnuError, Result};
use crate::prnu::filters::{MAX_BORDER, WienerScratch, fastnoise, grayscale, wiener, zeromean};
use crate::prnu::transform::{Complex64, FourierTransform, RustFft2d};

/// Reusable extraction state for images of one fixed size.
///
/// The three scratch images change role between stages: `first` and
/// `second` hold the gradients during fastnoise and the squared magnitudes
/// and variance estimates during Wiener filtering, `third` receives each
/// box convolution.
pub struct PrnuExtractor<T: FourierTransform = RustFft2d> {
    height: usize,
    width: usize,
    first: ImageBuffer,
    second: ImageBuffer,
    third: ImageBuffer,
    transposed: ImageBuffer,
    padded: BorderedBuffer,
    forward: Vec<Complex64>,
    backward: Vec<Complex64>,
    transform: T,
}

impl PrnuExtractor<RustFft2d> {
    /// Allocates buffers and FFT plans for `height x width` images.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        validate_size(height, width)?;
        let transform = RustFft2d::new(height, width)?;
        Self::with_transform(height, width, transform)
    }
}

fn validate_size(height: usize, width: usize) -> Result<()> {
    if height < 2 || width < 2 {
        return Err(PrnuError::InvalidDimensions(width, height));
    }
    Ok(())
}

impl<T: FourierTransform> PrnuExtractor<T> {
    /// Same as [`PrnuExtractor::new`] with a caller-supplied transform service.
    pub fn with_transform(height: usize, width: usize, transform: T) -> Result<Self> {
        validate_size(height, width)?;
        if transform.height() != height || transform.width() != width {
            return Err(PrnuError::DimensionMismatch {
                expected: (height, width),
                actual: (transform.height(), transform.width()),
            });
        }

        let n = height * width;
        let extractor = Self {
            height,
            width,
            first: ImageBuffer::try_new(height, width)?,
            second: ImageBuffer::try_new(height, width)?,
            third: ImageBuffer::try_new(height, width)?,
            transposed: ImageBuffer::try_new(width, height)?,
            padded: BorderedBuffer::try_new(height, width, MAX_BORDER)?,
            forward: try_alloc(n, Complex64::new(0.0, 0.0))?,
            backward: try_alloc(n, Complex64::new(0.0, 0.0))?,
            transform,
        };

        debug!(height, width, "PRNU extractor initialized");
        Ok(extractor)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Extracts the PRNU residual of `rgb` into a new buffer.
    pub fn extract(&mut self, rgb: &RgbImageData) -> Result<ImageBuffer> {
        let mut residual = ImageBuffer::try_new(self.height, self.width)?;
        self.extract_into(rgb, &mut residual)?;
        Ok(residual)
    }

    /// Extracts the PRNU residual of `rgb` into `residual`.
    ///
    /// Sizes are checked before any buffer is touched, so a rejected call
    /// leaves the extractor ready for the next image.
    pub fn extract_into(&mut self, rgb: &RgbImageData, residual: &mut ImageBuffer) -> Result<()> {
        if rgb.height != self.height || rgb.width != self.width {
            return Err(PrnuError::DimensionMismatch {
                expected: (self.height, self.width),
                actual: (rgb.height, rgb.width),
            });
        }
        residual.ensure_dims(self.height, self.width)?;

        {
            let _span = debug_span!("grayscale").entered();
            grayscale(rgb, residual)?;
        }
        {
            let _span = debug_span!("fastnoise").entered();
            fastnoise(residual, &mut self.first, &mut self.second)?;
        }
        {
            let _span = debug_span!("zeromean").entered();
            zeromean(residual, &mut self.transposed)?;
        }
        {
            let _span = debug_span!("wiener").entered();
            let scratch = WienerScratch {
                forward: &mut self.forward,
                backward: &mut self.backward,
                squared_magnitudes: &mut self.first,
                estimates: &mut self.second,
                padded: &mut self.padded,
                convolution: &mut self.third,
            };
            wiener(residual, &mut self.transform, scratch)?;
        }
        Ok(())
    }

    /// Releases all buffers and plans.
    pub fn destroy(self) {
        debug!(height = self.height, width = self.width, "PRNU extractor released");
    }
}
