//! Decoder for common still-image formats backed by the `image` crate.

use tracing::debug;

use crate::prnu::buffer::RgbImageData;
use crate::prnu::common::error::{PrnuError, Result};
use crate::prnu::config::ExtractionConfig;
use crate::prnu::decode::reader::RgbImageReader;

/// Reads JPEG, PNG, TIFF and BMP data into 8-bit RGB.
///
/// Grayscale and alpha inputs are expanded or flattened to three channels;
/// higher bit depths are reduced to 8 bits.
pub struct StandardImageReader;

impl RgbImageReader for StandardImageReader {
    fn read_rgb(&self, data: &[u8], _config: &ExtractionConfig) -> Result<RgbImageData> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data).map_err(|e| PrnuError::DecodeError(e.to_string()))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        debug!("Decoded image: {}x{}", width, height);

        RgbImageData::new(width as usize, height as usize, rgb.into_raw())
    }
}
