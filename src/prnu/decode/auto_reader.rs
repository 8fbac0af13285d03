use image::ImageFormat;
use tracing::debug;

use crate::prnu::buffer::RgbImageData;
use crate::prnu::common::error::Result;
use crate::prnu::config::{ExtractionConfig, InputFormat};
use crate::prnu::decode::rawloader_reader::RawLoaderReader;
use crate::prnu::decode::reader::RgbImageReader;
use crate::prnu::decode::standard_reader::StandardImageReader;

/// Dispatches to the RAW or standard reader according to `config.input_format`.
///
/// In `Auto` mode most RAW formats look like TIFF containers, so anything
/// sniffed as TIFF or not recognized at all is offered to rawloader first and
/// falls back to the standard decoder.
pub struct AutoImageReader;

impl RgbImageReader for AutoImageReader {
    fn read_rgb(&self, data: &[u8], config: &ExtractionConfig) -> Result<RgbImageData> {
        match config.input_format {
            InputFormat::Standard => StandardImageReader.read_rgb(data, config),
            InputFormat::Raw => RawLoaderReader.read_rgb(data, config),
            InputFormat::Auto => match image::guess_format(data) {
                Ok(ImageFormat::Tiff) | Err(_) => RawLoaderReader.read_rgb(data, config).or_else(|e| {
                    debug!("RAW decode failed ({}), trying standard decoders", e);
                    StandardImageReader.read_rgb(data, config)
                }),
                Ok(format) => {
                    debug!("Detected {:?} input", format);
                    StandardImageReader.read_rgb(data, config)
                }
            },
        }
    }
}
