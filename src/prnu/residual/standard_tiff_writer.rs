use std::io::Write;

use tiff::encoder::colortype::Gray64Float;
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::prnu::buffer::ImageBuffer;
use crate::prnu::common::error::{PrnuError, Result};
use crate::prnu::config::{ExtractionConfig, TiffCompression};
use crate::prnu::residual::writer::ResidualWriter;

/// Writes the residual as a single channel 64-bit float TIFF.
pub struct StandardTiffWriter;

impl ResidualWriter for StandardTiffWriter {
    fn write_residual(&self, residual: &ImageBuffer, output: &mut dyn Write, config: &ExtractionConfig) -> Result<()> {
        debug!("Encoding residual TIFF: {}x{}", residual.width(), residual.height());

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| PrnuError::EncodeError(e.to_string()))?
            .with_compression(compression);

        // horizontal differencing is integer-only and the encoder has no
        // floating point predictor
        if let Some(requested) = config.predictor {
            debug!("Predictor {} not applicable to float samples, writing unpredicted", requested);
        }
        encoder = encoder.with_predictor(Predictor::None);

        encoder
            .write_image::<Gray64Float>(residual.width() as u32, residual.height() as u32, residual.as_slice())
            .map_err(|e| PrnuError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::decoder::{Decoder, DecodingResult};

    fn sample() -> ImageBuffer {
        let data = (0..12).map(|k| k as f64 * 0.5 - 2.25).collect();
        ImageBuffer::from_vec(3, 4, data).unwrap()
    }

    fn decode(bytes: Vec<u8>) -> (u32, u32, Vec<f64>) {
        let mut decoder = Decoder::new(std::io::Cursor::new(bytes)).unwrap();
        let (w, h) = decoder.dimensions().unwrap();
        match decoder.read_image().unwrap() {
            DecodingResult::F64(values) => (w, h, values),
            _ => panic!("expected 64-bit float samples"),
        }
    }

    #[test]
    fn test_writes_float_samples() {
        let residual = sample();
        let mut out = Vec::new();
        StandardTiffWriter
            .write_residual(&residual, &mut out, &ExtractionConfig::default())
            .unwrap();

        let (w, h, values) = decode(out);
        assert_eq!((w, h), (4, 3));
        assert_eq!(values, residual.into_vec());
    }

    #[test]
    fn test_deflate_is_lossless() {
        let residual = sample();
        let config = ExtractionConfig::builder()
            .compression(TiffCompression::DeflateBalanced)
            .build();
        let mut out = Vec::new();
        StandardTiffWriter.write_residual(&residual, &mut out, &config).unwrap();

        let (_, _, values) = decode(out);
        assert_eq!(values, residual.into_vec());
    }

    #[test]
    fn test_horizontal_predictor_request_still_writes() {
        let residual = sample();
        let config = ExtractionConfig::builder()
            .compression(TiffCompression::Lzw)
            .predictor(Some(2))
            .build();
        let mut out = Vec::new();
        StandardTiffWriter.write_residual(&residual, &mut out, &config).unwrap();

        let (w, h, values) = decode(out);
        assert_eq!((w, h), (4, 3));
        assert_eq!(values, residual.into_vec());
    }
}
