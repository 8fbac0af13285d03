use std::io::Write;

use crate::prnu::buffer::ImageBuffer;
use crate::prnu::common::error::Result;
use crate::prnu::config::{ExtractionConfig, ResidualFormat};
use crate::prnu::residual::standard_tiff_writer::StandardTiffWriter;
use crate::prnu::residual::text_writer::TextResidualWriter;
use crate::prnu::residual::writer::ResidualWriter;

/// Picks the TIFF or text writer from `config.output_format`.
pub struct FormatResidualWriter;

impl ResidualWriter for FormatResidualWriter {
    fn write_residual(&self, residual: &ImageBuffer, output: &mut dyn Write, config: &ExtractionConfig) -> Result<()> {
        match config.output_format {
            ResidualFormat::Tiff => StandardTiffWriter.write_residual(residual, output, config),
            ResidualFormat::Text => TextResidualWriter.write_residual(residual, output, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let residual = ImageBuffer::filled(2, 3, 0.25);

        let mut tiff = Vec::new();
        FormatResidualWriter
            .write_residual(&residual, &mut tiff, &ExtractionConfig::default())
            .unwrap();
        assert!(tiff.starts_with(b"II") || tiff.starts_with(b"MM"));

        let config = ExtractionConfig::builder().output_format(ResidualFormat::Text).build();
        let mut text = Vec::new();
        FormatResidualWriter.write_residual(&residual, &mut text, &config).unwrap();
        assert_eq!(text, b"0.250000 0.250000 0.250000 \n0.250000 0.250000 0.250000 \n");
    }
}
