use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::prnu::{
    buffer::ImageBuffer,
    common::error::{PrnuError, Result},
    config::ExtractionConfig,
    decode::{AutoImageReader, RgbImageReader},
    extractor::PrnuExtractor,
    residual::{FormatResidualWriter, ResidualWriter},
};

/// Decodes images, extracts their PRNU residual and writes it out.
///
/// The extractor is kept between calls and rebuilt only when the image size
/// changes, so a batch of photos from one camera allocates once.
pub struct ImageToResidualPipeline<R: RgbImageReader, W: ResidualWriter> {
    reader: R,
    writer: W,
    config: ExtractionConfig,
    extractor: Option<PrnuExtractor>,
}

impl ImageToResidualPipeline<AutoImageReader, FormatResidualWriter> {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            reader: AutoImageReader,
            writer: FormatResidualWriter,
            config,
            extractor: None,
        }
    }
}

impl<R: RgbImageReader, W: ResidualWriter> ImageToResidualPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ExtractionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
            extractor: None,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width < 2 || height < 2 {
            return Err(PrnuError::InvalidDimensions(width, height));
        }

        if self.config.max_dimension.is_some_and(|max| width > max || height > max) {
            return Err(PrnuError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Returns the cached extractor, rebuilding it if the size changed.
    fn extractor_for(&mut self, height: usize, width: usize) -> Result<&mut PrnuExtractor> {
        let cached = match self.extractor.take() {
            Some(existing) if existing.height() == height && existing.width() == width => existing,
            stale => {
                if let Some(old) = stale {
                    old.destroy();
                }
                PrnuExtractor::new(height, width)?
            }
        };
        Ok(self.extractor.insert(cached))
    }

    /// Decodes `input_data`, extracts its residual and writes it to `output`.
    ///
    /// Returns the `(width, height)` of the processed image.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&mut self, input_data: &[u8], output: &mut dyn Write) -> Result<(usize, usize)> {
        info!("Starting PRNU extraction");

        let residual = self.extract(input_data)?;

        {
            let _span = tracing::info_span!("encode_residual").entered();
            self.writer.write_residual(&residual, output, &self.config)?;
        }

        info!(
            width = residual.width(),
            height = residual.height(),
            "Extraction complete"
        );
        Ok((residual.width(), residual.height()))
    }

    /// Decodes `input_data` and returns its residual without writing it.
    pub fn extract(&mut self, input_data: &[u8]) -> Result<ImageBuffer> {
        let rgb = {
            let _span = tracing::info_span!("decode_image").entered();
            self.reader.read_rgb(input_data, &self.config)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = rgb.width,
                height = rgb.height
            ).entered();
            self.validate_dimensions(rgb.width, rgb.height)?;
        }

        let _span = tracing::info_span!("extract_prnu").entered();
        self.extractor_for(rgb.height, rgb.width)?.extract(&rgb)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input_path: P,
        output_path: Q,
    ) -> Result<(usize, usize)> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PrnuError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let residual = self.extract(&input_data)?;

        // encoded in memory so a failed encode never leaves a partial file
        let mut encoded = Vec::new();
        {
            let _span = tracing::info_span!("encode_residual").entered();
            self.writer.write_residual(&residual, &mut encoded, &self.config)?;
        }

        {
            let _span = tracing::info_span!("write_output_file", bytes = encoded.len()).entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                PrnuError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok((residual.width(), residual.height()))
    }

    /// `(height, width)` of the cached extractor, if any.
    pub fn extractor_dimensions(&self) -> Option<(usize, usize)> {
        self.extractor.as_ref().map(|e| (e.height(), e.width()))
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ExtractionConfig) {
        self.config = config;
    }
}
