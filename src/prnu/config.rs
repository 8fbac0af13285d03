//! Extraction pipeline configuration types

/// TIFF compression methods for residual output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// On-disk representation of the residual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidualFormat {
    /// Single channel 64-bit float TIFF
    Tiff,
    /// Plain text, one image row per line
    Text,
}

/// Which decoder handles the input bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Sniff the data: camera RAW first for TIFF-like containers, standard formats otherwise
    Auto,
    /// JPEG, PNG, TIFF, BMP
    Standard,
    /// Camera RAW (ARW, NEF, CR2, DNG, ...)
    Raw,
}

/// Configuration for image to residual extraction
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub output_format: ResidualFormat,
    /// Compression method used for TIFF output
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing).
    /// Float residual TIFFs are always written unpredicted.
    pub predictor: Option<u16>,
    /// Whether to validate image dimensions before extraction
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<usize>,
    pub input_format: InputFormat,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            output_format: ResidualFormat::Tiff,
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            max_dimension: None,
            input_format: InputFormat::Auto,
        }
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for ExtractionConfig
#[derive(Default)]
pub struct ExtractionConfigBuilder {
    output_format: Option<ResidualFormat>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    input_format: Option<InputFormat>,
}

impl ExtractionConfigBuilder {
    pub fn output_format(mut self, format: ResidualFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn input_format(mut self, format: InputFormat) -> Self {
        self.input_format = Some(format);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        let default = ExtractionConfig::default();
        ExtractionConfig {
            output_format: self.output_format.unwrap_or(default.output_format),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            input_format: self.input_format.unwrap_or(default.input_format),
        }
    }
}
