//! PRNU extraction module
//!
//! Extracts the photo-response non-uniformity residual of a photograph:
//! luminance conversion, gradient denoising, zero-mean filtering and an
//! adaptive Wiener filter in the frequency domain. Decoding and residual
//! serialization live in their own submodules so the numeric core only ever
//! sees in-memory buffers.

pub mod buffer;
pub mod common;
pub mod config;
pub mod conversions;
pub mod decode;
pub mod extractor;
pub mod filters;
pub mod residual;
pub mod transform;

pub use common::{PrnuError, Result};

pub use buffer::{BorderedBuffer, ImageBuffer, RgbImageData};

pub use config::{
    ExtractionConfig,
    ExtractionConfigBuilder,
    InputFormat,
    ResidualFormat,
    TiffCompression,
};

pub use decode::{AutoImageReader, RawLoaderReader, RgbImageReader, StandardImageReader};

pub use extractor::PrnuExtractor;

pub use residual::{FormatResidualWriter, ResidualWriter, StandardTiffWriter, TextResidualWriter};

pub use transform::{Complex64, FourierTransform, RustFft2d};

pub use conversions::ImageToResidualPipeline;
