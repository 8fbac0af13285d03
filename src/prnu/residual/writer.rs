use std::io::Write;

use crate::prnu::buffer::ImageBuffer;
use crate::prnu::common::error::Result;
use crate::prnu::config::ExtractionConfig;

pub trait ResidualWriter {
    fn write_residual(&self, residual: &ImageBuffer, output: &mut dyn Write, config: &ExtractionConfig) -> Result<()>;
}
