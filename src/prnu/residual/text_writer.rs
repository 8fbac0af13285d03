use std::io::{BufWriter, Write};

use tracing::debug;

use crate::prnu::buffer::ImageBuffer;
use crate::prnu::common::error::Result;
use crate::prnu::config::ExtractionConfig;
use crate::prnu::residual::writer::ResidualWriter;

/// Debug dump: one image row per line, each value printed with six decimals
/// and followed by a space.
pub struct TextResidualWriter;

impl ResidualWriter for TextResidualWriter {
    fn write_residual(&self, residual: &ImageBuffer, output: &mut dyn Write, _config: &ExtractionConfig) -> Result<()> {
        debug!("Writing residual as text: {}x{}", residual.width(), residual.height());

        let mut out = BufWriter::new(output);
        for i in 0..residual.height() {
            for value in residual.row(i) {
                write!(out, "{:.6} ", value)?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}
