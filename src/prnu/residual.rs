//! Residual output module
//!
//! Writers that serialize an extracted PRNU residual.

mod auto_writer;
mod standard_tiff_writer;
mod text_writer;
mod writer;

pub use auto_writer::FormatResidualWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use text_writer::TextResidualWriter;
pub use writer::ResidualWriter;
