//! Image decoding module
//!
//! Turns encoded files into the interleaved 8-bit RGB buffers the extractor
//! consumes.

mod auto_reader;
mod rawloader_reader;
mod reader;
mod standard_reader;

pub use auto_reader::AutoImageReader;
pub use rawloader_reader::RawLoaderReader;
pub use reader::RgbImageReader;
pub use standard_reader::StandardImageReader;
