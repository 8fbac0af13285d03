use crate::prnu::buffer::RgbImageData;
use crate::prnu::common::error::Result;
use crate::prnu::config::ExtractionConfig;

pub trait RgbImageReader {
    fn read_rgb(&self, data: &[u8], config: &ExtractionConfig) -> Result<RgbImageData>;
}
