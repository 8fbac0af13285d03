//! Image buffer types
//!
//! Every buffer carries its own dimensions so stage boundaries can check them.

mod bordered_buffer;
mod image_buffer;
mod rgb;

pub use bordered_buffer::BorderedBuffer;
pub use image_buffer::ImageBuffer;
pub(crate) use image_buffer::try_alloc;
pub use rgb::RgbImageData;
