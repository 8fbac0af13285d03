//! Filter stages of the PRNU pipeline
//!
//! Each stage works in place on caller-owned buffers and keeps no state
//! between calls.

pub mod fastnoise;
pub mod grayscale;
pub mod variance;
pub mod wiener;
pub mod zeromean;

pub use fastnoise::fastnoise;
pub use grayscale::grayscale;
pub use variance::{FILTER_SIZES, MAX_BORDER, MAX_FILTER_SIZE, variance_estimates};
pub use wiener::{WienerScratch, wiener, wiener_scale};
pub use zeromean::zeromean;
