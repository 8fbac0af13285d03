//! Pipeline conversions module
//!
//! This module contains orchestration logic for file-level residual extraction.

mod image_to_residual;


pub use image_to_residual::ImageToResidualPipeline;
