//! Common utilities module
//!
//! This module contains shared utilities used across the PRNU pipeline.

pub mod error;

pub use error::{PrnuError, Result};
