//! Camera RAW reader using the rawloader library.
//!
//! The Bayer mosaic is normalized between the sensor black and white levels,
//! quantized to 8 bits and demosaiced with the `bayer` crate, giving the same
//! RGB layout the standard decoders produce.

use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::prnu::buffer::RgbImageData;
use crate::prnu::common::error::{PrnuError, Result};
use crate::prnu::config::ExtractionConfig;
use crate::prnu::decode::reader::RgbImageReader;

/// RAW image reader that uses the rawloader library for decoding.
///
/// Supports any single-channel Bayer format rawloader can decode, such as
/// Sony ARW, Nikon NEF, Canon CR2 or DNG.
pub struct RawLoaderReader;

const OUTPUT_MAX: f32 = u8::MAX as f32;

fn cfa_pattern(name: &str) -> Result<CFA> {
    match name {
        "RGGB" => Ok(CFA::RGGB),
        "BGGR" => Ok(CFA::BGGR),
        "GRBG" => Ok(CFA::GRBG),
        "GBRG" => Ok(CFA::GBRG),
        other => Err(PrnuError::UnsupportedFormat(format!("CFA pattern {:?}", other))),
    }
}

/// Maps a sample between `black` and `white` onto `0..=255`.
fn quantize(value: f32, black: f32, white: f32) -> u8 {
    let range = (white - black).max(1.0);
    (((value - black).max(0.0) / range) * OUTPUT_MAX)
        .round()
        .clamp(0.0, OUTPUT_MAX) as u8
}

impl RgbImageReader for RawLoaderReader {
    fn read_rgb(&self, data: &[u8], _config: &ExtractionConfig) -> Result<RgbImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded =
            rawloader::decode(&mut Cursor::new(data)).map_err(|e| PrnuError::DecodeError(e.to_string()))?;

        let width = decoded.width;
        let height = decoded.height;
        debug!("Decoded RAW image: {}x{}, cpp={}", width, height, decoded.cpp);

        if decoded.cpp != 1 {
            return Err(PrnuError::UnsupportedFormat(format!(
                "{} components per pixel, expected a Bayer mosaic",
                decoded.cpp
            )));
        }
        let cfa = cfa_pattern(&decoded.cfa.name)?;

        let black = decoded.blacklevels[0] as f32;
        let white = decoded.whitelevels[0] as f32;

        // Float data is already normalized to 0.0-1.0
        let mosaic: Vec<u8> = match decoded.data {
            RawloaderImageData::Integer(values) => {
                values.iter().map(|&v| quantize(v as f32, black, white)).collect()
            }
            RawloaderImageData::Float(values) => {
                values.iter().map(|&v| quantize(v, 0.0, 1.0)).collect()
            }
        };

        let mut rgb = vec![0u8; width * height * 3];
        {
            let mut raster = RasterMut::new(width, height, RasterDepth::Depth8, &mut rgb);
            bayer::run_demosaic(
                &mut Cursor::new(&mosaic[..]),
                BayerDepth::Depth8,
                cfa,
                Demosaic::Linear,
                &mut raster,
            )
            .map_err(|e| PrnuError::DecodeError(format!("Demosaic failed: {:?}", e)))?;
        }

        debug!("Demosaiced with CFA={}, black={}, white={}", decoded.cfa.name, black, white);

        RgbImageData::new(width, height, rgb)
    }
}
