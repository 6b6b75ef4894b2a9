//! Deterministic PNG writer.
//!
//! Fixed compression and filter settings give byte-identical files for
//! identical sheets. The png crate writes no timestamps or other variable
//! chunks.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType};
use thiserror::Error;

use crate::canvas::SheetCanvas;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unsupported PNG format: {color:?} at {depth:?}; expected 8-bit RGBA")]
    UnsupportedFormat { color: ColorType, depth: BitDepth },
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Smaller files, slower to write.
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Faster to write, larger files.
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a sheet canvas to a PNG file.
pub fn write_canvas(canvas: &SheetCanvas, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    write_canvas_to_writer(canvas, writer, config)
}

/// Write a sheet canvas as 8-bit RGBA to any writer.
pub fn write_canvas_to_writer<W: Write>(
    canvas: &SheetCanvas,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if canvas.width() == 0 || canvas.height() == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{} sheet cannot be stored as PNG",
            canvas.width(),
            canvas.height()
        )));
    }

    let mut encoder = Encoder::new(writer, canvas.width(), canvas.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&canvas.to_rgba8())?;

    Ok(())
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encode to a `Vec<u8>` and return the bytes with their hash.
pub fn encode_canvas_with_hash(
    canvas: &SheetCanvas,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_canvas_to_writer(canvas, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// A decoded 8-bit RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes.
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// The four channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Alpha of the pixel at `(x, y)`.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y)[3]
    }
}

/// Decode an 8-bit RGBA PNG, as written by this module.
pub fn read_rgba(bytes: &[u8]) -> Result<RgbaImage, PngError> {
    let decoder = Decoder::new(bytes);
    let mut reader = decoder.read_info()?;
    let mut data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data)?;
    if info.color_type != ColorType::Rgba || info.bit_depth != BitDepth::Eight {
        return Err(PngError::UnsupportedFormat {
            color: info.color_type,
            depth: info.bit_depth,
        });
    }
    data.truncate(info.buffer_size());
    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        data,
    })
}

/// Read and decode an 8-bit RGBA PNG file.
pub fn read_rgba_file(path: &Path) -> Result<RgbaImage, PngError> {
    let bytes = std::fs::read(path)?;
    read_rgba(&bytes)
}
