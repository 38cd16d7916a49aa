//! Uncompressed 24-bit BMP writer.
//!
//! Layout: 14 byte file header, 40 byte info header, then pixel rows bottom to top,
//! each pixel as B, G, R and each row zero padded to a multiple of 4 bytes.
//! Every header field is written explicitly in little-endian at its own width.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;

use crate::error::{RenderError, Result};

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
pub const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Row size in bytes including padding.
pub fn padded_row_bytes(width: u32) -> u32 {
    return (width * 3 + 3) & !3;
}

/// Whole file in memory.
pub fn encode(image: &RgbImage) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let row_bytes = (width * 3) as usize;
    let padded_bytes = padded_row_bytes(width);
    let data_size = padded_bytes * height;
    let file_size = PIXEL_DATA_OFFSET + data_size;

    let mut out = Vec::with_capacity(file_size as usize);
    // BITMAPFILEHEADER
    out.extend_from_slice(&0x4D42u16.to_le_bytes());
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());
    // BITMAPINFOHEADER
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    let mut row = vec![0u8; padded_bytes as usize];
    for y in (0..height).rev() {
        for x in 0..width {
            let pixel = image.get_pixel(x, y);
            let i = 3 * x as usize;
            row[i] = pixel[2];
            row[i + 1] = pixel[1];
            row[i + 2] = pixel[0];
        }
        // Tail of the row stays zero from the allocation.
        debug_assert!(row[row_bytes..].iter().all(|&b| b == 0));
        out.extend_from_slice(&row);
    }
    return out;
}

/// Encodes and writes `image` to `path`, replacing any existing file.
pub fn save(path: &Path, image: &RgbImage) -> Result<()> {
    let file = File::create(path).map_err(|e| RenderError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&encode(image))
        .and_then(|_| writer.flush())
        .map_err(|e| RenderError::io(path, e))?;
    return Ok(());
}
