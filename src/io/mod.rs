use std::path::{Path};
use image::{RgbImage};

use super::{Error, PixelBuffer, Result};

pub mod cli;

// ----------------------------------------------------------------------------

/// Load the specified file into a `PixelBuffer`.
///
/// Any supported container is accepted; the pixels are converted to 8-bit RGB.
pub fn load_image(name: impl AsRef<Path>) -> Result<PixelBuffer> {
    let img = image::io::Reader::open(name)?
        .with_guessed_format()?
        .decode()
        .map_err(Error::Decode)?
        .to_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let samples = img.into_raw().into_iter().map(i32::from).collect();
    PixelBuffer::from_raw(width, height, samples)
}

/// Save `pixels` to the specified file. The format is chosen from the file
/// extension.
pub fn save_image(pixels: &PixelBuffer, name: impl AsRef<Path>) -> Result {
    let raw = pixels.to_samples().into_iter().map(
        |value| u8::try_from(value).map_err(|_| Error::ChannelOutOfRange {value})
    ).collect::<Result<Vec<u8>>>()?;
    let img = RgbImage::from_raw(pixels.width() as u32, pixels.height() as u32, raw)
        .ok_or(Error::InvalidParameter("Pixel data does not match width and height"))?;
    img.save(name).map_err(Error::Encode)
}

// ----------------------------------------------------------------------------
