use multidimension::{Index, View};
use rayon::prelude::*;

use super::{ChannelMatrix, Cutoff, Grid, PixelBuffer, RGB, Result};
use super::reconstruct::{reconstruct};
use super::threshold::{check_ratio, count_zeros};
use super::transform::{forward_2d};

/// Returns the side length of the square that an image whose larger
/// dimension is `max_side` is padded to: the smallest power of two that is
/// at least `max_side`.
pub fn square_length(max_side: usize) -> usize {
    match max_side {
        0 ..= 2 => max_side,
        _ => max_side.next_power_of_two(),
    }
}

/// Returns the extent of the retained top-left quadrant for each progressive
/// stage of a square of side `side`, finest first.
///
/// There are `log2(side) + 1` stages, ending with the single DC coefficient.
pub fn stage_extents(side: usize) -> Vec<usize> {
    let mut extents = Vec::new();
    let mut active = 2 * side;
    while active > 1 {
        extents.push(active / 2);
        active /= 2;
    }
    extents
}

// ----------------------------------------------------------------------------

/// The wavelet coefficients of one image: one padded [`ChannelMatrix`] per
/// colour channel, already forward-transformed.
///
/// A `Decomposition` is never modified. Every compressed image is an
/// independent projection of it.
pub struct Decomposition {
    width: usize,
    height: usize,
    channels: [ChannelMatrix; 3],
}

impl Decomposition {
    /// Pads `buffer` to a square power of two and transforms each channel.
    pub fn new(buffer: &PixelBuffer) -> Self {
        let (width, height) = (buffer.width(), buffer.height());
        let side = square_length(width.max(height));
        let pad = |channel: RGB| -> ChannelMatrix {
            Grid::all((side, side)).map(|(y, x)| {
                if y < height && x < width { buffer.get((y, x), channel) as f64 } else { 0.0 }
            }).collect()
        };
        let channels = [
            forward_2d(&pad(RGB::Red)),
            forward_2d(&pad(RGB::Green)),
            forward_2d(&pad(RGB::Blue)),
        ];
        Self {width, height, channels}
    }

    /// The side length of the padded square.
    pub fn side(&self) -> usize { crate::transform::side(&self.channels[0]) }

    /// The coefficients of the red, green and blue channels.
    pub fn channels(&self) -> &[ChannelMatrix; 3] { &self.channels }

    /// Applies `f` to every channel, then reconstructs an image of the
    /// original size.
    pub fn project(&self, f: impl Fn(&ChannelMatrix) -> ChannelMatrix) -> PixelBuffer {
        let [red, green, blue] = &self.channels;
        let channels = [f(red), f(green), f(blue)];
        reconstruct(&channels, self.width, self.height)
    }

    /// Reconstructs the image from the top-left `extent` x `extent`
    /// coefficients only.
    pub fn low_pass(&self, extent: usize) -> PixelBuffer {
        self.project(|matrix| {
            matrix.enumerate().map(
                |((y, x), c)| if y < extent && x < extent { c } else { 0.0 }
            ).collect()
        })
    }

    /// Discards the coefficients selected by `cutoff`.
    pub fn threshold(&self, cutoff: Cutoff) -> Compressed {
        let [red, green, blue] = &self.channels;
        let channels = [cutoff.apply(red), cutoff.apply(green), cutoff.apply(blue)];
        let zeroed = count_zeros(&channels);
        let image = reconstruct(&channels, self.width, self.height);
        Compressed {image, cutoff, zeroed}
    }

    /// Reconstructs every progressive stage, finest first.
    pub fn stages(&self) -> Vec<PixelBuffer> {
        stage_extents(self.side()).par_iter().map(|&extent| self.low_pass(extent)).collect()
    }
}

// ----------------------------------------------------------------------------

/// The result of [`compress_with_report()`].
#[derive(Debug, Clone)]
pub struct Compressed {
    /// The reconstructed image.
    pub image: PixelBuffer,

    /// The cutoff that was applied to every channel.
    pub cutoff: Cutoff,

    /// The number of coefficients, summed over channels, that were zero after
    /// thresholding.
    pub zeroed: usize,
}

/// Compresses `buffer`, discarding the fraction `ratio` of its non-negligible
/// wavelet coefficients.
///
/// Fails with [`InvalidParameter`] unless `ratio` is in `[0, 1]`.
///
/// [`InvalidParameter`]: crate::Error::InvalidParameter
pub fn compress_with_report(buffer: &PixelBuffer, ratio: f64) -> Result<Compressed> {
    let ratio = check_ratio(ratio)?;
    let decomposition = Decomposition::new(buffer);
    let cutoff = Cutoff::select(ratio, decomposition.channels())?;
    Ok(decomposition.threshold(cutoff))
}

/// Like [`compress_with_report()`] but returns only the image.
pub fn compress(buffer: &PixelBuffer, ratio: f64) -> Result<PixelBuffer> {
    Ok(compress_with_report(buffer, ratio)?.image)
}

/// Returns progressively coarser approximations of `buffer`, from the finest
/// (all coefficients kept) to the coarsest (only the mean kept).
pub fn progressive(buffer: &PixelBuffer) -> Vec<PixelBuffer> {
    Decomposition::new(buffer).stages()
}

// ----------------------------------------------------------------------------
