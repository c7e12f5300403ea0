use multidimension::{NonTuple, StaticIndex, View, Array};

use super::{Error, Grid, Result};

// ----------------------------------------------------------------------------

/// Indicates a channel of a colour image.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum RGB {Red=0, Green=1, Blue=2}

impl NonTuple for RGB {}

impl StaticIndex for RGB {
    const ALL: &'static [Self] = &[RGB::Red, RGB::Green, RGB::Blue];
    fn to_usize(self) -> usize { self as usize }
    fn from_usize(index: usize) -> Self { Self::ALL[index] }
}

// ----------------------------------------------------------------------------

/// Returns the number of samples in a `width` x `height` RGB image, or an
/// error if either dimension is zero or the count does not fit in `usize`.
fn sample_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidParameter("Width and height must be positive"));
    }
    width.checked_mul(height)
        .and_then(|n| n.checked_mul(RGB::ALL.len()))
        .ok_or(Error::InvalidParameter("Image dimensions are too large"))
}

/// An immutable grid of RGB pixels.
///
/// Channel values are plain integers. Buffers produced by this crate are
/// always within `[0, 255]`; buffers built by callers are not checked until
/// they are saved.
#[derive(Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    samples: Array<(Grid, RGB), i32>,
}

impl PixelBuffer {
    /// Constructs a `PixelBuffer` from row-major interleaved RGB samples.
    pub fn from_raw(width: usize, height: usize, samples: Vec<i32>) -> Result<Self> {
        if samples.len() != sample_count(width, height)? {
            return Err(Error::InvalidParameter("Sample count does not match width and height"));
        }
        Ok(Self::from_samples(width, height, samples))
    }

    /// Constructs a `PixelBuffer` from a `height` x `width` grid of pixels.
    pub fn from_rows(rows: &[Vec<[i32; 3]>], width: usize, height: usize) -> Result<Self> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(Error::InvalidParameter("Pixel data is empty"));
        }
        if rows.len() != height || rows.iter().any(|row| row.len() != width) {
            return Err(Error::InvalidParameter("Pixel data does not match width and height"));
        }
        let samples = rows.iter().flatten().flatten().copied().collect();
        Self::from_raw(width, height, samples)
    }

    /// Constructs an all-black `PixelBuffer`.
    pub fn black(width: usize, height: usize) -> Result<Self> {
        let count = sample_count(width, height)?;
        Self::from_raw(width, height, vec![0; count])
    }

    /// Wraps samples whose length is already known to be consistent.
    pub(crate) fn from_samples(width: usize, height: usize, samples: Vec<i32>) -> Self {
        debug_assert_eq!(samples.len(), width * height * RGB::ALL.len());
        Self {width, height, samples: Array::new(((height, width), ()), samples)}
    }

    pub fn width(&self) -> usize { self.width }

    pub fn height(&self) -> usize { self.height }

    /// Returns one channel value of the pixel at `(y, x)`.
    pub fn get(&self, yx: Grid, channel: RGB) -> i32 { self.samples[(yx, channel)] }

    /// Returns the pixel at `(y, x)` as `[red, green, blue]`.
    pub fn pixel(&self, yx: Grid) -> [i32; 3] {
        [self.get(yx, RGB::Red), self.get(yx, RGB::Green), self.get(yx, RGB::Blue)]
    }

    /// Returns a copy of the pixels as a `height` x `width` grid.
    pub fn to_rows(&self) -> Vec<Vec<[i32; 3]>> {
        (0..self.height).map(
            |y| (0..self.width).map(|x| self.pixel((y, x))).collect()
        ).collect()
    }

    /// Returns the samples in row-major interleaved RGB order.
    pub fn to_samples(&self) -> Vec<i32> {
        let mut samples = Vec::with_capacity(self.width * self.height * RGB::ALL.len());
        (&self.samples).each(|v| samples.push(v));
        samples
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
            && self.to_samples() == other.to_samples()
    }
}

impl Eq for PixelBuffer {}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.to_rows())
            .finish()
    }
}

// ----------------------------------------------------------------------------
