/// The errors reported by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied value violates an API contract.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// An image container could not be decoded.
    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// An image container could not be encoded.
    #[error("Could not encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// A channel value does not fit in 8 bits.
    #[error("Channel value {value} is outside [0, 255]")]
    ChannelOutOfRange { value: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ----------------------------------------------------------------------------

/// A general `Result` type.
pub type Result<T=(), E=Error> = std::result::Result<T, E>;

// ----------------------------------------------------------------------------

/// Pixel/coefficient coordinates, with `(0, 0)` at the top left. The
/// coordinates are listed in the order `(row, column)`, i.e. y-coordinate
/// first.
pub type Grid = (usize, usize);

// ----------------------------------------------------------------------------

pub mod io;

mod buffer;
pub use buffer::{PixelBuffer, RGB};

pub mod transform;
pub use transform::{ChannelMatrix};

pub mod threshold;
pub use threshold::{Cutoff};

pub mod reconstruct;

pub mod compress;
pub use compress::{Compressed, Decomposition, compress, compress_with_report, progressive};
