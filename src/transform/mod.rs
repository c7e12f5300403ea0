use multidimension::{Index, View, Array};

use super::{Grid};

mod haar;
pub use haar::{forward, inverse};

// ----------------------------------------------------------------------------

/// A square grid holding one colour channel. The side length is a power of
/// two.
pub type ChannelMatrix = Array<Grid, f64>;

/// Returns the side length of `matrix`.
pub fn side(matrix: &ChannelMatrix) -> usize {
    let (height, width) = matrix.size();
    assert_eq!(height, width, "Matrix is not square");
    height
}

/// Exchanges rows and columns.
pub fn transpose(matrix: &ChannelMatrix) -> ChannelMatrix {
    let n = side(matrix);
    Grid::all((n, n)).map(|(y, x)| matrix[(x, y)]).collect()
}

/// Applies `f` to every row of `matrix`.
fn map_rows(matrix: &ChannelMatrix, f: impl Fn(&[f64]) -> Vec<f64>) -> ChannelMatrix {
    let n = side(matrix);
    let mut raw = Vec::with_capacity(n * n);
    let mut row = Vec::with_capacity(n);
    for y in 0..n {
        row.clear();
        row.extend((0..n).map(|x| matrix[(y, x)]));
        raw.extend(f(&row));
    }
    Array::new((n, n), raw)
}

/// Applies the 2D Haar transform: rows first, then columns.
pub fn forward_2d(matrix: &ChannelMatrix) -> ChannelMatrix {
    let rows_done = map_rows(matrix, forward::<f64>);
    let columns_done = map_rows(&transpose(&rows_done), forward::<f64>);
    transpose(&columns_done)
}

/// The inverse of [`forward_2d`]: columns first, then rows.
pub fn inverse_2d(matrix: &ChannelMatrix) -> ChannelMatrix {
    let columns_done = map_rows(&transpose(matrix), inverse::<f64>);
    map_rows(&transpose(&columns_done), inverse::<f64>)
}

// ----------------------------------------------------------------------------
