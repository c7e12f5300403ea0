use num_traits::{Float, FloatConst};

/// The normalisation shared by [`forward`] and [`inverse`]. Every pair sum
/// and difference is divided by this, which makes the transform orthonormal.
#[inline(always)]
fn scale<F: Float + FloatConst>() -> F { F::SQRT_2() }

/// Applies the multi-level 1D Haar transform to `signal`.
///
/// At each level the active prefix of length `size` is replaced by `size / 2`
/// pair averages followed by `size / 2` pair differences, then `size` halves.
/// The result holds the overall average first, then the details from coarsest
/// to finest.
///
/// `signal.len()` must be a power of two.
pub fn forward<F: Float + FloatConst>(signal: &[F]) -> Vec<F> {
    assert!(signal.is_empty() || signal.len().is_power_of_two(), "Length is not a power of two");
    let mut out = signal.to_vec();
    let mut size = out.len();
    let mut level = Vec::with_capacity(size);
    while size >= 2 {
        level.clear();
        level.extend(out[..size].chunks_exact(2).map(|p| (p[0] + p[1]) / scale::<F>()));
        level.extend(out[..size].chunks_exact(2).map(|p| (p[0] - p[1]) / scale::<F>()));
        out[..size].copy_from_slice(&level);
        size /= 2;
    }
    out
}

/// The inverse of [`forward`].
///
/// `coefficients.len()` must be a power of two.
pub fn inverse<F: Float + FloatConst>(coefficients: &[F]) -> Vec<F> {
    assert!(coefficients.is_empty() || coefficients.len().is_power_of_two(), "Length is not a power of two");
    let mut out = coefficients.to_vec();
    let mut size = 2;
    let mut level = Vec::with_capacity(out.len());
    while size <= out.len() {
        let half = size / 2;
        level.clear();
        for i in 0..half {
            let (low, high) = (out[i], out[i + half]);
            level.push((low + high) / scale::<F>());
            level.push((low - high) / scale::<F>());
        }
        out[..size].copy_from_slice(&level);
        size *= 2;
    }
    out
}

// ----------------------------------------------------------------------------
