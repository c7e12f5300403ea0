use multidimension::{View};

use super::{ChannelMatrix, Error, Result};

/// Coefficients with a magnitude at or below this are treated as already
/// zero, and do not take part in threshold selection.
pub const NEGLIGIBLE: f64 = 1e-6;

/// Checks that `ratio` lies in `[0, 1]`.
pub fn check_ratio(ratio: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(Error::InvalidParameter("Compression ratio must be in [0, 1]"))
    }
}

/// Collects the magnitudes of all non-negligible coefficients of `channels`.
pub fn pool(channels: &[ChannelMatrix]) -> Vec<f64> {
    let mut magnitudes = Vec::new();
    for channel in channels {
        channel.each(|c| {
            if c.abs() > NEGLIGIBLE { magnitudes.push(c.abs()); }
        });
    }
    magnitudes
}

// ----------------------------------------------------------------------------

/// Decides which wavelet coefficients to discard.
///
/// A single `Cutoff` is shared by all colour channels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Cutoff {
    /// Keep every coefficient.
    KeepAll,

    /// Discard every coefficient whose magnitude is at most the given value.
    Magnitude(f64),

    /// Discard every coefficient.
    DiscardAll,
}

impl Cutoff {
    /// Selects the `Cutoff` for `ratio` from the coefficients of `channels`.
    ///
    /// The threshold is the magnitude at position `floor(n * ratio)` of the
    /// `n` pooled magnitudes sorted in ascending order. A ratio of `0` keeps
    /// everything and a ratio of `1` discards everything, without looking at
    /// the coefficients.
    pub fn select(ratio: f64, channels: &[ChannelMatrix]) -> Result<Self> {
        let ratio = check_ratio(ratio)?;
        Ok(if ratio == 0.0 {
            Cutoff::KeepAll
        } else if ratio == 1.0 {
            Cutoff::DiscardAll
        } else {
            Self::percentile(ratio, pool(channels))
        })
    }

    /// The part of `select()` that sorts the pool.
    ///
    /// An empty pool means there is nothing to discard.
    pub fn percentile(ratio: f64, mut magnitudes: Vec<f64>) -> Self {
        if magnitudes.is_empty() { return Cutoff::KeepAll; }
        magnitudes.sort_by(f64::total_cmp);
        let n = magnitudes.len();
        let pos = ((n as f64 * ratio).floor() as usize).min(n - 1);
        let threshold = magnitudes[pos];
        log::debug!("Threshold: {} (position {} of {})", threshold, pos, n);
        Cutoff::Magnitude(threshold)
    }

    /// Returns the magnitude threshold, if any.
    pub fn threshold(self) -> Option<f64> {
        match self {
            Cutoff::Magnitude(threshold) => Some(threshold),
            _ => None,
        }
    }

    /// Returns `true` if a coefficient with value `c` survives.
    pub fn keeps(self, c: f64) -> bool {
        match self {
            Cutoff::KeepAll => true,
            Cutoff::Magnitude(threshold) => c.abs() > threshold,
            Cutoff::DiscardAll => false,
        }
    }

    /// Returns a copy of `matrix` with the discarded coefficients set to zero.
    pub fn apply(self, matrix: &ChannelMatrix) -> ChannelMatrix {
        matrix.map(|c| if self.keeps(c) { c } else { 0.0 }).collect()
    }
}

/// Counts the coefficients of `channels` that are exactly zero.
pub fn count_zeros(channels: &[ChannelMatrix]) -> usize {
    let mut count = 0;
    for channel in channels {
        channel.each(|c| if c == 0.0 { count += 1; });
    }
    count
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use multidimension::{Index, Array};
    use crate::Grid;
    use super::*;

    fn channels() -> Vec<ChannelMatrix> {
        (0..3).map(|c| {
            let m: ChannelMatrix = Grid::all((4, 4)).map(
                move |(y, x)| ((4 * y + x) as f64 - 7.5) * (c + 1) as f64
            ).collect();
            m
        }).collect()
    }

    #[test]
    fn check() {
        assert!(check_ratio(0.0).is_ok());
        assert!(check_ratio(1.0).is_ok());
        assert!(matches!(check_ratio(-0.1), Err(Error::InvalidParameter(_))));
        assert!(matches!(check_ratio(1.5), Err(Error::InvalidParameter(_))));
        assert!(check_ratio(f64::NAN).is_err());
    }

    #[test]
    fn pool_skips_negligible() {
        let a: ChannelMatrix = Array::new((2, 2), vec![0.0, 1e-7, -3.0, 2.0]);
        let b: ChannelMatrix = Array::new((2, 2), vec![-1e-6, 5.0, 0.0, 0.0]);
        let mut p = pool(&[a, b]);
        p.sort_by(f64::total_cmp);
        assert_eq!(p, vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn percentile() {
        let pool = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        assert_eq!(Cutoff::percentile(0.2, pool.clone()), Cutoff::Magnitude(2.0));
        assert_eq!(Cutoff::percentile(0.5, pool.clone()), Cutoff::Magnitude(3.0));
        assert_eq!(Cutoff::percentile(0.999999, pool.clone()), Cutoff::Magnitude(5.0));
        // The index is clamped.
        assert_eq!(Cutoff::percentile(1.0, pool), Cutoff::Magnitude(5.0));
        assert_eq!(Cutoff::percentile(0.5, Vec::new()), Cutoff::KeepAll);
    }

    #[test]
    fn special_ratios() {
        let cs = channels();
        assert_eq!(Cutoff::select(0.0, &cs).unwrap(), Cutoff::KeepAll);
        assert_eq!(Cutoff::select(1.0, &cs).unwrap(), Cutoff::DiscardAll);
        assert_eq!(Cutoff::select(1.0, &[]).unwrap(), Cutoff::DiscardAll);
        assert!(Cutoff::select(1.01, &cs).is_err());
    }

    #[test]
    fn apply() {
        let a: ChannelMatrix = Array::new((2, 2), vec![0.5, -2.0, 2.5, -0.25]);
        let b = Cutoff::Magnitude(0.5).apply(&a);
        assert_eq!([b[(0, 0)], b[(0, 1)], b[(1, 0)], b[(1, 1)]], [0.0, -2.0, 2.5, 0.0]);
        let b = Cutoff::DiscardAll.apply(&a);
        assert_eq!(count_zeros(&[b]), 4);
        let b = Cutoff::KeepAll.apply(&a);
        assert_eq!(count_zeros(&[b]), 0);
    }

    #[test]
    fn shared_across_channels() {
        let cs = channels();
        let cutoff = Cutoff::select(0.5, &cs).unwrap();
        let threshold = cutoff.threshold().unwrap();
        for c in &cs {
            let d = cutoff.apply(c);
            Grid::all((4, 4)).each(|yx| {
                if c[yx].abs() <= threshold {
                    assert_eq!(d[yx], 0.0);
                } else {
                    assert_eq!(d[yx], c[yx]);
                }
            });
        }
    }

    #[test]
    fn monotonic() {
        let cs = channels();
        let mut last = 0;
        for ratio in [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0] {
            let cutoff = Cutoff::select(ratio, &cs).unwrap();
            let applied: Vec<ChannelMatrix> = cs.iter().map(|c| cutoff.apply(c)).collect();
            let zeros = count_zeros(&applied);
            assert!(zeros >= last, "ratio {}: {} < {}", ratio, zeros, last);
            last = zeros;
        }
        assert_eq!(last, 48);
    }
}
