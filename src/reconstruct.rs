use super::{ChannelMatrix, PixelBuffer};
use super::transform::{inverse_2d};

/// The largest value of an 8-bit channel.
pub const MAX_VALUE: i32 = 255;

/// Rounds to the nearest integer. Halves round towards positive infinity.
pub fn round_half_up(v: f64) -> i32 { (v + 0.5).floor() as i32 }

/// Linearly rescales `samples` onto `[0, MAX_VALUE]` if any of them lies
/// outside that range. In-range samples are returned unchanged.
///
/// The rescale is global: one minimum and one maximum over all samples. If
/// they coincide the result is all zeros.
pub fn repair_range(samples: Vec<i32>) -> Vec<i32> {
    if samples.iter().all(|v| (0..=MAX_VALUE).contains(v)) { return samples; }
    let (Some(&min), Some(&max)) = (samples.iter().min(), samples.iter().max()) else {
        return samples;
    };
    if max == min {
        log::debug!("Flat out-of-range image ({}); mapping to zero", min);
        return vec![0; samples.len()];
    }
    log::debug!("Rescaling [{}, {}] onto [0, {}]", min, max, MAX_VALUE);
    // Exact integer form of `round_half_up((v - min) * MAX_VALUE / span)`.
    let span = max as i64 - min as i64;
    samples.into_iter().map(|v| {
        let offset = v as i64 - min as i64;
        ((2 * offset * MAX_VALUE as i64 + span) / (2 * span)) as i32
    }).collect()
}

/// Inverse-transforms `channels` (red, green, blue) and crops the result to
/// `width` x `height` pixels, then rounds and repairs the range.
pub fn reconstruct(channels: &[ChannelMatrix; 3], width: usize, height: usize) -> PixelBuffer {
    let [red, green, blue] = channels;
    let planes = [inverse_2d(red), inverse_2d(green), inverse_2d(blue)];
    let mut samples = Vec::with_capacity(width * height * planes.len());
    for y in 0..height {
        for x in 0..width {
            samples.extend(planes.iter().map(|plane| round_half_up(plane[(y, x)])));
        }
    }
    PixelBuffer::from_samples(width, height, repair_range(samples))
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use multidimension::{Array};
    use crate::transform::{forward_2d};
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(-0.3), 0);
        assert_eq!(round_half_up(254.9999999), 255);
    }

    #[test]
    fn in_range_untouched() {
        let samples = vec![0, 17, 255, 128, 3, 9];
        assert_eq!(repair_range(samples.clone()), samples);
    }

    #[test]
    fn rescale() {
        assert_eq!(repair_range(vec![-10, 0, 265]), vec![0, 9, 255]);
        assert_eq!(repair_range(vec![0, 510, 255]), vec![0, 255, 128]);
        // Exact halves round up, whatever the span.
        assert_eq!(repair_range(vec![-25, 0, 25]), vec![0, 128, 255]);
        assert_eq!(repair_range(vec![-50, 0, 50, -5]), vec![0, 128, 255, 115]);
        assert_eq!(repair_range(vec![-29, 0, 29]), vec![0, 128, 255]);
        assert_eq!(repair_range(vec![-1, 44, 49]), vec![0, 230, 255]);
        assert_eq!(repair_range(vec![i32::MIN, 0, i32::MAX]), vec![0, 128, 255]);
    }

    #[test]
    fn flat_out_of_range() {
        assert_eq!(repair_range(vec![300; 6]), vec![0; 6]);
        assert_eq!(repair_range(vec![-4; 3]), vec![0; 3]);
    }

    #[test]
    fn crop() {
        let red: ChannelMatrix = Array::new((2, 2), vec![1.0, 2.0, 3.0, 4.0]);
        let green: ChannelMatrix = Array::new((2, 2), vec![5.0, 6.0, 7.0, 8.0]);
        let blue: ChannelMatrix = Array::new((2, 2), vec![9.0, 10.0, 11.0, 12.0]);
        let channels = [forward_2d(&red), forward_2d(&green), forward_2d(&blue)];
        let buffer = reconstruct(&channels, 1, 2);
        assert_eq!(buffer.width(), 1);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.to_rows(), vec![vec![[1, 5, 9]], vec![[3, 7, 11]]]);
    }

    #[test]
    fn zero() {
        let zero: ChannelMatrix = Array::new((2, 2), vec![0.0; 4]);
        let buffer = reconstruct(&[zero.clone(), zero.clone(), zero], 2, 2);
        assert_eq!(buffer.to_samples(), vec![0; 12]);
    }
}
