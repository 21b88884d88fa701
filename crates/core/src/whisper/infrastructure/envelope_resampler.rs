use ndarray::Array2;

use super::piecewise_affine::PiecewiseAffineTransform;

/// Resample `envelope` through `inverse_map`.
///
/// Output pixel `(frame, bin)` is mapped to a location in the input (as
/// `[bin, frame]`) and read back with bilinear interpolation. Neighbours
/// outside the input read as zero, and pixels the map does not cover
/// become zero.
pub fn resample(envelope: &Array2<f64>, inverse_map: &PiecewiseAffineTransform) -> Array2<f64> {
    let (frames, bins) = envelope.dim();
    let mut out = Array2::zeros((frames, bins));
    let mut hint = 0;
    for ((frame, bin), value) in out.indexed_iter_mut() {
        if let Some([x, y]) = inverse_map.apply_with_hint([bin as f64, frame as f64], &mut hint) {
            *value = bilinear(envelope, y, x);
        }
    }
    out
}

/// Bilinear read at fractional `(row, col)`; out-of-range taps read as zero.
pub fn bilinear(image: &Array2<f64>, row: f64, col: f64) -> f64 {
    let r0 = row.floor();
    let c0 = col.floor();
    let dr = row - r0;
    let dc = col - c0;
    let (r0, c0) = (r0 as i64, c0 as i64);

    let tap = |r: i64, c: i64| -> f64 {
        if r < 0 || c < 0 {
            return 0.0;
        }
        image.get((r as usize, c as usize)).copied().unwrap_or(0.0)
    };

    (1.0 - dr) * ((1.0 - dc) * tap(r0, c0) + dc * tap(r0, c0 + 1))
        + dr * ((1.0 - dc) * tap(r0 + 1, c0) + dc * tap(r0 + 1, c0 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_bilinear_on_grid_points() {
        let image = array![[1.0, 2.0], [3.0, 4.0]];
        assert_relative_eq!(bilinear(&image, 0.0, 0.0), 1.0);
        assert_relative_eq!(bilinear(&image, 1.0, 1.0), 4.0);
    }

    #[test]
    fn test_bilinear_between_grid_points() {
        let image = array![[1.0, 2.0], [3.0, 4.0]];
        assert_relative_eq!(bilinear(&image, 0.5, 0.5), 2.5);
        assert_relative_eq!(bilinear(&image, 0.0, 0.25), 1.25);
    }

    #[test]
    fn test_bilinear_fades_to_zero_past_the_edge() {
        let image = array![[2.0, 2.0], [2.0, 2.0]];
        assert_relative_eq!(bilinear(&image, 0.0, 1.5), 1.0);
        assert_relative_eq!(bilinear(&image, 0.0, -0.5), 1.0);
        assert_relative_eq!(bilinear(&image, 5.0, 0.0), 0.0);
    }

    #[test]
    fn test_identity_resample_is_lossless() {
        let envelope = Array2::from_shape_fn((4, 6), |(t, f)| (t * 10 + f) as f64 + 1.0);
        let corners = [[0.0, 0.0], [6.0, 0.0], [0.0, 4.0], [6.0, 4.0]];
        let map = PiecewiseAffineTransform::estimate(&corners, &corners).unwrap();
        let out = resample(&envelope, &map);
        for (a, b) in out.iter().zip(envelope.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_uncovered_pixels_are_zero() {
        let envelope = Array2::from_elem((4, 6), 1.0);
        let corners = [[0.0, 0.0], [3.0, 0.0], [0.0, 4.0], [3.0, 4.0]];
        let map = PiecewiseAffineTransform::estimate(&corners, &corners).unwrap();
        let out = resample(&envelope, &map);
        assert_relative_eq!(out[[2, 2]], 1.0, epsilon = 1e-9);
        assert_eq!(out[[2, 5]], 0.0);
    }

    #[test]
    fn test_shift_moves_content_up() {
        // Output bin 4 reads input bin 2.
        let mut envelope = Array2::zeros((2, 10));
        envelope[[0, 2]] = 1.0;
        envelope[[1, 2]] = 1.0;
        let target = [[0.0, 0.0], [4.0, 0.0], [10.0, 0.0], [0.0, 2.0], [4.0, 2.0], [10.0, 2.0]];
        let source = [[0.0, 0.0], [2.0, 0.0], [10.0, 0.0], [0.0, 2.0], [2.0, 2.0], [10.0, 2.0]];
        let map = PiecewiseAffineTransform::estimate(&target, &source).unwrap();
        let out = resample(&envelope, &map);
        assert_relative_eq!(out[[0, 4]], 1.0, epsilon = 1e-9);
        assert_relative_eq!(out[[1, 4]], 1.0, epsilon = 1e-9);
        assert_relative_eq!(out[[0, 2]], 0.0, epsilon = 1e-9);
    }
}
