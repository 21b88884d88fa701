/// Centered: both channels keep their level.
pub const DEFAULT_RIGHT_RATIO: f64 = 0.0;

/// Shift the stereo image by scaling the channels with `1 - r` and `1 + r`.
///
/// `right_ratio` runs from -1 (all left) to 1 (all right). The louder
/// channel is boosted rather than normalized, so callers mixing at full
/// scale should leave headroom.
pub fn pan(left: &mut [f32], right: &mut [f32], right_ratio: f64) {
    let left_gain = (1.0 - right_ratio) as f32;
    let right_gain = (1.0 + right_ratio) as f32;
    for s in left.iter_mut() {
        *s *= left_gain;
    }
    for s in right.iter_mut() {
        *s *= right_gain;
    }
}
