use ndarray::{Array1, Array2, Axis};

use super::scale::nyquist;

/// Below this frequency the low band is muted entirely.
pub const SUPPRESSION_START_HZ: f64 = 550.0;
/// Above this frequency the low band passes unchanged.
pub const SUPPRESSION_END_HZ: f64 = 1350.0;

/// Breath emphasis ramps from unity gain at this frequency...
pub const EMPHASIS_START_HZ: f64 = 1000.0;
/// ...up to double gain at this one.
pub const EMPHASIS_END_HZ: f64 = 10000.0;

const EMPHASIS_RAMP_OFFSET: f64 = 2.1111;

/// Frequency-dependent gain applied to every frame of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightingCurve {
    LowFrequencySuppression,
    HighFrequencyEmphasis,
}

impl WeightingCurve {
    pub fn gain(self, hz: f64) -> f64 {
        match self {
            WeightingCurve::LowFrequencySuppression => low_frequency_suppression(hz),
            WeightingCurve::HighFrequencyEmphasis => high_frequency_emphasis(hz),
        }
    }

    /// Per-bin gains for an envelope with `bin_count` bins.
    pub fn gains(self, sample_rate: u32, bin_count: usize) -> Array1<f64> {
        bin_frequencies(sample_rate, bin_count).mapv(|hz| self.gain(hz))
    }

    /// Multiply every frame of `envelope` by this curve in place.
    pub fn apply(self, envelope: &mut Array2<f64>, sample_rate: u32) {
        let gains = self.gains(sample_rate, envelope.ncols());
        for mut frame in envelope.axis_iter_mut(Axis(0)) {
            frame *= &gains;
        }
    }
}

/// Mutes the fundamental/F1 region with a steep ramp between 550 and 1350 Hz.
pub fn low_frequency_suppression(hz: f64) -> f64 {
    if hz > SUPPRESSION_END_HZ {
        1.0
    } else if hz > SUPPRESSION_START_HZ {
        ((hz - SUPPRESSION_START_HZ) / (SUPPRESSION_END_HZ - SUPPRESSION_START_HZ))
            .abs()
            .powf(std::f64::consts::E)
    } else {
        0.0
    }
}

/// Boosts breath noise linearly from 1000 Hz up to double gain at 10 kHz.
pub fn high_frequency_emphasis(hz: f64) -> f64 {
    if hz < EMPHASIS_START_HZ {
        1.0
    } else if hz < EMPHASIS_END_HZ {
        let ramp = (hz - EMPHASIS_END_HZ - EMPHASIS_START_HZ)
            / (EMPHASIS_END_HZ - EMPHASIS_START_HZ)
            + EMPHASIS_RAMP_OFFSET;
        ramp.clamp(1.0, 2.0)
    } else {
        2.0
    }
}

/// Frequency assigned to each envelope bin when weighting.
///
/// Bin `k` sits at `(k + 1) * nyquist / bin_count`, so the last bin lands
/// exactly on Nyquist and bin 0 is one step above DC.
pub fn bin_frequencies(sample_rate: u32, bin_count: usize) -> Array1<f64> {
    let step = nyquist(sample_rate) / bin_count as f64;
    Array1::from_iter((1..=bin_count).map(|k| k as f64 * step))
}
