/// Frequency axis on which warp anchors are interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyScale {
    /// Plain Hz.
    Linear,
    /// Equivalent Rectangular Bandwidth (perceptual) scale.
    Erb,
}

impl FrequencyScale {
    pub fn to_scale(self, hz: f64) -> f64 {
        match self {
            FrequencyScale::Linear => hz,
            FrequencyScale::Erb => hz_to_erb(hz),
        }
    }

    pub fn to_hz(self, value: f64) -> f64 {
        match self {
            FrequencyScale::Linear => value,
            FrequencyScale::Erb => erb_to_hz(value),
        }
    }
}

/// Nyquist frequency in whole Hz (odd sample rates round down).
pub fn nyquist(sample_rate: u32) -> f64 {
    (sample_rate / 2) as f64
}

/// Map a frequency in Hz to a fractional envelope bin coordinate.
///
/// The envelope's `bin_count` bins span `[0, nyquist]`, so the Nyquist
/// frequency lands on `bin_count` itself, one past the last index.
pub fn hz_to_bin(hz: f64, sample_rate: u32, bin_count: usize) -> f64 {
    hz / nyquist(sample_rate) * bin_count as f64
}

pub fn bin_to_hz(bin: f64, sample_rate: u32, bin_count: usize) -> f64 {
    bin / bin_count as f64 * nyquist(sample_rate)
}

pub fn hz_to_erb(hz: f64) -> f64 {
    21.4 * (0.00437 * hz + 1.0).log10()
}

pub fn erb_to_hz(erb: f64) -> f64 {
    (10f64.powf(erb / 21.4) - 1.0) / 0.00437
}
