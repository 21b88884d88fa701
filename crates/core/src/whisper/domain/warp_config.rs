use super::scale::{hz_to_bin, nyquist, FrequencyScale};
use super::warp_error::WarpError;

/// Fewest frequency samples that still produce a usable mesh.
pub const MIN_FREQUENCY_SAMPLES: usize = 4;

/// Fewest time positions that still produce a usable mesh.
pub const MIN_TIME_POSITIONS: usize = 2;

/// Default divisor for [`FrequencySampling::BinFraction`] (513 bins -> 16 samples).
pub const DEFAULT_BIN_DIVISOR: usize = 32;

/// Default frame stride for [`TimeMesh::Stride`].
pub const DEFAULT_TIME_STRIDE: usize = 10;

/// Content found at `source_hz` is moved to `target_hz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPair {
    pub target_hz: f64,
    pub source_hz: f64,
}

impl AnchorPair {
    pub const fn new(target_hz: f64, source_hz: f64) -> Self {
        Self {
            target_hz,
            source_hz,
        }
    }
}

/// DC stays put, 1000 Hz rises to 1100 Hz, 1600 Hz stays put.
/// Nyquist is always appended as a fixed point at warp time.
pub const DEFAULT_ANCHORS: [AnchorPair; 3] = [
    AnchorPair::new(0.0, 0.0),
    AnchorPair::new(1100.0, 1000.0),
    AnchorPair::new(1600.0, 1600.0),
];

/// How the frequency axis is sampled into control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencySampling {
    /// Use the anchor frequencies themselves (plus Nyquist).
    Anchors,
    /// `count` evenly spaced samples on the warp scale, DC to Nyquist.
    Uniform { count: usize },
    /// Like `Uniform` with `bins / divisor` samples.
    BinFraction { divisor: usize },
}

/// Which frames carry a copy of the frequency control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMesh {
    /// Only the first and one-past-last frame.
    Boundaries,
    /// Every `step`th frame, closed with one-past-last.
    Stride { step: usize },
    /// Every frame, closed with one-past-last.
    EveryFrame,
}

/// Parameterization of the formant warp.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpConfig {
    pub scale: FrequencyScale,
    pub sampling: FrequencySampling,
    pub time_mesh: TimeMesh,
    pub anchors: Vec<AnchorPair>,
}

impl Default for WarpConfig {
    /// ERB-spaced samples, one per 32 bins, meshed only at the frame boundaries.
    fn default() -> Self {
        Self {
            scale: FrequencyScale::Erb,
            sampling: FrequencySampling::BinFraction {
                divisor: DEFAULT_BIN_DIVISOR,
            },
            time_mesh: TimeMesh::Boundaries,
            anchors: DEFAULT_ANCHORS.to_vec(),
        }
    }
}

impl WarpConfig {
    /// The four fixed Hz anchors, meshed every tenth frame.
    pub fn fixed_anchors() -> Self {
        Self {
            scale: FrequencyScale::Linear,
            sampling: FrequencySampling::Anchors,
            time_mesh: TimeMesh::Stride {
                step: DEFAULT_TIME_STRIDE,
            },
            anchors: DEFAULT_ANCHORS.to_vec(),
        }
    }

    pub fn with_scale(mut self, scale: FrequencyScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sampling(mut self, sampling: FrequencySampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_time_mesh(mut self, time_mesh: TimeMesh) -> Self {
        self.time_mesh = time_mesh;
        self
    }

    /// Anchors on the warp scale, closed with a fixed Nyquist point.
    ///
    /// Both the target and the source columns must be strictly increasing,
    /// otherwise the warp would fold the spectrum over itself.
    fn scaled_anchors(&self, sample_rate: u32) -> Result<Vec<(f64, f64)>, WarpError> {
        let top = nyquist(sample_rate);
        let mut anchors = self.anchors.clone();
        anchors.push(AnchorPair::new(top, top));

        for pair in anchors.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.target_hz <= prev.target_hz {
                return Err(WarpError::NonMonotoneAnchors {
                    previous: prev.target_hz,
                    next: next.target_hz,
                });
            }
            if next.source_hz <= prev.source_hz {
                return Err(WarpError::NonMonotoneAnchors {
                    previous: prev.source_hz,
                    next: next.source_hz,
                });
            }
        }

        Ok(anchors
            .iter()
            .map(|a| (self.scale.to_scale(a.target_hz), self.scale.to_scale(a.source_hz)))
            .collect())
    }

    /// Frequency control points as `(target_bin, source_bin)` pairs.
    ///
    /// The samples are placed on the warp scale, pushed through the
    /// piecewise-linear anchor curve, then converted back to bin coordinates.
    pub fn frequency_pairs(
        &self,
        sample_rate: u32,
        bin_count: usize,
    ) -> Result<Vec<(f64, f64)>, WarpError> {
        let anchors = self.scaled_anchors(sample_rate)?;
        let top = self.scale.to_scale(nyquist(sample_rate));

        let targets: Vec<f64> = match self.sampling {
            FrequencySampling::Anchors => anchors.iter().map(|&(t, _)| t).collect(),
            FrequencySampling::Uniform { count } => linspace(0.0, top, count),
            FrequencySampling::BinFraction { divisor } => {
                linspace(0.0, top, bin_count / divisor.max(1))
            }
        };

        if targets.len() < MIN_FREQUENCY_SAMPLES {
            return Err(WarpError::TooFewAnchors {
                required: MIN_FREQUENCY_SAMPLES,
                actual: targets.len(),
            });
        }

        let to_bin = |v: f64| hz_to_bin(self.scale.to_hz(v), sample_rate, bin_count);
        Ok(targets
            .iter()
            .map(|&t| (to_bin(t), to_bin(interpolate(&anchors, t))))
            .collect())
    }

    /// Frame coordinates at which the frequency pairs are replicated.
    pub fn time_positions(&self, frame_count: usize) -> Result<Vec<f64>, WarpError> {
        let mut positions: Vec<usize> = match self.time_mesh {
            TimeMesh::Boundaries => vec![0],
            TimeMesh::Stride { step } => (0..frame_count).step_by(step.max(1)).collect(),
            TimeMesh::EveryFrame => (0..frame_count).collect(),
        };
        positions.push(frame_count);
        positions.dedup();

        if positions.len() < MIN_TIME_POSITIONS {
            return Err(WarpError::TooFewTimePositions {
                required: MIN_TIME_POSITIONS,
                actual: positions.len(),
            });
        }
        Ok(positions.into_iter().map(|p| p as f64).collect())
    }
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Piecewise-linear lookup over `(x, y)` knots sorted by `x`, clamped at the ends.
fn interpolate(knots: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = (knots[0], knots[knots.len() - 1]);
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    for pair in knots.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x <= x1 {
            return y0 + (x - x0) * (y1 - y0) / (x1 - x0);
        }
    }
    last.1
}
