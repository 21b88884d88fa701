use ndarray::Array2;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("f0 has {f0_len} frames but the spectral envelope has {sp_frames}")]
    FrameCountMismatch { f0_len: usize, sp_frames: usize },
    #[error("aperiodicity shape {ap:?} does not match spectral envelope shape {sp:?}")]
    ShapeMismatch {
        sp: (usize, usize),
        ap: (usize, usize),
    },
    #[error("sample rate must be positive")]
    ZeroSampleRate,
    #[error("row {row} has {len} bins, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Vocoder analysis of one mono signal.
///
/// `f0` has one value per frame (Hz, 0 when unvoiced); `sp` (spectral
/// envelope) and `ap` (aperiodicity) are `frames x bins`, bins spanning
/// DC to Nyquist.
#[derive(Clone, Debug, PartialEq)]
pub struct VocoderFeatures {
    sample_rate: u32,
    f0: Vec<f64>,
    sp: Array2<f64>,
    ap: Array2<f64>,
}

impl VocoderFeatures {
    pub fn new(
        sample_rate: u32,
        f0: Vec<f64>,
        sp: Array2<f64>,
        ap: Array2<f64>,
    ) -> Result<Self, FeatureError> {
        if sample_rate == 0 {
            return Err(FeatureError::ZeroSampleRate);
        }
        if f0.len() != sp.nrows() {
            return Err(FeatureError::FrameCountMismatch {
                f0_len: f0.len(),
                sp_frames: sp.nrows(),
            });
        }
        if sp.dim() != ap.dim() {
            return Err(FeatureError::ShapeMismatch {
                sp: sp.dim(),
                ap: ap.dim(),
            });
        }
        Ok(Self {
            sample_rate,
            f0,
            sp,
            ap,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn f0(&self) -> &[f64] {
        &self.f0
    }

    pub fn sp(&self) -> &Array2<f64> {
        &self.sp
    }

    pub fn ap(&self) -> &Array2<f64> {
        &self.ap
    }

    pub fn frame_count(&self) -> usize {
        self.f0.len()
    }

    pub fn bin_count(&self) -> usize {
        self.sp.ncols()
    }

    /// Same aperiodicity and sample rate with a new source and envelope.
    pub fn with_source_and_envelope(
        &self,
        f0: Vec<f64>,
        sp: Array2<f64>,
    ) -> Result<Self, FeatureError> {
        Self::new(self.sample_rate, f0, sp, self.ap.clone())
    }

    pub fn into_parts(self) -> (u32, Vec<f64>, Array2<f64>, Array2<f64>) {
        (self.sample_rate, self.f0, self.sp, self.ap)
    }
}

/// Stack equal-length rows into a `rows x bins` array.
pub fn array_from_rows(rows: &[Vec<f64>], bins: usize) -> Result<Array2<f64>, FeatureError> {
    let mut flat = Vec::with_capacity(rows.len() * bins);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != bins {
            return Err(FeatureError::RaggedRow {
                row,
                len: values.len(),
                expected: bins,
            });
        }
        flat.extend_from_slice(values);
    }
    Ok(Array2::from_shape_vec((rows.len(), bins), flat)
        .expect("flat buffer length equals rows * bins"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(frames: usize, bins: usize) -> VocoderFeatures {
        VocoderFeatures::new(
            16000,
            vec![120.0; frames],
            Array2::from_elem((frames, bins), 1.0),
            Array2::from_elem((frames, bins), 0.5),
        )
        .unwrap()
    }

    #[test]
    fn test_new_exposes_dimensions() {
        let f = features(10, 257);
        assert_eq!(f.frame_count(), 10);
        assert_eq!(f.bin_count(), 257);
        assert_eq!(f.sample_rate(), 16000);
    }

    #[test]
    fn test_f0_length_must_match_frames() {
        let err = VocoderFeatures::new(
            16000,
            vec![0.0; 3],
            Array2::zeros((4, 8)),
            Array2::zeros((4, 8)),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FeatureError::FrameCountMismatch {
                f0_len: 3,
                sp_frames: 4
            }
        );
    }

    #[test]
    fn test_ap_shape_must_match_sp() {
        let err = VocoderFeatures::new(
            16000,
            vec![0.0; 4],
            Array2::zeros((4, 8)),
            Array2::zeros((4, 9)),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FeatureError::ShapeMismatch {
                sp: (4, 8),
                ap: (4, 9)
            }
        );
    }

    #[test]
    fn test_zero_sample_rate_is_rejected() {
        let err = VocoderFeatures::new(0, vec![], Array2::zeros((0, 0)), Array2::zeros((0, 0)))
            .unwrap_err();
        assert_eq!(err, FeatureError::ZeroSampleRate);
    }

    #[test]
    fn test_with_source_and_envelope_keeps_ap() {
        let f = features(2, 4);
        let g = f
            .with_source_and_envelope(vec![0.1, 0.2], Array2::from_elem((2, 4), 3.0))
            .unwrap();
        assert_eq!(g.ap(), f.ap());
        assert_eq!(g.f0(), &[0.1, 0.2]);
        assert_eq!(g.sp()[[1, 3]], 3.0);
    }

    #[test]
    fn test_array_from_rows() {
        let a = array_from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]], 2).unwrap();
        assert_eq!(a[[1, 0]], 3.0);
        let err = array_from_rows(&[vec![1.0, 2.0], vec![3.0]], 2).unwrap_err();
        assert_eq!(
            err,
            FeatureError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }
}
