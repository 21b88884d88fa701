use ndarray::Array2;
use rand::{Rng, RngCore};

use crate::shared::constants::ENVELOPE_FLOOR;
use crate::vocoder::domain::vocoder_features::VocoderFeatures;
use crate::whisper::domain::excitation_replacer::ExcitationReplacer;
use crate::whisper::domain::feature_transformer::FeatureTransformer;
use crate::whisper::domain::warp_config::WarpConfig;
use crate::whisper::domain::warp_error::WarpError;
use crate::whisper::domain::weighting::WeightingCurve;

use super::formant_warp::FormantWarp;

/// Normal-to-whisper conversion on vocoder features.
///
/// The voiced source is replaced by white noise, F1/F2 are raised by a
/// frequency warp, the low band is suppressed and the breath band above
/// 1 kHz is emphasised. Aperiodicity passes through untouched.
pub struct PhantomSilhouetteTransformer {
    warp: FormantWarp,
}

impl Default for PhantomSilhouetteTransformer {
    fn default() -> Self {
        Self::new(WarpConfig::default())
    }
}

impl PhantomSilhouetteTransformer {
    pub fn new(config: WarpConfig) -> Self {
        Self {
            warp: FormantWarp::new(config),
        }
    }

    pub fn warp_config(&self) -> &WarpConfig {
        self.warp.config()
    }

    /// Convert one excitation/envelope pair. Inputs are left untouched.
    pub fn transform<R: Rng + ?Sized>(
        &self,
        excitation: &[f64],
        envelope: &Array2<f64>,
        sample_rate: u32,
        rng: &mut R,
    ) -> Result<(Vec<f64>, Array2<f64>), WarpError> {
        let excitation_out = ExcitationReplacer::replace(excitation, rng);

        let mut envelope_out = self.warp.warp(envelope, sample_rate)?;
        WeightingCurve::LowFrequencySuppression.apply(&mut envelope_out, sample_rate);
        WeightingCurve::HighFrequencyEmphasis.apply(&mut envelope_out, sample_rate);
        apply_floor(&mut envelope_out);

        Ok((excitation_out, envelope_out))
    }
}

/// Replace exact zeros with [`ENVELOPE_FLOOR`].
pub fn apply_floor(envelope: &mut Array2<f64>) {
    envelope.mapv_inplace(|v| if v == 0.0 { ENVELOPE_FLOOR } else { v });
}

impl FeatureTransformer for PhantomSilhouetteTransformer {
    fn transform_features(
        &self,
        features: &VocoderFeatures,
        rng: &mut dyn RngCore,
    ) -> Result<VocoderFeatures, Box<dyn std::error::Error>> {
        log::debug!(
            "Whisper conversion: {} frames x {} bins at {} Hz ({:?})",
            features.frame_count(),
            features.bin_count(),
            features.sample_rate(),
            self.warp_config()
        );
        let (f0, sp) = self.transform(features.f0(), features.sp(), features.sample_rate(), rng)?;
        Ok(features.with_source_and_envelope(f0, sp)?)
    }
}
