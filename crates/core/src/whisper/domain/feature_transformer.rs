use rand::RngCore;

use crate::vocoder::domain::vocoder_features::VocoderFeatures;

/// Domain interface for transforming vocoder features (voice conversion).
///
/// The random source is passed in so callers decide seeding and
/// thread-locality.
pub trait FeatureTransformer: Send {
    fn transform_features(
        &self,
        features: &VocoderFeatures,
        rng: &mut dyn RngCore,
    ) -> Result<VocoderFeatures, Box<dyn std::error::Error>>;
}
