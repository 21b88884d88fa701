use std::path::Path;

use super::vocoder_features::VocoderFeatures;

/// Domain interface for persisting vocoder features produced out of process.
pub trait FeatureStore: Send {
    fn load(&self, path: &Path) -> Result<VocoderFeatures, Box<dyn std::error::Error>>;

    fn save(
        &self,
        path: &Path,
        features: &VocoderFeatures,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
