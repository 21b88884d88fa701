use super::vocoder_features::VocoderFeatures;

/// Domain interface for vocoder resynthesis.
pub trait SpeechSynthesizer: Send {
    /// Rebuild a waveform from `features`. The result may be longer than the
    /// analyzed signal; callers truncate.
    fn synthesize(&self, features: &VocoderFeatures)
        -> Result<Vec<f64>, Box<dyn std::error::Error>>;
}
