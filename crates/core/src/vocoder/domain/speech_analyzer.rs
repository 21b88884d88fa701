use super::vocoder_features::VocoderFeatures;

/// Domain interface for vocoder analysis (F0, spectral envelope, aperiodicity).
///
/// Implementations wrap an external vocoder; the whisper pipeline only
/// consumes what they produce.
pub trait SpeechAnalyzer: Send {
    fn analyze(
        &self,
        samples: &[f64],
        sample_rate: u32,
    ) -> Result<VocoderFeatures, Box<dyn std::error::Error>>;
}
