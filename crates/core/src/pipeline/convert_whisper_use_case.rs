use std::path::Path;

use rand::RngCore;

use crate::audio::domain::audio_clip::AudioClip;
use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_writer::AudioWriter;
use crate::audio::domain::stereo_pan::pan;
use crate::vocoder::domain::speech_analyzer::SpeechAnalyzer;
use crate::vocoder::domain::speech_synthesizer::SpeechSynthesizer;
use crate::whisper::domain::feature_transformer::FeatureTransformer;

/// Reads a recording, whispers every channel independently and writes the
/// result with the same sample rate, channel count and length.
///
/// This crate ships no vocoder: callers supply the [`SpeechAnalyzer`] and
/// [`SpeechSynthesizer`] (e.g. bindings to WORLD). The `phantom-silhouette`
/// binary works on feature files through `ConvertFeaturesUseCase` and has no
/// wave-file mode.
pub struct ConvertWhisperUseCase {
    reader: Box<dyn AudioReader>,
    writer: Box<dyn AudioWriter>,
    analyzer: Box<dyn SpeechAnalyzer>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    transformer: Box<dyn FeatureTransformer>,
    right_ratio: f64,
}

impl ConvertWhisperUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        writer: Box<dyn AudioWriter>,
        analyzer: Box<dyn SpeechAnalyzer>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        transformer: Box<dyn FeatureTransformer>,
        right_ratio: f64,
    ) -> Self {
        Self {
            reader,
            writer,
            analyzer,
            synthesizer,
            transformer,
            right_ratio,
        }
    }

    pub fn run(
        &self,
        source_path: &Path,
        output_path: &Path,
        rng: &mut dyn RngCore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // 1. Decode
        let audio = self.reader.read_audio(source_path)?;
        log::info!(
            "Converting {} ({} Hz, {} channel(s), {:.2}s)",
            source_path.display(),
            audio.sample_rate(),
            audio.channels(),
            audio.duration()
        );

        // 2. Analyze, whisper and resynthesize each channel
        let length = audio.frame_count();
        let mut channels = Vec::with_capacity(audio.channels() as usize);
        for (index, channel) in audio.split_channels().into_iter().enumerate() {
            let signal: Vec<f64> = channel.iter().map(|&s| s as f64).collect();
            let features = self.analyzer.analyze(&signal, audio.sample_rate())?;
            log::debug!(
                "Channel {index}: {} frames x {} bins",
                features.frame_count(),
                features.bin_count()
            );
            let whispered = self.transformer.transform_features(&features, rng)?;
            let mut synthesized = self.synthesizer.synthesize(&whispered)?;
            // Vocoders round the length up to whole frames.
            synthesized.resize(length, 0.0);
            channels.push(synthesized.into_iter().map(|s| s as f32).collect::<Vec<f32>>());
        }

        // 3. Re-balance the stereo image
        if let [left, right] = channels.as_mut_slice() {
            pan(left, right, self.right_ratio);
        }

        // 4. Encode
        let output = AudioClip::from_channels(&channels, audio.sample_rate());
        self.writer.write_audio(output_path, &output)?;
        log::info!("Wrote {}", output_path.display());

        Ok(())
    }
}
