use std::path::Path;

use crate::audio::domain::audio_clip::AudioClip;
use crate::audio::domain::audio_writer::AudioWriter;

use super::wav_error::WavError;

/// Encodes clips as 16-bit PCM wave files with hound.
pub struct WavAudioWriter;

/// Clip to [-1, 1] and quantize to a signed 16-bit sample.
pub fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

impl AudioWriter for WavAudioWriter {
    fn write_audio(&self, path: &Path, audio: &AudioClip) -> Result<(), Box<dyn std::error::Error>> {
        let encode_err = |source: hound::Error| WavError::Encode {
            path: path.to_path_buf(),
            source,
        };
        let spec = hound::WavSpec {
            channels: audio.channels(),
            sample_rate: audio.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec).map_err(encode_err)?;
        for &s in audio.samples() {
            writer.write_sample(to_pcm16(s)).map_err(encode_err)?;
        }
        writer.finalize().map_err(encode_err)?;

        log::debug!(
            "Encoded {} samples to {}",
            audio.samples().len(),
            path.display()
        );
        Ok(())
    }
}
