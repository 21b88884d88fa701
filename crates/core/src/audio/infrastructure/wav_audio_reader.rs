use std::path::Path;

use crate::audio::domain::audio_clip::AudioClip;
use crate::audio::domain::audio_reader::AudioReader;
use crate::shared::constants::WAV_EXTENSION;

use super::wav_error::WavError;

/// Decodes uncompressed PCM (integer or 32-bit float) wave files with hound.
///
/// Anything without a `.wav` extension or a valid RIFF/WAVE header is
/// rejected before any samples are read.
pub struct WavAudioReader;

/// True when `path` carries a `.wav` extension (any case).
pub fn has_wav_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(WAV_EXTENSION))
        .unwrap_or(false)
}

impl AudioReader for WavAudioReader {
    fn read_audio(&self, path: &Path) -> Result<AudioClip, Box<dyn std::error::Error>> {
        if !has_wav_extension(path) {
            return Err(WavError::NotWave {
                path: path.to_path_buf(),
            }
            .into());
        }

        let reader = hound::WavReader::open(path).map_err(|source| match source {
            hound::Error::FormatError(_) => WavError::NotWave {
                path: path.to_path_buf(),
            },
            source => WavError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let spec = reader.spec();

        let decode_err = |source: hound::Error| WavError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, bits @ 8..=32) => {
                let scale = (1i64 << (bits - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(decode_err)?
            }
            (hound::SampleFormat::Float, 32) => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(decode_err)?,
            (format, bits) => {
                return Err(WavError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    bits,
                    format: match format {
                        hound::SampleFormat::Int => "integer",
                        hound::SampleFormat::Float => "float",
                    },
                }
                .into())
            }
        };

        log::debug!(
            "Decoded {}: {} Hz, {} channel(s), {} samples",
            path.display(),
            spec.sample_rate,
            spec.channels,
            samples.len()
        );
        Ok(AudioClip::new(samples, spec.sample_rate, spec.channels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::fs;

    fn write_int_wav(path: &Path, samples: &[i16], channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_reads_16_bit_pcm_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.wav");
        write_int_wav(&path, &[0, 16384, -32768, 32767], 1);

        let clip = WavAudioReader.read_audio(&path).unwrap();
        assert_eq!(clip.sample_rate(), 16000);
        assert_eq!(clip.channels(), 1);
        assert_relative_eq!(clip.samples()[1], 0.5);
        assert_relative_eq!(clip.samples()[2], -1.0);
        assert!(clip.samples()[3] < 1.0);
    }

    #[test]
    fn test_reads_stereo_interleaved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_int_wav(&path, &[100, -100, 200, -200], 2);
        let clip = WavAudioReader.read_audio(&path).unwrap();
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.frame_count(), 2);
    }

    #[test]
    fn test_reads_float_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.25f32).unwrap();
        writer.finalize().unwrap();
        let clip = WavAudioReader.read_audio(&path).unwrap();
        assert_eq!(clip.samples(), &[0.25]);
    }

    #[rstest]
    #[case("voice.mp3")]
    #[case("voice")]
    #[case("voice.wav.txt")]
    fn test_rejects_non_wav_extension(#[case] name: &str) {
        let err = WavAudioReader.read_audio(Path::new(name)).unwrap_err();
        assert!(err.to_string().contains("only wave (.wav) files are supported"));
    }

    #[test]
    fn test_accepts_uppercase_extension() {
        assert!(has_wav_extension(Path::new("VOICE.WAV")));
    }

    #[test]
    fn test_rejects_non_wave_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.wav");
        fs::write(&path, b"ID3\x03\x00 definitely not a riff header").unwrap();
        let err = WavAudioReader.read_audio(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WavError>(),
            Some(WavError::NotWave { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_a_decode_error() {
        let err = WavAudioReader
            .read_audio(Path::new("/nonexistent/in.wav"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WavError>(),
            Some(WavError::Decode { .. })
        ));
    }
}
