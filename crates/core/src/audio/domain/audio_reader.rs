use crate::audio::domain::audio_clip::AudioClip;
use std::path::Path;

/// Domain interface for decoding an audio file.
pub trait AudioReader: Send {
    /// Decode the whole file, keeping its native sample rate and channel layout.
    fn read_audio(&self, path: &Path) -> Result<AudioClip, Box<dyn std::error::Error>>;
}
