use crate::audio::domain::audio_clip::AudioClip;
use std::path::Path;

/// Domain interface for encoding an audio file.
pub trait AudioWriter: Send {
    /// Encode the clip to `path`, replacing any existing file.
    fn write_audio(&self, path: &Path, audio: &AudioClip) -> Result<(), Box<dyn std::error::Error>>;
}
