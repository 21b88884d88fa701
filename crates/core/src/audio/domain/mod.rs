pub mod audio_clip;
pub mod audio_reader;
pub mod audio_writer;
pub mod stereo_pan;
