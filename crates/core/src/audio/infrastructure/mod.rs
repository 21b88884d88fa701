pub mod wav_audio_reader;
pub mod wav_audio_writer;
pub mod wav_error;
