pub mod audio;
pub mod pipeline;
pub mod shared;
pub mod vocoder;
pub mod whisper;
