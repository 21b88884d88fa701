use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WavError {
    #[error("invalid file format for '{path}': only wave (.wav) files are supported")]
    NotWave { path: PathBuf },
    #[error("failed to decode wave file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("unsupported sample format in {path}: {bits}-bit {format}")]
    UnsupportedFormat {
        path: PathBuf,
        bits: u16,
        format: &'static str,
    },
    #[error("failed to encode wave file {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}
