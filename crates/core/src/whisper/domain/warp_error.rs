use thiserror::Error;

/// Failures of the formant warp. None of these are retryable with the same input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WarpError {
    #[error("envelope has no data (shape {frames}x{bins})")]
    EmptyEnvelope { frames: usize, bins: usize },
    #[error("warp needs at least {required} frequency anchors, got {actual}")]
    TooFewAnchors { required: usize, actual: usize },
    #[error("warp needs at least {required} time positions, got {actual}")]
    TooFewTimePositions { required: usize, actual: usize },
    #[error("warp anchors must be strictly increasing, {previous} Hz is followed by {next} Hz")]
    NonMonotoneAnchors { previous: f64, next: f64 },
    #[error("duplicate control point at ({x}, {y})")]
    DuplicateControlPoint { x: f64, y: f64 },
    #[error("grid axis must be strictly increasing, {previous} is followed by {next}")]
    UnorderedGridAxis { previous: f64, next: f64 },
    #[error("control points are collinear; cannot triangulate")]
    CollinearControlPoints,
    #[error("source and destination control point counts differ ({source_len} vs {destination_len})")]
    MismatchedControlPoints {
        source_len: usize,
        destination_len: usize,
    },
}
