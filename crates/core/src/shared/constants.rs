/// Value substituted for exact zeros in the output envelope. Synthesis takes
/// logarithms of the envelope, so no bin may be left without energy.
pub const ENVELOPE_FLOOR: f64 = 1e-8;

pub const WAV_EXTENSION: &str = "wav";
pub const FEATURE_FILE_EXTENSION: &str = "json";

