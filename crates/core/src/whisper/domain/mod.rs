pub mod excitation_replacer;
pub mod feature_transformer;
pub mod scale;
pub mod warp_config;
pub mod warp_error;
pub mod weighting;
