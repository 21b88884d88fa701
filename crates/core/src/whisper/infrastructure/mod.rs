pub mod envelope_resampler;
pub mod formant_warp;
pub mod phantom_silhouette_transformer;
pub mod piecewise_affine;
pub mod triangulation;
