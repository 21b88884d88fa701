pub mod feature_store;
pub mod speech_analyzer;
pub mod speech_synthesizer;
pub mod vocoder_features;
