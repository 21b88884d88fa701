pub mod convert_features_use_case;
pub mod convert_whisper_use_case;
