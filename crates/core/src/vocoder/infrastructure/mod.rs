pub mod json_feature_store;
