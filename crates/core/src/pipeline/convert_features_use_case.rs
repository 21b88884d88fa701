use std::path::Path;

use rand::RngCore;

use crate::vocoder::domain::feature_store::FeatureStore;
use crate::whisper::domain::feature_transformer::FeatureTransformer;

/// Whispers a stored feature set: load, transform, save.
pub struct ConvertFeaturesUseCase {
    store: Box<dyn FeatureStore>,
    transformer: Box<dyn FeatureTransformer>,
}

impl ConvertFeaturesUseCase {
    pub fn new(store: Box<dyn FeatureStore>, transformer: Box<dyn FeatureTransformer>) -> Self {
        Self { store, transformer }
    }

    pub fn run(
        &self,
        source_path: &Path,
        output_path: &Path,
        rng: &mut dyn RngCore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let features = self.store.load(source_path)?;
        log::info!(
            "Loaded {}: {} frames x {} bins at {} Hz",
            source_path.display(),
            features.frame_count(),
            features.bin_count(),
            features.sample_rate()
        );

        let whispered = self.transformer.transform_features(&features, rng)?;

        self.store.save(output_path, &whispered)?;
        log::info!("Wrote {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocoder::domain::vocoder_features::VocoderFeatures;
    use crate::vocoder::infrastructure::json_feature_store::JsonFeatureStore;
    use crate::whisper::domain::warp_config::WarpConfig;
    use crate::whisper::infrastructure::phantom_silhouette_transformer::PhantomSilhouetteTransformer;
    use ndarray::Array2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // ─── Stubs ───

    #[derive(Default)]
    struct InMemoryStore {
        files: Arc<Mutex<HashMap<PathBuf, VocoderFeatures>>>,
    }

    impl FeatureStore for InMemoryStore {
        fn load(&self, path: &Path) -> Result<VocoderFeatures, Box<dyn std::error::Error>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| format!("no such file: {}", path.display()).into())
        }

        fn save(
            &self,
            path: &Path,
            features: &VocoderFeatures,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), features.clone());
            Ok(())
        }
    }

    struct RecordingTransformer {
        calls: Arc<Mutex<usize>>,
    }

    impl FeatureTransformer for RecordingTransformer {
        fn transform_features(
            &self,
            features: &VocoderFeatures,
            _: &mut dyn RngCore,
        ) -> Result<VocoderFeatures, Box<dyn std::error::Error>> {
            *self.calls.lock().unwrap() += 1;
            Ok(features.clone())
        }
    }

    fn features() -> VocoderFeatures {
        VocoderFeatures::new(
            16000,
            vec![140.0; 4],
            Array2::from_shape_fn((4, 513), |(t, f)| 1.0 + (t * f % 5) as f64),
            Array2::from_elem((4, 513), 0.1),
        )
        .unwrap()
    }

    #[test]
    fn test_run_loads_transforms_and_saves() {
        let files = Arc::new(Mutex::new(HashMap::new()));
        files
            .lock()
            .unwrap()
            .insert(PathBuf::from("in.json"), features());
        let calls = Arc::new(Mutex::new(0));
        let uc = ConvertFeaturesUseCase::new(
            Box::new(InMemoryStore {
                files: files.clone(),
            }),
            Box::new(RecordingTransformer {
                calls: calls.clone(),
            }),
        );

        let mut rng = Pcg32::seed_from_u64(3);
        uc.run(Path::new("in.json"), Path::new("out.json"), &mut rng)
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(
            files.lock().unwrap().get(Path::new("out.json")),
            Some(&features())
        );
    }

    #[test]
    fn test_missing_input_is_an_error_and_nothing_is_saved() {
        let store = InMemoryStore::default();
        let files = store.files.clone();
        let uc = ConvertFeaturesUseCase::new(
            Box::new(store),
            Box::new(PhantomSilhouetteTransformer::default()),
        );
        let mut rng = Pcg32::seed_from_u64(3);
        let err = uc
            .run(Path::new("absent.json"), Path::new("out.json"), &mut rng)
            .unwrap_err();
        assert!(err.to_string().contains("absent.json"));
        assert!(files.lock().unwrap().is_empty());
    }

    #[test]
    fn test_json_round_trip_through_whisper_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        JsonFeatureStore.save(&input, &features()).unwrap();

        let uc = ConvertFeaturesUseCase::new(
            Box::new(JsonFeatureStore),
            Box::new(PhantomSilhouetteTransformer::new(WarpConfig::fixed_anchors())),
        );
        let mut rng = Pcg32::seed_from_u64(3);
        uc.run(&input, &output, &mut rng).unwrap();

        let converted = JsonFeatureStore.load(&output).unwrap();
        assert_eq!(converted.sample_rate(), 16000);
        assert_eq!(converted.sp().dim(), (4, 513));
        assert_eq!(converted.ap(), features().ap());
        assert!(converted.sp().iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_same_seed_gives_same_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        JsonFeatureStore.save(&input, &features()).unwrap();
        let uc = ConvertFeaturesUseCase::new(
            Box::new(JsonFeatureStore),
            Box::new(PhantomSilhouetteTransformer::default()),
        );

        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");
        uc.run(&input, &first, &mut Pcg32::seed_from_u64(9)).unwrap();
        uc.run(&input, &second, &mut Pcg32::seed_from_u64(9)).unwrap();

        assert_eq!(
            JsonFeatureStore.load(&first).unwrap(),
            JsonFeatureStore.load(&second).unwrap()
        );
    }
}
