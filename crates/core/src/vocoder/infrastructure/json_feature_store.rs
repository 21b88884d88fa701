use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::vocoder::domain::feature_store::FeatureStore;
use crate::vocoder::domain::vocoder_features::{array_from_rows, VocoderFeatures};

/// On-disk layout: envelopes as nested row arrays so external tools can
/// produce the file without knowing about ndarray.
#[derive(Serialize, Deserialize)]
struct FeatureFile {
    sample_rate: u32,
    f0: Vec<f64>,
    sp: Vec<Vec<f64>>,
    ap: Vec<Vec<f64>>,
}

fn to_rows(array: &Array2<f64>) -> Vec<Vec<f64>> {
    array.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn width(rows: &[Vec<f64>]) -> usize {
    rows.first().map_or(0, Vec::len)
}

impl FeatureFile {
    fn from_features(features: &VocoderFeatures) -> Self {
        Self {
            sample_rate: features.sample_rate(),
            f0: features.f0().to_vec(),
            sp: to_rows(features.sp()),
            ap: to_rows(features.ap()),
        }
    }

    fn into_features(self) -> Result<VocoderFeatures, Box<dyn std::error::Error>> {
        let sp = array_from_rows(&self.sp, width(&self.sp))?;
        let ap = array_from_rows(&self.ap, width(&self.ap))?;
        Ok(VocoderFeatures::new(self.sample_rate, self.f0, sp, ap)?)
    }
}

/// Reads and writes [`VocoderFeatures`] as JSON documents of the form
/// `{"sample_rate": .., "f0": [..], "sp": [[..]], "ap": [[..]]}`.
pub struct JsonFeatureStore;

impl FeatureStore for JsonFeatureStore {
    fn load(&self, path: &Path) -> Result<VocoderFeatures, Box<dyn std::error::Error>> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open feature file '{}': {e}", path.display()))?;
        let parsed: FeatureFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Invalid feature file '{}': {e}", path.display()))?;
        parsed.into_features()
    }

    fn save(
        &self,
        path: &Path,
        features: &VocoderFeatures,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &FeatureFile::from_features(features))?;
        writer.flush()?;
        Ok(())
    }
}
