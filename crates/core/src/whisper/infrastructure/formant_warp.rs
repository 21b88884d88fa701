use ndarray::Array2;

use crate::whisper::domain::warp_config::WarpConfig;
use crate::whisper::domain::warp_error::WarpError;

use super::envelope_resampler::resample;
use super::piecewise_affine::PiecewiseAffineTransform;
use super::triangulation::Point;

/// Control points of the warp as a tensor grid in output space.
///
/// Point `(r, c)` sits at `[columns[c], rows[r]]` and reads the input at
/// `sources[r * columns.len() + c]`, which keeps the frame coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGrid {
    pub columns: Vec<f64>,
    pub rows: Vec<f64>,
    pub sources: Vec<Point>,
}

impl ControlGrid {
    /// Output-space positions, row-major.
    pub fn targets(&self) -> Vec<Point> {
        self.rows
            .iter()
            .flat_map(|&row| self.columns.iter().map(move |&column| [column, row]))
            .collect()
    }
}

/// Raises F1/F2 by warping the frequency axis of a spectral envelope.
///
/// The warp is time-invariant: every control point keeps its frame
/// coordinate, only the bin coordinate moves. A fresh piecewise-affine fit
/// is made on every call.
pub struct FormantWarp {
    config: WarpConfig,
}

impl Default for FormantWarp {
    fn default() -> Self {
        Self::new(WarpConfig::default())
    }
}

impl FormantWarp {
    pub fn new(config: WarpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WarpConfig {
        &self.config
    }

    /// Output-space control grid and the input locations its points read from.
    pub fn control_points(
        &self,
        sample_rate: u32,
        frames: usize,
        bins: usize,
    ) -> Result<ControlGrid, WarpError> {
        let pairs = self.config.frequency_pairs(sample_rate, bins)?;
        let rows = self.config.time_positions(frames)?;

        let columns = pairs.iter().map(|&(target_bin, _)| target_bin).collect();
        let sources = rows
            .iter()
            .flat_map(|&row| pairs.iter().map(move |&(_, source_bin)| [source_bin, row]))
            .collect();
        Ok(ControlGrid {
            columns,
            rows,
            sources,
        })
    }

    /// Warp `envelope` (`frames x bins`), returning a new array of the same shape.
    pub fn warp(&self, envelope: &Array2<f64>, sample_rate: u32) -> Result<Array2<f64>, WarpError> {
        let (frames, bins) = envelope.dim();
        if frames == 0 || bins == 0 {
            return Err(WarpError::EmptyEnvelope { frames, bins });
        }

        let grid = self.control_points(sample_rate, frames, bins)?;
        let inverse_map =
            PiecewiseAffineTransform::estimate_grid(&grid.columns, &grid.rows, &grid.sources)?;
        log::debug!(
            "Formant warp: {frames}x{bins} envelope, {} control points, {} cells",
            grid.sources.len(),
            inverse_map.cell_count()
        );
        Ok(resample(envelope, &inverse_map))
    }
}
