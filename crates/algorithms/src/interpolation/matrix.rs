//! Distance and weight matrices between query and source points
//!
//! Both matrices are M×N with one row per target (query) point and one
//! column per source point. They are derived per call and never cached.

use ndarray::{Array2, ArrayView2};
use crate::maybe_rayon::*;
use aire_core::{CoordinateSystem, Error, Point, Result};

/// Distances from every target point (rows) to every source point (columns).
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Array2<f64>,
}

impl DistanceMatrix {
    /// Compute all target-to-source distances under `coordinates`.
    pub fn compute(
        sources: &[Point],
        targets: &[Point],
        coordinates: CoordinateSystem,
    ) -> Result<Self> {
        let rows = targets.len();
        let cols = sources.len();

        let data: Vec<f64> = (0..rows)
            .into_par_iter()
            .flat_map(|row| {
                let target = targets[row];
                sources
                    .iter()
                    .map(|src| coordinates.distance(&target, src))
                    .collect::<Vec<f64>>()
            })
            .collect();

        let data = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data })
    }

    /// Dimensions as (targets, sources)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

/// Inverse-power weights derived from a [`DistanceMatrix`].
#[derive(Debug, Clone)]
pub struct WeightMatrix {
    data: Array2<f64>,
    coincident: Vec<bool>,
}

impl WeightMatrix {
    /// Weight every (target, source) pair as `1 / distance^power`.
    ///
    /// Rows containing an infinite weight (a target that coincides with one
    /// or more sources) are rewritten so that every infinite entry becomes
    /// `1` and every other entry `0`: such a target takes the plain mean of
    /// the coincident sources only.
    ///
    /// `power` is not validated here; zero and negative powers give
    /// degenerate but well-defined weights.
    pub fn from_distances(distances: &DistanceMatrix, power: f64) -> Self {
        let mut data = distances.data.mapv(|d| 1.0 / d.powf(power));
        let mut coincident = vec![false; data.nrows()];

        for (mut row, flag) in data.rows_mut().into_iter().zip(coincident.iter_mut()) {
            if row.iter().any(|w| w.is_infinite()) {
                row.mapv_inplace(|w| if w.is_infinite() { 1.0 } else { 0.0 });
                *flag = true;
            }
        }

        Self { data, coincident }
    }

    /// Dimensions as (targets, sources)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Sum of the weights in each row
    pub fn row_sums(&self) -> Vec<f64> {
        self.data.rows().into_iter().map(|r| r.sum()).collect()
    }

    /// Whether row `row` was resolved by the coincident-point rule
    pub fn is_coincident(&self, row: usize) -> bool {
        self.coincident.get(row).copied().unwrap_or(false)
    }

    /// Number of rows resolved by the coincident-point rule
    pub fn coincident_rows(&self) -> usize {
        self.coincident.iter().filter(|&&c| c).count()
    }
}
