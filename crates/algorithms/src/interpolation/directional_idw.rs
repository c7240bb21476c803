//! Inverse Distance Weighting for directional (circular) data
//!
//! Interpolates bearings such as wind direction. A plain weighted average
//! of degrees fails across north (the mean of 355° and 5° would be 180°),
//! so each value is decomposed into its unit-circle components, those are
//! averaged with IDW weights, and the mean vector is turned back into an
//! angle:
//!
//! ```text
//! ȳ = Σ(wi * sin θi) / Σwi
//! x̄ = Σ(wi * cos θi) / Σwi
//! θ(x,y) = atan2(ȳ, x̄)            normalized into [0, 360)
//! where wi = 1 / d(x,y, xi,yi)^p
//! ```
//!
//! A target that coincides exactly with one or more sources takes the
//! circular mean of those sources only (see [`WeightMatrix`]).

use crate::maybe_rayon::*;
use aire_core::{
    Algorithm, CoordinateSystem, DirectionalSample, Error, GeoTransform, Point, Raster, Result,
};
use tracing::debug;

use super::matrix::{DistanceMatrix, WeightMatrix};

/// Parameters for directional IDW
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalIdwParams {
    /// Power parameter (default: 2.0).
    /// Higher values give more weight to nearby points. Zero or negative
    /// values are accepted and produce degenerate weighting.
    pub power: f64,
    /// How point coordinates are measured (default: planar)
    pub coordinates: CoordinateSystem,
}

impl Default for DirectionalIdwParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            coordinates: CoordinateSystem::Planar,
        }
    }
}

/// Parameters for interpolating a direction field onto a regular grid
#[derive(Debug, Clone)]
pub struct DirectionalIdwGridParams {
    /// Power parameter (default: 2.0)
    pub power: f64,
    /// How point coordinates are measured (default: planar)
    pub coordinates: CoordinateSystem,
    /// Output grid rows
    pub rows: usize,
    /// Output grid columns
    pub cols: usize,
    /// Placement of the output grid
    pub transform: GeoTransform,
}

impl Default for DirectionalIdwGridParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            coordinates: CoordinateSystem::Planar,
            rows: 100,
            cols: 100,
            transform: GeoTransform::default(),
        }
    }
}

/// Fold an angle in degrees into a single rotation `[0, 360)`.
///
/// NaN stays NaN.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Weighted circular mean of `values` (degrees) for each row of `weights`.
///
/// Rows whose weights sum to zero produce NaN.
pub fn circular_weighted_mean(weights: &WeightMatrix, values: &[f64]) -> Result<Vec<f64>> {
    let (rows, cols) = weights.shape();
    if values.len() != cols {
        return Err(Error::LengthMismatch {
            what: "values",
            expected: cols,
            actual: values.len(),
        });
    }

    let components: Vec<(f64, f64)> = values
        .iter()
        .map(|&deg| {
            let rad = deg.to_radians();
            (rad.sin(), rad.cos())
        })
        .collect();

    let w = weights.view();

    let result: Vec<f64> = (0..rows)
        .into_par_iter()
        .map(|row| {
            let row_w = w.row(row);

            // Scale by the largest weight so tiny distances can't overflow the sums
            let scale = row_w.iter().fold(0.0_f64, |m, &wi| m.max(wi));
            if scale <= 0.0 || !scale.is_finite() {
                return f64::NAN;
            }

            let mut sum_w = 0.0;
            let mut sum_wy = 0.0;
            let mut sum_wx = 0.0;

            for (&wi, &(y, x)) in row_w.iter().zip(components.iter()) {
                let wi = wi / scale;
                sum_w += wi;
                sum_wy += wi * y;
                sum_wx += wi * x;
            }

            let mean_y = sum_wy / sum_w;
            let mean_x = sum_wx / sum_w;

            normalize_degrees(mean_y.atan2(mean_x).to_degrees())
        })
        .collect();

    Ok(result)
}

/// Interpolate directional values at query points.
///
/// # Arguments
/// * `values` - Bearing in degrees at each source point
/// * `sources` - Source (measurement) locations, same length as `values`
/// * `targets` - Query locations
/// * `params` - Power and coordinate system
///
/// # Returns
/// One bearing in `[0, 360)` per target, in target order. Targets whose
/// total weight is zero are NaN.
///
/// # Errors
/// `LengthMismatch` if `values` and `sources` differ in length, and
/// `InvalidArgument` if `power` is NaN. Nothing is computed in either case.
pub fn directional_idw(
    values: &[f64],
    sources: &[Point],
    targets: &[Point],
    params: &DirectionalIdwParams,
) -> Result<Vec<f64>> {
    if values.len() != sources.len() {
        return Err(Error::LengthMismatch {
            what: "values vs source points",
            expected: sources.len(),
            actual: values.len(),
        });
    }
    if params.power.is_nan() {
        return Err(Error::InvalidArgument {
            name: "power",
            reason: "must be a number".into(),
        });
    }

    let distances = DistanceMatrix::compute(sources, targets, params.coordinates)?;
    let weights = WeightMatrix::from_distances(&distances, params.power);

    debug!(
        targets = targets.len(),
        sources = sources.len(),
        coincident = weights.coincident_rows(),
        power = params.power,
        "directional IDW"
    );

    circular_weighted_mean(&weights, values)
}

/// [`directional_idw`] over paired samples.
pub fn directional_idw_samples(
    samples: &[DirectionalSample],
    targets: &[Point],
    params: &DirectionalIdwParams,
) -> Result<Vec<f64>> {
    let (sources, values): (Vec<Point>, Vec<f64>) =
        samples.iter().map(|s| (s.point, s.value)).unzip();
    directional_idw(&values, &sources, targets, params)
}

/// Interpolate a direction field at every cell center of a regular grid.
///
/// Useful to draw wind spokes/arrows over an area covered by a sparse
/// station network.
pub fn directional_idw_grid(
    samples: &[DirectionalSample],
    params: DirectionalIdwGridParams,
) -> Result<Raster> {
    let rows = params.rows;
    let cols = params.cols;
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let transform = params.transform;
    let targets: Vec<Point> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| transform.cell_center(col, row)))
        .collect();

    let point_params = DirectionalIdwParams {
        power: params.power,
        coordinates: params.coordinates,
    };
    let data = directional_idw_samples(samples, &targets, &point_params)?;

    let mut output = Raster::from_vec(data, rows, cols)?;
    output.set_transform(transform);

    Ok(output)
}

/// Input for [`DirectionalIdw`]: source samples and query points
#[derive(Debug, Clone, Default)]
pub struct DirectionalIdwInput {
    pub samples: Vec<DirectionalSample>,
    pub targets: Vec<Point>,
}

/// Directional IDW algorithm
#[derive(Debug, Clone, Default)]
pub struct DirectionalIdw;

impl Algorithm for DirectionalIdw {
    type Input = DirectionalIdwInput;
    type Output = Vec<f64>;
    type Params = DirectionalIdwParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Directional IDW"
    }

    fn description(&self) -> &'static str {
        "Inverse distance weighted circular mean of bearings (e.g. wind direction)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        directional_idw_samples(&input.samples, &input.targets, &params)
    }
}
