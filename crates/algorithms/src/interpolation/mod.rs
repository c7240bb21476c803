//! Spatial interpolation of directional data
//!
//! - Directional IDW: inverse distance weighted circular mean of bearings
//! - Distance / weight matrices used by the interpolator

mod directional_idw;
mod matrix;

pub use directional_idw::{
    circular_weighted_mean, directional_idw, directional_idw_grid, directional_idw_samples,
    normalize_degrees, DirectionalIdw, DirectionalIdwGridParams, DirectionalIdwInput,
    DirectionalIdwParams,
};
pub use matrix::{DistanceMatrix, WeightMatrix};
