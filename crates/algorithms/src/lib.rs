//! # aire algorithms
//!
//! Numerical transforms for Mexico City air-quality data.
//!
//! ## Available Algorithm Categories
//!
//! - **interpolation**: Directional (circular) IDW for bearings such as wind direction
//! - **imeca**: Pollutant concentration to IMECA index conversion

pub mod imeca;
pub mod interpolation;
mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::imeca::{
        convert_many, convert_many_codes, to_index, to_index_code, Pollutant,
        UnknownPollutantPolicy,
    };
    pub use crate::interpolation::{
        directional_idw, directional_idw_grid, directional_idw_samples, DirectionalIdw,
        DirectionalIdwGridParams, DirectionalIdwParams,
    };
    pub use aire_core::prelude::*;
}
