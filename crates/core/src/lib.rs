//! # aire core
//!
//! Core types shared by the aire air-quality crates.
//!
//! This crate provides:
//! - `Point` / `DirectionalSample`: measurement and query locations
//! - `CoordinateSystem`: planar or geographic distance
//! - `GeoTransform` / `Raster`: regular output grids
//! - `Error` / `Result`
//! - The `Algorithm` trait for a consistent API

pub mod crs;
pub mod error;
pub mod geometry;
pub mod raster;

pub use crs::CoordinateSystem;
pub use error::{Error, Result};
pub use geometry::{DirectionalSample, Point};
pub use raster::{GeoTransform, Raster};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::CoordinateSystem;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{DirectionalSample, Point};
    pub use crate::raster::{GeoTransform, Raster};
    pub use crate::Algorithm;
}

/// Core trait for algorithms exposed by aire.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
