//! Regular grids for gridded interpolation output

mod geotransform;
mod grid;

pub use geotransform::GeoTransform;
pub use grid::Raster;
